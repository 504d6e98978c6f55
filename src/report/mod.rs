//! Report output
//!
//! A [`Report`] is the output document of one array: it owns every sheet,
//! creates each one the first time a record of its kind shows up, and flushes
//! them all on `close`.
//!
//! # Module Structure
//!
//! - [`schema`] - Fixed column layout of every sheet
//! - [`cell`] - Record to row conversion
//! - [`backend`] - Operations a spreadsheet producer must offer
//! - `memory` - In-memory producer for tests (`test-util` feature)
//! - [`xlsx`] - Excel workbook producer

pub mod backend;
pub mod cell;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod schema;
pub mod xlsx;

pub use backend::{DocumentBackend, SheetId};
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryBackend, MemoryDocument, MemorySheet};
pub use cell::{render_row, CellValue};
pub use schema::{Column, SheetKind};
pub use xlsx::{workbook_filename, XlsxBackend};

use crate::error::Result;
use crate::resource::Record;
use std::collections::HashMap;

/// Destination for collected records
pub trait RecordSink {
    /// Append one record as a new row of the sheet for `kind`
    fn add_record(&mut self, kind: SheetKind, record: &Record) -> Result<()>;

    /// Flush and finalize; consumes the sink so nothing can be written after
    fn close(self) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct SheetState {
    id: SheetId,
    next_row: u32,
}

/// Output document for one array
pub struct Report<B: DocumentBackend> {
    backend: B,
    sheets: HashMap<SheetKind, SheetState>,
}

impl<B: DocumentBackend> Report<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sheets: HashMap::new(),
        }
    }

    /// Create the sheet for `kind` and write its header
    fn create_sheet(&mut self, kind: SheetKind) -> Result<SheetState> {
        tracing::debug!("Creating sheet {}", kind.name());
        let id = self.backend.add_sheet(kind.name())?;

        for column in kind.columns() {
            self.backend.set_column_width(id, column.index, column.width)?;
            self.backend.write_header(id, column.index, column.field)?;
        }
        self.backend.set_autofilter(id, kind.last_column())?;
        self.backend.freeze_header(id)?;

        Ok(SheetState { id, next_row: 1 })
    }

    /// Claim the next row of the sheet for `kind`, creating the sheet on first use
    fn claim_row(&mut self, kind: SheetKind) -> Result<(SheetId, u32)> {
        let state = match self.sheets.get(&kind) {
            Some(state) => *state,
            None => self.create_sheet(kind)?,
        };
        self.sheets.insert(
            kind,
            SheetState {
                id: state.id,
                next_row: state.next_row + 1,
            },
        );
        Ok((state.id, state.next_row))
    }

    /// Kinds that already have a sheet
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Rows written so far to the sheet for `kind`
    pub fn rows_written(&self, kind: SheetKind) -> u32 {
        self.sheets.get(&kind).map_or(0, |s| s.next_row - 1)
    }
}

impl<B: DocumentBackend> RecordSink for Report<B> {
    fn add_record(&mut self, kind: SheetKind, record: &Record) -> Result<()> {
        let (id, row) = self.claim_row(kind)?;

        for (col, value) in render_row(kind, record) {
            self.backend.write_cell(id, row, col, &value)?;
        }
        Ok(())
    }

    fn close(self) -> Result<()> {
        tracing::debug!("Closing report with {} sheets", self.sheets.len());
        self.backend.close()
    }
}
