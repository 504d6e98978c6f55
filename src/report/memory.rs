//! In-memory document backend
//!
//! Keeps every sheet in a shared [`MemoryDocument`] that tests inspect after the
//! run. Built for unit tests and behind the `test-util` feature.

use super::backend::{DocumentBackend, SheetId};
use super::cell::CellValue;
use crate::error::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Sheet captured by [`MemoryBackend`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    pub name: String,
    pub widths: BTreeMap<u16, f64>,
    pub header: BTreeMap<u16, String>,
    pub cells: BTreeMap<(u32, u16), CellValue>,
    pub autofilters: Vec<u16>,
    pub frozen: bool,
}

impl MemorySheet {
    /// Number of data rows holding at least one cell
    pub fn row_count(&self) -> usize {
        let mut rows: Vec<u32> = self.cells.keys().map(|(row, _)| *row).collect();
        rows.dedup();
        rows.len()
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Text of a cell, `None` if blank or not text
    pub fn text(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).and_then(CellValue::as_text)
    }
}

/// Everything written to a [`MemoryBackend`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDocument {
    pub sheets: Vec<MemorySheet>,
    pub close_count: usize,
}

impl MemoryDocument {
    pub fn sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Backend that keeps the document in memory, shared with the caller
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Rc<RefCell<MemoryDocument>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the document, still readable after `close`
    pub fn document(&self) -> Rc<RefCell<MemoryDocument>> {
        Rc::clone(&self.document)
    }

    fn with_sheet<T>(&self, sheet: SheetId, f: impl FnOnce(&mut MemorySheet) -> T) -> T {
        f(&mut self.document.borrow_mut().sheets[sheet])
    }
}

impl DocumentBackend for MemoryBackend {
    fn add_sheet(&mut self, name: &str) -> Result<SheetId> {
        let mut document = self.document.borrow_mut();
        document.sheets.push(MemorySheet {
            name: name.to_string(),
            ..Default::default()
        });
        Ok(document.sheets.len() - 1)
    }

    fn set_column_width(&mut self, sheet: SheetId, col: u16, width: f64) -> Result<()> {
        self.with_sheet(sheet, |s| s.widths.insert(col, width));
        Ok(())
    }

    fn write_header(&mut self, sheet: SheetId, col: u16, label: &str) -> Result<()> {
        self.with_sheet(sheet, |s| s.header.insert(col, label.to_string()));
        Ok(())
    }

    fn write_cell(&mut self, sheet: SheetId, row: u32, col: u16, value: &CellValue) -> Result<()> {
        self.with_sheet(sheet, |s| s.cells.insert((row, col), value.clone()));
        Ok(())
    }

    fn set_autofilter(&mut self, sheet: SheetId, last_col: u16) -> Result<()> {
        self.with_sheet(sheet, |s| s.autofilters.push(last_col));
        Ok(())
    }

    fn freeze_header(&mut self, sheet: SheetId) -> Result<()> {
        self.with_sheet(sheet, |s| s.frozen = true);
        Ok(())
    }

    fn close(self) -> Result<()> {
        self.document.borrow_mut().close_count += 1;
        Ok(())
    }
}
