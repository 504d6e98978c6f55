//! Document backends
//!
//! The operations a spreadsheet producer has to offer. The report only talks
//! to this trait; the xlsx writer implements it, and so does the in-memory
//! document used by tests.

use super::cell::CellValue;
use crate::error::Result;

/// Handle of a sheet inside one backend
pub type SheetId = usize;

pub trait DocumentBackend {
    /// Create a new, empty sheet
    fn add_sheet(&mut self, name: &str) -> Result<SheetId>;

    fn set_column_width(&mut self, sheet: SheetId, col: u16, width: f64) -> Result<()>;

    /// Write one header cell (row 0) with the header style
    fn write_header(&mut self, sheet: SheetId, col: u16, label: &str) -> Result<()>;

    /// Write one data cell with the body style
    fn write_cell(&mut self, sheet: SheetId, row: u32, col: u16, value: &CellValue) -> Result<()>;

    /// Autofilter over the header row, columns `0..=last_col`
    fn set_autofilter(&mut self, sheet: SheetId, last_col: u16) -> Result<()>;

    /// Keep the header row visible while scrolling
    fn freeze_header(&mut self, sheet: SheetId) -> Result<()>;

    /// Flush everything to durable storage
    fn close(self) -> Result<()>;
}
