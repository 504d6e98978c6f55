//! Excel workbook backend (rust_xlsxwriter)

use super::backend::{DocumentBackend, SheetId};
use super::cell::CellValue;
use crate::error::{InventoryError, Result};
use rust_xlsxwriter::{
    Color, DocProperties, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::path::{Path, PathBuf};

const HEADER_BACKGROUND: u32 = 0xD9E1F2;

/// Workbook file name for one array
pub fn workbook_filename(sid: &str) -> String {
    format!("Vmax-{}.xlsx", sid)
}

/// Writes the report as an `.xlsx` workbook.
///
/// Sheets are built in memory and handed to the workbook on `close`, in the
/// order they were created.
pub struct XlsxBackend {
    path: PathBuf,
    workbook: Workbook,
    sheets: Vec<Worksheet>,
    header_format: Format,
    cell_format: Format,
}

impl XlsxBackend {
    /// Prepare a workbook at `dir/filename`.
    ///
    /// Fails before anything is created when `dir` is missing or cannot be
    /// written by the current user.
    pub fn create(dir: &Path, filename: &str, sid: &str) -> Result<Self> {
        if !dir.is_dir() {
            tracing::error!("Path incorrect ({})", dir.display());
            return Err(InventoryError::Formatter(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        // Write access is checked with a real file, not with mode bits
        tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            tracing::error!("Insufficient rights on {}", dir.display());
            InventoryError::Formatter(format!("{} is not writable: {}", dir.display(), e))
        })?;

        tracing::info!("Initializing an Excel workbook ({})", filename);

        let mut workbook = Workbook::new();
        let properties = DocProperties::new()
            .set_title("EMC Vmax-XRay Inventory")
            .set_subject("Make an inventory of a VMAX")
            .set_category("SAN Storage")
            .set_keywords("SAN, Symmetrix, VMAX")
            .set_comment(format!(
                "Inventory of {} generated on {}",
                sid,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ));
        workbook.set_properties(&properties);

        let header_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(Color::RGB(HEADER_BACKGROUND))
            .set_border(FormatBorder::Thin);
        let cell_format = Format::new().set_align(FormatAlign::Left);

        Ok(Self {
            path: dir.join(filename),
            workbook,
            sheets: Vec::new(),
            header_format,
            cell_format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet(&mut self, sheet: SheetId) -> &mut Worksheet {
        &mut self.sheets[sheet]
    }
}

impl DocumentBackend for XlsxBackend {
    fn add_sheet(&mut self, name: &str) -> Result<SheetId> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(name)?;
        self.sheets.push(worksheet);
        Ok(self.sheets.len() - 1)
    }

    fn set_column_width(&mut self, sheet: SheetId, col: u16, width: f64) -> Result<()> {
        self.sheet(sheet).set_column_width(col, width)?;
        Ok(())
    }

    fn write_header(&mut self, sheet: SheetId, col: u16, label: &str) -> Result<()> {
        let format = self.header_format.clone();
        self.sheet(sheet).write_string_with_format(0, col, label, &format)?;
        Ok(())
    }

    fn write_cell(&mut self, sheet: SheetId, row: u32, col: u16, value: &CellValue) -> Result<()> {
        let format = self.cell_format.clone();
        let worksheet = self.sheet(sheet);
        match value {
            CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, &format)?,
            CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, &format)?,
            CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, &format)?,
        };
        Ok(())
    }

    fn set_autofilter(&mut self, sheet: SheetId, last_col: u16) -> Result<()> {
        self.sheet(sheet).autofilter(0, 0, 0, last_col)?;
        Ok(())
    }

    fn freeze_header(&mut self, sheet: SheetId) -> Result<()> {
        self.sheet(sheet).set_freeze_panes(1, 0)?;
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        tracing::debug!("Now closing the workbook {}", self.path.display());
        for worksheet in self.sheets.drain(..) {
            self.workbook.push_worksheet(worksheet);
        }
        self.workbook.save(&self.path)?;
        Ok(())
    }
}
