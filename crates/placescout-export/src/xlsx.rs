use std::path::Path;

use placescout_core::Place;
use rust_xlsxwriter::{Format, Workbook};

use crate::columns::{place_row, Cell, COLUMNS};
use crate::error::ExportError;

const SHEET_NAME: &str = "Places";
const MAX_COLUMN_WIDTH: usize = 50;

pub(crate) fn write_xlsx(places: &[Place], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();

    for (col, name) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, place) in (1u32..).zip(places) {
        for ((col, cell), width) in (0u16..).zip(place_row(place)).zip(widths.iter_mut()) {
            match &cell {
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Cell::Empty => {}
            }
            *width = (*width).max(cell.to_field().chars().count());
        }
    }

    for (col, width) in (0u16..).zip(&widths) {
        let width = (width + 2).min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col, f64::from(u8::try_from(width).unwrap_or(u8::MAX)))?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
