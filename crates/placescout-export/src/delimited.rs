use std::path::Path;

use placescout_core::Place;

use crate::columns::{place_row, Cell, COLUMNS};
use crate::error::ExportError;

pub(crate) fn write_csv(places: &[Place], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for place in places {
        writer.write_record(place_row(place).iter().map(Cell::to_field))?;
    }
    writer.flush()?;
    Ok(())
}
