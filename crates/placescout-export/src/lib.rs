//! CSV and XLSX output for search results.

pub mod columns;
mod delimited;
pub mod error;
pub mod format;
pub mod stats;
mod xlsx;

use std::path::{Path, PathBuf};

use placescout_core::Place;

pub use columns::{place_row, Cell, COLUMNS};
pub use error::ExportError;
pub use format::{resolve_output_path, ExportFormat};
pub use stats::{summarize, SummaryStats};

/// Writes `places` in input order to `path` (extension forced to match
/// `format`), creating missing parent directories. Returns the path
/// actually written.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be written.
pub fn export_places(
    places: &[Place],
    path: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let path = resolve_output_path(path, format);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        ExportFormat::Csv => delimited::write_csv(places, &path)?,
        ExportFormat::Xlsx => xlsx::write_xlsx(places, &path)?,
    }

    tracing::info!(path = %path.display(), rows = places.len(), %format, "export written");
    Ok(path)
}
