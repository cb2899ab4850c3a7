use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Forces the extension that matches `format`.
///
/// `report` becomes `report.xlsx`; `places.txt` written as CSV becomes
/// `places.csv`. A matching extension in any case is kept as given.
#[must_use]
pub fn resolve_output_path(path: &Path, format: ExportFormat) -> PathBuf {
    let wanted = format.extension();
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted));

    let mut resolved = path.to_path_buf();
    if !matches {
        resolved.set_extension(wanted);
    }
    resolved
}
