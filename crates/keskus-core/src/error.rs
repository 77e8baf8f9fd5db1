use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KeskusError {
    #[error("invalid extraction response: {0}")]
    InvalidResponse(String),

    #[error("extraction service failed: {0}")]
    Extraction(String),

    #[error("failed to load symbol catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid symbol catalog: {0}")]
    CatalogInvalid(String),

    #[error("storage error for key '{key}': {reason}")]
    Storage { key: String, reason: String },

    #[error("row {row} on page {page} is beyond the {limit}-row page limit")]
    RowOutOfRange {
        page: usize,
        row: usize,
        limit: usize,
    },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
