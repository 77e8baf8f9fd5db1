//! Configuration for the keskus tools.

use crate::catalog::{load_catalog, SymbolCatalog};
use crate::error::KeskusError;
use crate::export::layout::ExportOptions;
use crate::ingest::IngestOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeskusConfig {
    /// Spreadsheet layout options.
    pub export: ExportOptions,

    /// Extraction response handling.
    pub ingest: IngestOptions,

    /// Where state is persisted.
    pub store: StoreConfig,

    /// Symbol catalog source.
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the persisted dataset, response and uploaded file.
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".keskus"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Custom catalog JSON file. The built-in table is used when unset.
    pub path: Option<PathBuf>,
}

impl KeskusConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, KeskusError> {
        let content = std::fs::read_to_string(path).map_err(|e| KeskusError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| KeskusError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), KeskusError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The configured catalog, or the built-in one.
    pub fn symbol_catalog(&self) -> Result<SymbolCatalog, KeskusError> {
        match &self.catalog.path {
            Some(path) => load_catalog(path),
            None => SymbolCatalog::builtin(),
        }
    }
}
