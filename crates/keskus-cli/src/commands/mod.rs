pub mod config;
pub mod export;
pub mod ingest;
pub mod rows;
pub mod summary;
pub mod symbols;

use keskus_core::catalog::SymbolCatalog;
use keskus_core::config::KeskusConfig;
use keskus_core::error::KeskusError;
use keskus_core::store::backend::FileStore;
use keskus_core::store::ExtractionStore;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "keskus.json";

/// Settings shared by every command.
pub struct Context {
    pub config: KeskusConfig,
    pub config_path: PathBuf,
}

impl Context {
    /// Load the config file, if any, and apply command-line overrides.
    ///
    /// An explicitly given config file must exist; the default one is
    /// optional.
    pub fn load(config: Option<PathBuf>, store: Option<PathBuf>) -> Result<Self, KeskusError> {
        let (config_path, mut config) = match config {
            Some(path) => {
                let config = KeskusConfig::from_file(&path)?;
                (path, config)
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                let config = if path.exists() {
                    KeskusConfig::from_file(&path)?
                } else {
                    KeskusConfig::default()
                };
                (path, config)
            }
        };

        if let Some(dir) = store {
            config.store.dir = dir;
        }

        tracing::debug!(
            config = %config_path.display(),
            store = %config.store.dir.display(),
            "loaded settings"
        );

        Ok(Context {
            config,
            config_path,
        })
    }

    pub fn open_store(&self) -> Result<ExtractionStore<FileStore>, KeskusError> {
        ExtractionStore::open(FileStore::new(&self.config.store.dir))
    }

    pub fn catalog(&self) -> Result<SymbolCatalog, KeskusError> {
        self.config.symbol_catalog()
    }
}

pub fn clear(ctx: &Context) -> Result<(), KeskusError> {
    let mut store = ctx.open_store()?;
    store.clear()?;
    eprintln!("Cleared stored data in {}", ctx.config.store.dir.display());
    Ok(())
}
