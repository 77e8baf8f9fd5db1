pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod model;
pub mod session;
pub mod store;
pub mod summary;

use catalog::SymbolCatalog;
use error::KeskusError;
use export::layout::ExportOptions;
use store::backend::KeyValueStore;
use store::ExtractionStore;
use summary::SummaryResult;

pub use summary::summarize;

/// Summarize the current contents of a store.
pub fn summarize_store<S: KeyValueStore>(store: &ExtractionStore<S>) -> SummaryResult {
    summarize(store.get())
}

/// Summarize the current contents of a store and render the report workbook.
///
/// Returns the summary alongside the `.xlsx` bytes so callers can report
/// totals without summarizing twice.
pub fn export_store<S: KeyValueStore>(
    store: &ExtractionStore<S>,
    catalog: &SymbolCatalog,
    options: &ExportOptions,
) -> Result<(SummaryResult, Vec<u8>), KeskusError> {
    let summary = summarize_store(store);
    let bytes = export::export_workbook(&summary, catalog, options)?;
    Ok((summary, bytes))
}
