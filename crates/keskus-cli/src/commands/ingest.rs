use keskus_core::error::KeskusError;
use keskus_core::ingest::{ingest_json, IngestOptions};
use std::path::PathBuf;

use super::Context;

pub fn run(
    ctx: &Context,
    response_file: PathBuf,
    pdf_file: Option<PathBuf>,
    retain_unmapped: bool,
) -> Result<(), KeskusError> {
    let raw = std::fs::read_to_string(&response_file)?;
    let catalog = ctx.catalog()?;
    let options = IngestOptions {
        retain_unmapped_symbols: retain_unmapped || ctx.config.ingest.retain_unmapped_symbols,
    };

    let outcome = ingest_json(&raw, &catalog, &options)?;

    let mut store = ctx.open_store()?;
    if let Some(path) = &pdf_file {
        let bytes = std::fs::read(path)?;
        store.save_uploaded_file("application/pdf", &bytes)?;
    }
    store.save_raw_response(&raw)?;

    let pages = outcome.dataset.page_count();
    let rows = outcome.dataset.row_count();
    store.set_all(outcome.dataset)?;

    eprintln!(
        "Ingested {} page(s), {} row(s) into {}",
        pages,
        rows,
        ctx.config.store.dir.display()
    );
    for w in &outcome.warnings {
        eprintln!(
            "  warning: page {}, row {}: {}",
            w.page_number,
            w.row_position + 1,
            w.reason
        );
    }

    Ok(())
}
