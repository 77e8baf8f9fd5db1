use chrono::{DateTime, Utc};
use keskus_core::error::KeskusError;
use keskus_core::export::export_file_name;
use keskus_core::export::layout::ExportOptions;
use std::path::PathBuf;

use super::Context;

pub fn run(
    ctx: &Context,
    out: Option<PathBuf>,
    no_cable: bool,
    split_protection: bool,
) -> Result<(), KeskusError> {
    let options = ExportOptions {
        include_cable_column: ctx.config.export.include_cable_column && !no_cable,
        split_protection: ctx.config.export.split_protection || split_protection,
    };

    let store = ctx.open_store()?;
    let catalog = ctx.catalog()?;
    let (summary, bytes) = keskus_core::export_store(&store, &catalog, &options)?;

    let path = out.unwrap_or_else(|| default_path(Utc::now()));
    std::fs::write(&path, bytes)?;

    eprintln!(
        "Exported {} device(s) in {} group(s) to {}",
        summary.total_count,
        summary.aggregated_items.len(),
        path.display()
    );
    Ok(())
}

/// File name stamped with the UTC date of `now`.
fn default_path(now: DateTime<Utc>) -> PathBuf {
    PathBuf::from(export_file_name(now.date_naive()))
}
