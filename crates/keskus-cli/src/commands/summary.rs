use keskus_core::error::KeskusError;
use keskus_core::summarize_store;

use super::Context;
use crate::output;

pub fn run(
    ctx: &Context,
    output_format: &str,
    by_protection: bool,
    devices: bool,
) -> Result<(), KeskusError> {
    let store = ctx.open_store()?;
    let summary = summarize_store(&store);

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => {
            let catalog = ctx.catalog()?;
            output::table::print_summary(&summary, &catalog);
            if by_protection {
                output::table::print_protection(&summary);
            }
            if devices {
                output::table::print_devices(&summary, &catalog);
            }
        }
    }

    Ok(())
}
