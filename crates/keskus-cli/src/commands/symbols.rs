use keskus_core::error::KeskusError;

use super::Context;

pub fn list(ctx: &Context) -> Result<(), KeskusError> {
    let catalog = ctx.catalog()?;

    match &catalog.name {
        Some(name) => println!("{name}\n"),
        None => println!("Available symbols:\n"),
    }

    let id_width = catalog
        .symbols()
        .iter()
        .map(|s| s.id.len())
        .max()
        .unwrap_or(10);

    for symbol in catalog.symbols() {
        println!("  {:<width$}  {}", symbol.id, symbol.name, width = id_width);
        if symbol.api_id != symbol.name {
            println!("  {:<width$}  api: {}", "", symbol.api_id, width = id_width);
        }
    }
    println!();

    Ok(())
}
