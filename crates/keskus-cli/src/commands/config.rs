use keskus_core::config::KeskusConfig;
use keskus_core::error::KeskusError;

use super::Context;
use crate::output;

pub fn show(ctx: &Context) -> Result<(), KeskusError> {
    if !ctx.config_path.exists() {
        eprintln!(
            "No config file at {}, showing defaults.",
            ctx.config_path.display()
        );
    }
    output::json::print(&ctx.config)
}

pub fn init(ctx: &Context, force: bool) -> Result<(), KeskusError> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        return Err(KeskusError::ConfigLoad {
            path: path.clone(),
            reason: "file already exists (use --force to overwrite)".into(),
        });
    }

    KeskusConfig::default().save(path)?;
    eprintln!("Wrote default configuration to {}", path.display());
    Ok(())
}
