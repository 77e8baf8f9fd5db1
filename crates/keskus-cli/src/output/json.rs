use keskus_core::error::KeskusError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), KeskusError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
