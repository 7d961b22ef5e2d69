use crea_core::error::CreaError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), CreaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
