use serde::Serialize;
use sommaire_core::error::SommaireError;

pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, SommaireError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), SommaireError> {
    println!("{}", to_pretty(value)?);
    Ok(())
}
