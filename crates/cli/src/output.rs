use crate::error::CliError;
use serde::Serialize;
use std::fs;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &str) -> Result<(), CliError> {
    fs::write(path, to_json(value)?)?;
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", to_json(value)?);
    Ok(())
}
