//! YAML document adapter.

use serde_yaml::{Mapping, Value};
use crate::model::Issue;

/// Parse raw bytes into a generic YAML value tree with `<<` merge keys
/// expanded.
///
/// Duplicate keys within one mapping are a syntax error.
pub fn parse_document(bytes: &[u8]) -> Result<Value, serde_yaml::Error> {
    let mut value: Value = serde_yaml::from_slice(bytes)?;
    value.apply_merge()?;
    Ok(value)
}

/// Parse bytes and require a mapping root.
///
/// The error side is the single issue that describes why the document
/// cannot be validated further.
pub fn load_mapping(bytes: &[u8]) -> Result<Mapping, Issue> {
    match parse_document(bytes) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(_) => Err(Issue::error("root", "Configuration must be a YAML dictionary")),
        Err(e) => Err(Issue::error("yaml", format!("Invalid YAML syntax: {}", e))),
    }
}

/// Issue for a file that could not be read.
pub fn read_failure(err: &std::io::Error) -> Issue {
    Issue::error("io", format!("Failed to read file: {}", err))
}
