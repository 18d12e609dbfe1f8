//! Config operations: value listing, key lookup, and result types.
//!
//! Values are looked up by external flag name (or short alias), the same
//! names a user types on the command line.

use std::fmt;

use crate::error::FlagfigError;
use crate::field::{Field, FlagConfig};

const UNSUPPORTED: &str = "<unsupported>";

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A field's current value and its usage text.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// All fields by external name, in declaration order.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Get a field's current value by external name or short alias.
pub fn get_value<C: FlagConfig + ?Sized>(
    config: &mut C,
    key: &str,
) -> Result<ConfigResult, FlagfigError> {
    for field in config.fields() {
        if field.flag_names()?.iter().any(|name| name == key) {
            return Ok(ConfigResult::KeyValue {
                key: field.external_name()?,
                value: format_value(&field),
                doc: field.usage_text().lines().map(str::to_string).collect(),
            });
        }
    }
    Err(FlagfigError::KeyNotFound(key.into()))
}

/// List every field's current value under its external name.
pub fn list_values<C: FlagConfig + ?Sized>(config: &mut C) -> Result<ConfigResult, FlagfigError> {
    let entries = config
        .fields()
        .iter()
        .map(|field| Ok((field.external_name()?, format_value(field))))
        .collect::<Result<Vec<_>, FlagfigError>>()?;

    Ok(ConfigResult::Listing { entries })
}

fn format_value(field: &Field<'_>) -> String {
    match field.slot().current() {
        Some(value) => value.to_string(),
        None => UNSUPPORTED.to_string(),
    }
}
