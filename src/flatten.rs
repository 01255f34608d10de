use serde_json::Value;

use crate::{address::is_address, graph::Record};

pub const DEFAULT_SEPARATOR: &str = ".";

/// Flattens nested records into one level, joining names with `"."`.
pub fn flatten(record: &Record) -> Record {
    flatten_with(record, DEFAULT_SEPARATOR)
}

/// Flattens nested records into one level, joining parent and child attribute
/// names with `separator`. Address-shaped values stay nested and empty nested
/// records become `null`.
pub fn flatten_with(record: &Record, separator: &str) -> Record {
    let mut out = Record::new();
    flatten_into(&mut out, record, None, separator);
    out
}

fn flatten_into(out: &mut Record, record: &Record, prefix: Option<&str>, separator: &str) {
    for (name, value) in record {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{separator}{name}"),
            None => name.clone(),
        };
        match value {
            Value::Object(nested) if nested.is_empty() => {
                out.insert(key, Value::Null);
            }
            Value::Object(nested) if is_address(nested) => {
                out.insert(key, value.clone());
            }
            Value::Object(nested) => flatten_into(out, nested, Some(&key), separator),
            other => {
                out.insert(key, other.clone());
            }
        }
    }
}
