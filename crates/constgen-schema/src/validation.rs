//! Shape validation of a loaded schema document.
//!
//! Converts the loosely-typed document tree into the typed model. Only the
//! shape is checked here: literal tokens are not matched against the declared
//! field types.

use crate::error::SchemaError;
use crate::schema::{ConstantGroup, Field, Literal, Schema, ValueEntry};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Raw group body as written in the document.
#[derive(Debug, Deserialize)]
struct RawGroup {
    format: Map<String, Value>,
    values: Vec<Value>,
    #[serde(default, rename = "genCreateFromValue")]
    gen_create_from_value: bool,
    #[serde(flatten)]
    unknown: Map<String, Value>,
}

/// Returns true if `name` can be emitted as an identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub(crate) fn parse_schema(root: &Value) -> Result<Schema, SchemaError> {
    let root = root.as_object().ok_or(SchemaError::RootNotMapping)?;

    let groups = root
        .iter()
        .map(|(name, body)| parse_group(name, body))
        .collect::<Result<Vec<_>, _>>()?;

    let schema = Schema { groups };
    schema.check()?;
    Ok(schema)
}

fn parse_group(name: &str, body: &Value) -> Result<ConstantGroup, SchemaError> {
    if !is_identifier(name) {
        return Err(SchemaError::shape(name, "group name is not a valid identifier"));
    }

    let raw = RawGroup::deserialize(body).map_err(|err| SchemaError::shape(name, err.to_string()))?;

    for key in raw.unknown.keys() {
        warn!(group = name, key = %key, "ignoring unknown group key");
    }

    let format = raw
        .format
        .iter()
        .map(|(field, type_name)| parse_field(name, field, type_name))
        .collect::<Result<Vec<_>, _>>()?;

    let values = raw
        .values
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(name, index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let group = ConstantGroup {
        name: name.to_string(),
        format,
        values,
        gen_create_from_value: raw.gen_create_from_value,
    };

    debug!(
        group = name,
        fields = group.format.len(),
        entries = group.values.len(),
        "parsed group"
    );

    Ok(group)
}

fn parse_field(group: &str, name: &str, type_name: &Value) -> Result<Field, SchemaError> {
    if !is_identifier(name) {
        return Err(SchemaError::shape(
            group,
            format!("field name `{name}` is not a valid identifier"),
        ));
    }

    match type_name.as_str() {
        Some(type_name) if !type_name.trim().is_empty() => Ok(Field::new(name, type_name.trim())),
        _ => Err(SchemaError::shape(
            group,
            format!(
                "type of field `{name}` must be a non-empty string, got {}",
                describe(type_name)
            ),
        )),
    }
}

/// Parse one value entry: a mapping with exactly one key.
fn parse_entry(group: &str, index: usize, entry: &Value) -> Result<ValueEntry, SchemaError> {
    let map = entry.as_object().ok_or_else(|| {
        SchemaError::shape(
            group,
            format!("value entry #{index} must be a mapping, got {}", describe(entry)),
        )
    })?;

    let mut keys = map.iter();
    let (name, literals) = match (keys.next(), keys.next()) {
        (Some(only), None) => only,
        (None, _) => {
            return Err(SchemaError::shape(
                group,
                format!("value entry #{index} has no key"),
            ));
        }
        (Some(_), Some(_)) => {
            let names: Vec<_> = map.keys().map(|k| format!("`{k}`")).collect();
            return Err(SchemaError::shape(
                group,
                format!(
                    "value entry #{index} must have exactly one key, found {}: {}",
                    map.len(),
                    names.join(", ")
                ),
            ));
        }
    };

    if !is_identifier(name) {
        return Err(SchemaError::entry_shape(
            group,
            name,
            "entry name is not a valid identifier",
        ));
    }

    let tokens = literals.as_array().ok_or_else(|| {
        SchemaError::entry_shape(
            group,
            name,
            format!("literals must be a sequence, got {}", describe(literals)),
        )
    })?;

    let literals = tokens
        .iter()
        .enumerate()
        .map(|(position, token)| parse_literal(group, name, position, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValueEntry::new(name.as_str(), literals))
}

/// Numbers keep their JSON spelling (`arbitrary_precision`). TOML numbers
/// arrive as `i64`/`f64` and render in decimal.
fn parse_literal(
    group: &str,
    entry: &str,
    position: usize,
    token: &Value,
) -> Result<Literal, SchemaError> {
    match token {
        Value::Number(number) => Ok(Literal::new(number.to_string())),
        Value::Bool(flag) => Ok(Literal::new(flag.to_string())),
        Value::String(text) if !text.trim().is_empty() => Ok(Literal::new(text.trim())),
        other => Err(SchemaError::entry_shape(
            group,
            entry,
            format!(
                "literal at position {position} must be a number, boolean or non-empty string, got {}",
                describe(other)
            ),
        )),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(text) if text.trim().is_empty() => "an empty string",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
