/*
 * convert.rs
 * Copyright (c) 2025 Databricks Education Team
 */

//! Conversion from YAML values to variable strings and booleans.

use crate::types::{ConfigError, ConfigResult};
use bdc_template::{Environment, VariableValue};
use indexmap::IndexMap;
use serde_yaml::Value;

/// Whether `name` is a legal variable name (`[A-Za-z0-9_]+`).
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Stringify a scalar YAML value.
///
/// Booleans become `true`/`false`, numbers their YAML spelling and null the
/// empty string. Mappings and sequences are rejected.
pub(crate) fn scalar_to_string(name: &str, section: &str, value: &Value) -> ConfigResult<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(name, section, &tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(ConfigError::NonScalarVariable {
            name: name.to_string(),
            section: section.to_string(),
        }),
    }
}

/// Validate names and stringify values of one `variables` mapping.
pub(crate) fn convert_variables(
    section: &str,
    raw: Option<IndexMap<String, Value>>,
) -> ConfigResult<IndexMap<String, String>> {
    let mut variables = IndexMap::new();
    for (name, value) in raw.unwrap_or_default() {
        if !is_valid_variable_name(&name) {
            return Err(ConfigError::InvalidVariableName {
                name,
                section: section.to_string(),
            });
        }
        let value = scalar_to_string(&name, section, &value)?;
        variables.insert(name, value);
    }
    Ok(variables)
}

/// Parse a boolean string: `t`, `true`, `1`, `yes` or `f`, `false`, `0`,
/// `no`, in any case.
pub fn bool_value(s: &str) -> ConfigResult<bool> {
    match s.to_ascii_lowercase().as_str() {
        "t" | "true" | "1" | "yes" => Ok(true),
        "f" | "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::BadBoolean {
            value: s.to_string(),
        }),
    }
}

/// Interpret a YAML value as a boolean field. Integers are true when non-zero.
pub(crate) fn bool_from_yaml(value: &Value) -> ConfigResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i != 0),
            None => Err(ConfigError::BadBoolean {
                value: n.to_string(),
            }),
        },
        Value::String(s) => bool_value(s),
        Value::Tagged(tagged) => bool_from_yaml(&tagged.value),
        other => Err(ConfigError::BadBoolean {
            value: format!("{:?}", other),
        }),
    }
}

/// Read a variable as a flag. Missing and empty variables are false;
/// anything else must be a recognized boolean.
pub fn variable_flag(env: &Environment, name: &str) -> ConfigResult<bool> {
    match env.value(name) {
        VariableValue::Empty => Ok(false),
        VariableValue::NonEmpty(s) => bool_value(s),
    }
}
