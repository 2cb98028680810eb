//! Structural validation of recipe config files.
//!
//! A config is a YAML mapping whose component nodes carry a `_component_`
//! key naming the dotted path to instantiate. Validation checks shape only;
//! instantiation is the training framework's job.

use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;

use crate::error::{Error, Result};

const COMPONENT_KEY: &str = "_component_";

/// Outcome of validating a well-formed config.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    /// Number of `_component_` nodes found
    pub components: usize,
    /// Top-level keys of the config mapping
    pub top_level_keys: Vec<String>,
}

/// Validate the config file at `path`.
pub fn validate_config(path: &Path) -> Result<ConfigReport> {
    let value = load_yaml(path)?;
    validate_value(&value)
}

/// Validate config contents already in memory.
pub fn validate_config_str(contents: &str) -> Result<ConfigReport> {
    let value: Value = serde_yaml::from_str(contents)
        .map_err(|e| Error::InvalidConfig(format!("could not parse config: {e}")))?;
    validate_value(&value)
}

/// Top-level keys of the config file at `path`.
pub fn config_settings(path: &Path) -> Result<Vec<String>> {
    let value = load_yaml(path)?;
    top_level_keys(&value)
}

/// Top-level keys of config contents already in memory.
pub fn settings_from_str(contents: &str) -> Result<Vec<String>> {
    let value: Value = serde_yaml::from_str(contents)
        .map_err(|e| Error::InvalidConfig(format!("could not parse config: {e}")))?;
    top_level_keys(&value)
}

fn load_yaml(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents)
        .map_err(|e| Error::InvalidConfig(format!("could not parse config: {e}")))
}

fn validate_value(value: &Value) -> Result<ConfigReport> {
    let top_level_keys = top_level_keys(value)?;
    if top_level_keys.is_empty() {
        return Err(Error::InvalidConfig("config is empty".to_string()));
    }
    let mut components = 0;
    walk(value, "", &mut components)?;
    Ok(ConfigReport {
        components,
        top_level_keys,
    })
}

fn top_level_keys(value: &Value) -> Result<Vec<String>> {
    let mapping = value
        .as_mapping()
        .ok_or_else(|| Error::InvalidConfig("config root must be a mapping".to_string()))?;
    mapping
        .keys()
        .map(|k| {
            k.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidConfig(format!("non-string key: {k:?}")))
        })
        .collect()
}

fn walk(value: &Value, at: &str, components: &mut usize) -> Result<()> {
    match value {
        Value::Mapping(mapping) => {
            if let Some(component) = mapping.get(COMPONENT_KEY) {
                check_component(component, at)?;
                for key in mapping.keys() {
                    if key.as_str().is_none() {
                        return Err(Error::InvalidConfig(format!(
                            "component at '{at}' has a non-string argument key: {key:?}"
                        )));
                    }
                }
                *components += 1;
            }
            for (key, child) in mapping {
                let label = key.as_str().unwrap_or("?");
                let path = if at.is_empty() {
                    label.to_string()
                } else {
                    format!("{at}.{label}")
                };
                walk(child, &path, components)?;
            }
        }
        Value::Sequence(items) => {
            for (i, child) in items.iter().enumerate() {
                walk(child, &format!("{at}[{i}]"), components)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_component(component: &Value, at: &str) -> Result<()> {
    let path = component.as_str().ok_or_else(|| {
        Error::InvalidConfig(format!("'{COMPONENT_KEY}' at '{at}' must be a string"))
    })?;
    if path.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "'{COMPONENT_KEY}' at '{at}' is empty"
        )));
    }
    let valid = path.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if !valid {
        return Err(Error::InvalidConfig(format!(
            "'{COMPONENT_KEY}' at '{at}' is not a dotted path: {path}"
        )));
    }
    Ok(())
}
