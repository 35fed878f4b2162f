//! # Job Description Document
//!
//! This module turns the text of a `.jobforge.yaml` file into the raw shape
//! the matrix expander works with: an ordered list of top-level options, the
//! conditional (axis-tagged) options, and the `matrix` block itself.
//!
//! Parsing is deliberately shallow. Option values stay as `serde_yaml::Value`
//! and are only interpreted by the option handler that consumes them; the
//! recognized option set is closed, and each handler knows the exact shape it
//! accepts. What this module does resolve is key structure:
//!
//! - a plain key (`build_shell_commands`) is a base option;
//! - a key with one or more `{axis}-{value}:` prefixes
//!   (`planet-earth:build_shell_commands`) is a conditional option, merged
//!   into the base mapping only for matrix cells matching every tag;
//! - `matrix` declares the build matrix axes, in declaration order.
//!
//! `serde_yaml::Mapping` preserves insertion order, which the expander and
//! the compiler both rely on for deterministic output.

use crate::error::{Error, Result};
use serde_yaml::Value;

/// Name of the job description file at a repository's root.
pub const CONFIG_FILENAME: &str = ".jobforge.yaml";

/// An option that only applies to matrix cells matching all of its tags.
#[derive(Debug, Clone)]
pub struct ConditionalOption {
    /// Axis-value tags, each in `{axis}-{value}` form.
    pub tags: Vec<String>,
    /// The option key the tags guard.
    pub key: String,
    pub value: Value,
}

/// The raw, order-preserving content of a job description file.
#[derive(Debug, Clone, Default)]
pub struct ConfigDoc {
    /// Base options in declaration order.
    pub options: Vec<(String, Value)>,
    /// Axis-conditional options in declaration order.
    pub conditional: Vec<ConditionalOption>,
    /// Matrix axes in declaration order, each with its declared values.
    pub matrix: Vec<(String, Vec<String>)>,
}

impl ConfigDoc {
    /// Parse job description text into its raw document shape.
    ///
    /// Fails if the text is not a YAML mapping at the top level (empty files
    /// and scalar-only garbage both land here).
    pub fn parse(contents: &str) -> Result<ConfigDoc> {
        let value: Value = serde_yaml::from_str(contents)?;
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(Error::ConfigParse {
                    message: "could not parse anything from the job description contents"
                        .to_string(),
                    hint: None,
                })
            }
        };

        let mut doc = ConfigDoc::default();
        for (key, value) in mapping {
            let key = match key {
                Value::String(key) => key,
                other => {
                    return Err(Error::ConfigParse {
                        message: format!("expected a string key, got {:?}", other),
                        hint: None,
                    })
                }
            };

            if key == "matrix" {
                doc.matrix = parse_matrix(&value)?;
            } else if key.contains(':') {
                let mut parts: Vec<&str> = key.split(':').collect();
                let option = parts.pop().unwrap_or_default();
                doc.conditional.push(ConditionalOption {
                    tags: parts.iter().map(|tag| tag.to_string()).collect(),
                    key: option.to_string(),
                    value,
                });
            } else {
                doc.options.push((key, value));
            }
        }
        Ok(doc)
    }
}

/// Read the `matrix` block: a mapping of axis name to a sequence of values.
fn parse_matrix(value: &Value) -> Result<Vec<(String, Vec<String>)>> {
    let mapping = value.as_mapping().ok_or_else(|| Error::InvalidOption {
        option: "matrix".to_string(),
        message: "expected a mapping of axis name to a list of values".to_string(),
    })?;

    let mut axes = Vec::with_capacity(mapping.len());
    for (axis, values) in mapping {
        let axis = axis.as_str().ok_or_else(|| Error::InvalidOption {
            option: "matrix".to_string(),
            message: format!("axis names must be strings, got {:?}", axis),
        })?;
        let values = values.as_sequence().ok_or_else(|| Error::InvalidOption {
            option: "matrix".to_string(),
            message: format!("axis '{}' must declare a list of values", axis),
        })?;
        let mut axis_values = Vec::with_capacity(values.len());
        for value in values {
            axis_values.push(scalar_string(value).ok_or_else(|| Error::InvalidOption {
                option: "matrix".to_string(),
                message: format!("axis '{}' has a non-scalar value", axis),
            })?);
        }
        axes.push((axis.to_string(), axis_values));
    }
    Ok(axes)
}

/// Render a scalar YAML value as a string.
///
/// Strings lose any trailing newlines (YAML block scalars keep one; the
/// compiled documents never want it), interior newlines stay verbatim.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim_end_matches('\n').to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
