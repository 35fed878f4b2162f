//! # Matrix Expansion
//!
//! Expands one job description document into a sequence of [`JobDefinition`]s,
//! one per cell of the cross-product of the declared matrix axes.
//!
//! Three rules shape the expansion:
//!
//! - Axis order is declaration order, outer to inner, and value order within
//!   an axis is declaration order; the resulting sequence of definitions is
//!   fully deterministic.
//! - An axis declared with a single value is a real axis for option merging
//!   and `{axis}` substitution, but is excluded from `matrix_row`; a choice
//!   that is not actually a choice must not leak into job names.
//! - Conditional options (`{axis}-{value}:{option}` keys) merge into the base
//!   option mapping only for cells matching every tag, and win over the base
//!   value on conflict.

use crate::compiler;
use crate::config::{self, ConfigDoc};
use crate::error::{Error, Result};
use crate::repository::Repository;
use serde_yaml::Value;

/// One matrix cell's resolved option mapping, ready for compilation.
///
/// Created by [`expand`], read-only afterward.
#[derive(Debug, Clone)]
pub struct JobDefinition {
    /// Resolved options in declaration order.
    pub options: Vec<(String, Value)>,
    /// The repository this definition is tied to.
    pub repository: Repository,
    /// The matrix coordinate that produced this definition; only axes with
    /// two or more declared values are retained.
    pub matrix_row: Vec<(String, String)>,
}

impl JobDefinition {
    /// Look up an option by key.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The retained value for a matrix axis, if the axis was retained.
    pub fn matrix_value(&self, axis: &str) -> Option<&str> {
        self.matrix_row
            .iter()
            .find(|(a, _)| a == axis)
            .map(|(_, v)| v.as_str())
    }
}

/// Expand a job description document into job definitions.
///
/// Produces exactly one definition per cross-product cell (exactly one with an
/// empty `matrix_row` when there is no matrix block), and fails when the
/// document contains no recognized top-level keys at all.
pub fn expand(contents: &str, repository: &Repository) -> Result<Vec<JobDefinition>> {
    let doc = ConfigDoc::parse(contents)?;

    let recognized = doc
        .options
        .iter()
        .any(|(key, _)| compiler::is_recognized_option(key))
        || doc
            .conditional
            .iter()
            .any(|conditional| compiler::is_recognized_option(&conditional.key))
        || !doc.matrix.is_empty();
    if !recognized {
        return Err(Error::ConfigParse {
            message: "could not parse anything from the job description contents".to_string(),
            hint: Some(format!(
                "expected at least one recognized option or a 'matrix' block in {}",
                config::CONFIG_FILENAME
            )),
        });
    }

    let mut definitions = Vec::new();
    for cell in cross_product(&doc.matrix) {
        let mut options = doc.options.clone();

        for conditional in &doc.conditional {
            let applies = conditional
                .tags
                .iter()
                .all(|tag| cell.iter().any(|(axis, value)| *tag == format!("{}-{}", axis, value)));
            if applies {
                merge_option(&mut options, &conditional.key, conditional.value.clone());
            }
        }

        for (_, value) in options.iter_mut() {
            *value = substitute(value, &cell);
        }

        let matrix_row = cell
            .iter()
            .filter(|(axis, _)| {
                doc.matrix
                    .iter()
                    .any(|(name, values)| name == axis && values.len() >= 2)
            })
            .cloned()
            .collect();

        definitions.push(JobDefinition {
            options,
            repository: repository.clone(),
            matrix_row,
        });
    }
    Ok(definitions)
}

/// Every combination of axis values, in declaration order (first axis
/// outermost). An absent matrix yields a single empty cell.
fn cross_product(axes: &[(String, Vec<String>)]) -> Vec<Vec<(String, String)>> {
    let mut cells: Vec<Vec<(String, String)>> = vec![Vec::new()];
    for (axis, values) in axes {
        let mut next = Vec::with_capacity(cells.len() * values.len());
        for cell in &cells {
            for value in values {
                let mut extended = cell.clone();
                extended.push((axis.clone(), value.clone()));
                next.push(extended);
            }
        }
        cells = next;
    }
    cells
}

/// Set `key` to `value`, replacing an existing entry in place so the original
/// declaration order is preserved.
fn merge_option(options: &mut Vec<(String, Value)>, key: &str, value: Value) {
    if let Some(slot) = options.iter_mut().find(|(k, _)| k.as_str() == key) {
        slot.1 = value;
    } else {
        options.push((key.to_string(), value));
    }
}

/// Replace `{axis}` placeholders with the cell's value, recursively through
/// sequences and mappings. Unknown placeholders are left untouched, so shell
/// constructs like `${HOME}` survive unless an axis shadows them.
fn substitute(value: &Value, cell: &[(String, String)]) -> Value {
    match value {
        Value::String(s) => {
            let mut rendered = s.clone();
            for (axis, axis_value) in cell {
                rendered = rendered.replace(&format!("{{{}}}", axis), axis_value);
            }
            Value::String(rendered)
        }
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|item| substitute(item, cell)).collect())
        }
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .iter()
                .map(|(k, v)| (k.clone(), substitute(v, cell)))
                .collect(),
        ),
        other => other.clone(),
    }
}
