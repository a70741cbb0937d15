//! Problem signature types and their validation.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::reserved::is_reserved;
use super::type_descriptor::FieldType;
use crate::error::{TaskforgeError, TaskforgeResult};

/// Algorithmic difficulty shown to solvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry level.
    #[default]
    #[serde(alias = "Easy", alias = "EASY")]
    Easy,
    /// Intermediate.
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    /// Advanced.
    #[serde(alias = "Hard", alias = "HARD")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// One named, typed parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Identifier used in generated code.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: FieldType,
}

impl FieldSpec {
    /// Builds a field from a name and anything convertible to a [`FieldType`].
    pub fn new(name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

/// How validation treats type strings outside the vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypePolicy {
    /// Accept them; generation emits the `"unknown"` sentinel and the
    /// generated program fails to compile at judge time.
    #[default]
    Sentinel,
    /// Reject them with [`TaskforgeError::UnsupportedType`].
    Reject,
}

/// The abstract function signature a problem is built around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpec {
    /// Title of the task.
    pub task_name: String,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Problem statement (markdown).
    #[serde(default)]
    pub description: String,
    /// Name of the function solvers implement.
    pub function_name: String,
    /// Parameters, in call and serialization order.
    #[serde(default)]
    pub inputs: Vec<FieldSpec>,
    /// Results; exactly one is supported.
    #[serde(default)]
    pub outputs: Vec<FieldSpec>,
}

impl ProblemSpec {
    /// The single output field, if present.
    #[must_use]
    pub fn output(&self) -> Option<&FieldSpec> {
        self.outputs.first()
    }

    /// Checks every precondition code generation relies on.
    ///
    /// # Errors
    ///
    /// Returns [`TaskforgeError::UnsupportedType`] for the first unsupported
    /// field type under [`TypePolicy::Reject`], otherwise
    /// [`TaskforgeError::InvalidProblem`] listing every failed check.
    pub fn validate(&self, policy: TypePolicy) -> TaskforgeResult<()> {
        let mut problems = Vec::new();

        if self.task_name.trim().is_empty() {
            problems.push("task name is empty".to_string());
        }
        if self.description.trim().is_empty() {
            problems.push("description is empty".to_string());
        }
        if self.function_name.trim().is_empty() {
            problems.push("function name is empty".to_string());
        } else if !is_identifier(&self.function_name) {
            problems.push(format!("function name `{}` is not an identifier", self.function_name));
        } else if is_reserved(&self.function_name) {
            problems.push(format!(
                "function name `{}` is reserved by the generated programs",
                self.function_name
            ));
        }

        let mut seen = HashSet::new();
        for (i, field) in self.inputs.iter().enumerate() {
            check_field_name("input", i, field, &mut problems);
            if is_reserved(&field.name) {
                problems.push(format!("input {} uses reserved name `{}`", i + 1, field.name));
            } else if field.name == self.function_name {
                problems.push(format!("input {} shadows the function name `{}`", i + 1, field.name));
            }
            if !field.name.is_empty() && !seen.insert(field.name.as_str()) {
                problems.push(format!("input name `{}` is declared more than once", field.name));
            }
        }

        if self.outputs.len() != 1 {
            problems.push(format!("exactly one output is required, found {}", self.outputs.len()));
        }
        for (i, field) in self.outputs.iter().enumerate() {
            check_field_name("output", i, field, &mut problems);
        }

        if policy == TypePolicy::Reject {
            if let Some(field) = self
                .inputs
                .iter()
                .chain(&self.outputs)
                .find(|field| field.ty.descriptor().is_none())
            {
                return Err(TaskforgeError::UnsupportedType {
                    field: field.name.clone(),
                    type_name: field.ty.to_string(),
                });
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TaskforgeError::InvalidProblem { problems })
        }
    }
}

fn check_field_name(kind: &str, index: usize, field: &FieldSpec, problems: &mut Vec<String>) {
    if field.name.trim().is_empty() {
        problems.push(format!("{kind} {} has no name", index + 1));
    } else if !is_identifier(&field.name) {
        problems.push(format!("{kind} {} name `{}` is not an identifier", index + 1, field.name));
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
