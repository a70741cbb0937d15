//! Type-directed code generation.
//!
//! Two independent modes share the type tables in [`mapping`]:
//!
//! - [`generate_stub`] emits the bare function a solver fills in.
//! - [`generate_full_program`] emits a complete program that reads the
//!   line-oriented input protocol from stdin, calls the solver's function and
//!   prints the result. The solver's code is spliced in at [`USER_CODE_MARKER`].
//!
//! Input protocol, shared by every language:
//!
//! ```text
//! scalar            one line
//! list<T>           count line, then one line of space-separated elements
//! list<list<T>>     row-count line, then per row: count line + elements line
//! ```
//!
//! Generation never fails. Callers validate the [`ProblemSpec`] first; a type
//! outside the vocabulary is emitted as `"unknown"` and surfaces as a compile
//! error in the generated program.

mod cpp;
mod java;
mod javascript;
pub mod mapping;
mod rust;
mod source;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{FieldSpec, Language, ProblemSpec, TypeDescriptor};

pub use mapping::{map_field_type, map_type, map_type_name, UNKNOWN_TYPE};

/// Placeholder replaced by the solver's code before submission.
pub const USER_CODE_MARKER: &str = "##USER_CODE_HERE##";

/// Generated sources for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageArtifacts {
    /// The bare function declaration.
    pub stub: String,
    /// The complete program containing [`USER_CODE_MARKER`] once.
    pub full_program: String,
}

/// Stub and full program for every supported language.
///
/// Always produced as a whole from one [`ProblemSpec`]; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoilerplateSet {
    artifacts: BTreeMap<Language, LanguageArtifacts>,
}

impl BoilerplateSet {
    /// Artifacts for one language.
    ///
    /// # Panics
    ///
    /// Never: the set is built for every [`Language`] variant.
    #[must_use]
    pub fn get(&self, language: Language) -> &LanguageArtifacts {
        &self.artifacts[&language]
    }

    /// Iterates in [`Language`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, &LanguageArtifacts)> {
        self.artifacts.iter().map(|(language, artifacts)| (*language, artifacts))
    }
}

/// Generates the complete boilerplate set for a problem.
#[must_use]
pub fn generate_boilerplate(spec: &ProblemSpec) -> BoilerplateSet {
    let artifacts = Language::ALL
        .into_iter()
        .map(|language| {
            let artifacts = LanguageArtifacts {
                stub: generate_stub(spec, language),
                full_program: generate_full_program(spec, language),
            };
            (language, artifacts)
        })
        .collect();
    BoilerplateSet { artifacts }
}

/// Emits the function declaration with a placeholder body.
#[must_use]
pub fn generate_stub(spec: &ProblemSpec, language: Language) -> String {
    match language {
        Language::Cpp => cpp::stub(spec),
        Language::JavaScript => javascript::stub(spec),
        Language::Rust => rust::stub(spec),
        Language::Java => java::stub(spec),
    }
}

/// Emits a complete program with input parsing, the call and output printing.
#[must_use]
pub fn generate_full_program(spec: &ProblemSpec, language: Language) -> String {
    match language {
        Language::Cpp => cpp::full_program(spec),
        Language::JavaScript => javascript::full_program(spec),
        Language::Rust => rust::full_program(spec),
        Language::Java => java::full_program(spec),
    }
}

/// Declared output descriptor; `None` when missing or unsupported.
fn output_descriptor(spec: &ProblemSpec) -> Option<TypeDescriptor> {
    spec.output().and_then(|field| field.ty.descriptor())
}

fn return_type(spec: &ProblemSpec, language: Language) -> &'static str {
    spec.output().map_or(UNKNOWN_TYPE, |field| map_field_type(&field.ty, language))
}

fn call_arguments(inputs: &[FieldSpec]) -> String {
    inputs.iter().map(|field| field.name.as_str()).collect::<Vec<_>>().join(", ")
}
