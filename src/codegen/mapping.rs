//! Per-language type tables.

use crate::model::{FieldType, Language, Scalar, TypeDescriptor};

/// Emitted in place of a type the vocabulary cannot express.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Maps a supported descriptor to the target language's native type syntax.
#[must_use]
pub fn map_type(ty: TypeDescriptor, language: Language) -> &'static str {
    match language {
        Language::Cpp => cpp(ty),
        Language::JavaScript => javascript(ty),
        Language::Rust => rust(ty),
        Language::Java => java(ty),
    }
}

/// Maps a declared field type, degrading to [`UNKNOWN_TYPE`].
#[must_use]
pub fn map_field_type(ty: &FieldType, language: Language) -> &'static str {
    ty.descriptor().map_or(UNKNOWN_TYPE, |ty| map_type(ty, language))
}

/// Maps a raw vocabulary string, degrading to [`UNKNOWN_TYPE`].
#[must_use]
pub fn map_type_name(name: &str, language: Language) -> &'static str {
    TypeDescriptor::parse(name).map_or(UNKNOWN_TYPE, |ty| map_type(ty, language))
}

/// `float` maps to a 64-bit double everywhere, matching Rust's `f64`.
fn cpp(ty: TypeDescriptor) -> &'static str {
    use Scalar::{Bool, Float, Int, String};
    use TypeDescriptor::{List, Matrix};
    match ty {
        TypeDescriptor::Scalar(Int) => "int",
        TypeDescriptor::Scalar(Float) => "double",
        TypeDescriptor::Scalar(String) => "std::string",
        TypeDescriptor::Scalar(Bool) => "bool",
        List(Int) => "std::vector<int>",
        List(Float) => "std::vector<double>",
        List(String) => "std::vector<std::string>",
        List(Bool) => "std::vector<bool>",
        Matrix(Int) => "std::vector<std::vector<int>>",
        Matrix(Float) => "std::vector<std::vector<double>>",
        Matrix(String) => "std::vector<std::vector<std::string>>",
        Matrix(Bool) => "std::vector<std::vector<bool>>",
    }
}

/// JSDoc type names; JavaScript itself is untyped.
fn javascript(ty: TypeDescriptor) -> &'static str {
    use Scalar::{Bool, Float, Int, String};
    use TypeDescriptor::{List, Matrix};
    match ty {
        TypeDescriptor::Scalar(Int | Float) => "number",
        TypeDescriptor::Scalar(String) => "string",
        TypeDescriptor::Scalar(Bool) => "boolean",
        List(Int | Float) => "number[]",
        List(String) => "string[]",
        List(Bool) => "boolean[]",
        Matrix(Int | Float) => "number[][]",
        Matrix(String) => "string[][]",
        Matrix(Bool) => "boolean[][]",
    }
}

fn rust(ty: TypeDescriptor) -> &'static str {
    use Scalar::{Bool, Float, Int, String};
    use TypeDescriptor::{List, Matrix};
    match ty {
        TypeDescriptor::Scalar(Int) => "i32",
        TypeDescriptor::Scalar(Float) => "f64",
        TypeDescriptor::Scalar(String) => "String",
        TypeDescriptor::Scalar(Bool) => "bool",
        List(Int) => "Vec<i32>",
        List(Float) => "Vec<f64>",
        List(String) => "Vec<String>",
        List(Bool) => "Vec<bool>",
        Matrix(Int) => "Vec<Vec<i32>>",
        Matrix(Float) => "Vec<Vec<f64>>",
        Matrix(String) => "Vec<Vec<String>>",
        Matrix(Bool) => "Vec<Vec<bool>>",
    }
}

fn java(ty: TypeDescriptor) -> &'static str {
    use Scalar::{Bool, Float, Int, String};
    use TypeDescriptor::{List, Matrix};
    match ty {
        TypeDescriptor::Scalar(Int) => "int",
        TypeDescriptor::Scalar(Float) => "double",
        TypeDescriptor::Scalar(String) => "String",
        TypeDescriptor::Scalar(Bool) => "boolean",
        List(Int) => "List<Integer>",
        List(Float) => "List<Double>",
        List(String) => "List<String>",
        List(Bool) => "List<Boolean>",
        Matrix(Int) => "List<List<Integer>>",
        Matrix(Float) => "List<List<Double>>",
        Matrix(String) => "List<List<String>>",
        Matrix(Bool) => "List<List<Boolean>>",
    }
}
