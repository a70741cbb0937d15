//! The closed vocabulary of value types a problem signature may use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskforgeError;

/// Element types that may appear on their own or inside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// 32-bit signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Whitespace-free token inside lists, whole line as a scalar.
    String,
    /// `true` / `false`.
    Bool,
}

impl Scalar {
    /// All scalar kinds in vocabulary order.
    pub const ALL: [Scalar; 4] = [Scalar::Int, Scalar::Float, Scalar::String, Scalar::Bool];

    /// Canonical vocabulary name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Int => "int",
            Scalar::Float => "float",
            Scalar::String => "string",
            Scalar::Bool => "bool",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scalar| scalar.name() == name)
    }
}

/// A supported value type. Nesting depth is at most two by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A single value.
    Scalar(Scalar),
    /// `list<T>`: a length-prefixed sequence of scalars.
    List(Scalar),
    /// `list<list<T>>`: a sequence of length-prefixed rows.
    Matrix(Scalar),
}

impl TypeDescriptor {
    /// Every representable descriptor (12 in total).
    #[must_use]
    pub fn all() -> Vec<TypeDescriptor> {
        Scalar::ALL
            .into_iter()
            .flat_map(|s| [Self::Scalar(s), Self::List(s), Self::Matrix(s)])
            .collect()
    }

    /// Parses a vocabulary string such as `list<int>`. Whitespace is ignored.
    ///
    /// Returns `None` for anything outside the vocabulary, including deeper nesting.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let compact = compact.to_ascii_lowercase();
        if let Some(inner) = unwrap_list(&compact) {
            if let Some(element) = unwrap_list(inner) {
                return Scalar::from_name(element).map(Self::Matrix);
            }
            return Scalar::from_name(inner).map(Self::List);
        }
        Scalar::from_name(&compact).map(Self::Scalar)
    }

    /// The element scalar regardless of nesting.
    #[must_use]
    pub fn element(self) -> Scalar {
        match self {
            Self::Scalar(s) | Self::List(s) | Self::Matrix(s) => s,
        }
    }
}

fn unwrap_list(text: &str) -> Option<&str> {
    text.strip_prefix("list<").and_then(|rest| rest.strip_suffix('>'))
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => f.write_str(s.name()),
            Self::List(s) => write!(f, "list<{}>", s.name()),
            Self::Matrix(s) => write!(f, "list<list<{}>>", s.name()),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = TaskforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaskforgeError::UnsupportedType {
            field: String::new(),
            type_name: s.to_string(),
        })
    }
}

/// The declared type of a field as authored.
///
/// Type strings outside the vocabulary are kept verbatim so that a problem
/// file round-trips; code generation maps them to the `"unknown"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// A type from the supported vocabulary.
    Known(TypeDescriptor),
    /// Anything else, preserved as written.
    Unsupported(String),
}

impl FieldType {
    /// The supported descriptor, if any.
    #[must_use]
    pub fn descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            Self::Known(ty) => Some(*ty),
            Self::Unsupported(_) => None,
        }
    }
}

impl From<TypeDescriptor> for FieldType {
    fn from(ty: TypeDescriptor) -> Self {
        Self::Known(ty)
    }
}

impl From<String> for FieldType {
    fn from(text: String) -> Self {
        TypeDescriptor::parse(&text).map_or(Self::Unsupported(text), Self::Known)
    }
}

impl From<&str> for FieldType {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(ty) => ty.fmt(f),
            Self::Unsupported(text) => f.write_str(text),
        }
    }
}
