//! Fatal errors and non-fatal warnings raised while resolving a size.

use std::fmt;
use thiserror::Error;

/// Image axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Fatal specification problems found by the validator or the canonicalizer.
///
/// `spec` carries the JSON rendering of the calculation's `original` snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid size: please specify at least width or height (for size {spec})")]
    NoDimension { spec: String },
    #[error("Invalid width '{token}' specified")]
    InvalidWidth { token: String },
    #[error("When using exact sizing, both width and height have to be specified (for size {spec})")]
    ExactNeedsBoth { spec: String },
    #[error("Malformed size '{input}': the separator '{separator}' may appear at most once")]
    MalformedSize { input: String, separator: char },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Scaling stopped after {limit} steps; the function chain does not terminate")]
    NonTermination { limit: usize },
    #[error("Real dimension must be finite and positive, got {width}x{height}")]
    InvalidRealDimension { width: f64, height: f64 },
    #[error("Default size function '{0}' is not registered")]
    UnknownDefault(String),
    #[error("The {axis} is still unresolved after scaling")]
    Unresolved { axis: Axis },
    #[error("The {axis} is not a finite number after scaling")]
    NonFinite { axis: Axis },
    #[error("Size function '{name}' failed: {message}")]
    Step { name: String, message: String },
}

/// Non-fatal problems. Processing continues after each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Height could not be parsed; it is treated as unspecified.
    InvalidHeight { token: String },
    /// A function name is not in the registry; the default runs instead.
    UnknownFunction {
        name: String,
        default: String,
        expected: Vec<String>,
    },
    /// A function reference is neither a name nor a step.
    InvalidFunction {
        kind: &'static str,
        default: String,
        expected: Vec<String>,
    },
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidHeight { token } => write!(f, "Invalid height '{token}' specified"),
            Warning::UnknownFunction {
                name,
                default,
                expected,
            } => write!(
                f,
                "Unknown size function '{name}', using '{default}' instead (expected one of {})",
                quoted(expected)
            ),
            Warning::InvalidFunction {
                kind,
                default,
                expected,
            } => write!(
                f,
                "Invalid {kind} provided as size function, using '{default}' instead \
                 (expected a function or one of {})",
                quoted(expected)
            ),
        }
    }
}
