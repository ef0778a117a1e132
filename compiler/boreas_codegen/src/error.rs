//! Code generation error types.
//!
//! Generation is fallible: the IR can hold declarations and program units
//! that have no Python rendering. Errors carry enough context to name the
//! offending construct without a source location, since generated output
//! has no spans to point at.

use thiserror::Error;

/// An error produced while lowering IR to Python source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PyGenError {
    /// A declared type has no numpy equivalent.
    #[error("no Python type equivalent for `{dtype}`")]
    UnrepresentableType { dtype: String },

    /// The construct exists in the IR but the Python backend cannot
    /// express it.
    #[error("cannot generate Python for {construct}")]
    NotImplemented { construct: &'static str },
}

impl PyGenError {
    /// Creates an unrepresentable-type error.
    pub fn unrepresentable(dtype: impl Into<String>) -> Self {
        PyGenError::UnrepresentableType {
            dtype: dtype.into(),
        }
    }
}
