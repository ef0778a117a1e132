//! Mapping from Fortran type attributes to numpy type expressions.

use boreas_ir::{ElementKind, Name, NameInterner, SymbolAttributes};

use crate::error::PyGenError;

/// Returns the Python type expression for a declared symbol.
///
/// Any shaped symbol maps to `np.ndarray` regardless of element kind; the
/// element kinds themselves map to `bool`, `np.int32`, `np.float32` or
/// `np.float64` (`REAL` narrows to 32 bits only for kind `real32`), and
/// derived types map to their own name. Character data has no numpy
/// equivalent and is reported as unrepresentable.
pub fn numpy_type(attrs: SymbolAttributes, names: &NameInterner) -> Result<String, PyGenError> {
    if attrs.is_array() {
        return Ok("np.ndarray".to_string());
    }
    match attrs.dtype {
        ElementKind::Logical => Ok("bool".to_string()),
        ElementKind::Integer => Ok("np.int32".to_string()),
        ElementKind::Real => {
            if is_kind(attrs.kind, "real32", names) {
                Ok("np.float32".to_string())
            } else {
                Ok("np.float64".to_string())
            }
        }
        ElementKind::Derived(name) => Ok(names.lookup(name).to_string()),
        ElementKind::Character => Err(PyGenError::unrepresentable(fortran_type(attrs, names))),
    }
}

fn is_kind(kind: Option<Name>, expected: &str, names: &NameInterner) -> bool {
    kind.is_some_and(|kind| names.lookup(kind) == expected)
}

/// Renders the Fortran-side spelling of a type for error messages.
fn fortran_type(attrs: SymbolAttributes, names: &NameInterner) -> String {
    let base = match attrs.dtype {
        ElementKind::Logical => "LOGICAL",
        ElementKind::Integer => "INTEGER",
        ElementKind::Real => "REAL",
        ElementKind::Character => "CHARACTER",
        ElementKind::Derived(name) => return names.lookup(name).to_string(),
    };
    match attrs.kind {
        Some(kind) => format!("{base}(KIND={})", names.lookup(kind)),
        None => base.to_string(),
    }
}
