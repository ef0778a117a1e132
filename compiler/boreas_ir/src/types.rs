//! Declared-type attributes.
//!
//! Every `Scalar`/`Array` occurrence carries a [`TypeId`] resolving to the
//! [`SymbolAttributes`] attached by the external type-resolution pass. The
//! attributes are hash-consed in the arena, so repeated declarations of the
//! same type share one id.

use crate::{ExprId, ExprRange, Name};
use std::fmt;

/// Handle for hash-consed [`SymbolAttributes`] in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Sentinel for "no type attached".
    pub const INVALID: TypeId = TypeId(u32::MAX);

    /// Create from a pool index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Get the index into the type pool.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid id.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "TypeId({})", self.0)
        } else {
            write!(f, "TypeId::INVALID")
        }
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Element kind of a declared type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Logical,
    Integer,
    Real,
    Character,
    /// Aggregate (struct-like) type, by its already-translated name.
    Derived(Name),
}

/// Argument access mode.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    In,
    Out,
    InOut,
}

/// Declared-type attributes of a symbol.
///
/// `shape` holds the declared dimension expressions; an empty range marks
/// the scalar category. Array-category decisions are driven purely by the
/// shape, never by the element kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolAttributes {
    /// Element kind.
    pub dtype: ElementKind,
    /// Precision kind tag (e.g. `real32`), if declared.
    pub kind: Option<Name>,
    /// Declared shape dimensions. Empty for scalars.
    pub shape: ExprRange,
    /// Argument access mode. `None` for local variables.
    pub intent: Option<Intent>,
    /// Explicit initial value, if declared.
    pub initial: Option<ExprId>,
}

impl SymbolAttributes {
    /// Attributes for a plain local of the given element kind.
    pub const fn new(dtype: ElementKind) -> Self {
        SymbolAttributes {
            dtype,
            kind: None,
            shape: ExprRange::EMPTY,
            intent: None,
            initial: None,
        }
    }

    /// Attach a precision kind tag.
    pub const fn with_kind(mut self, kind: Name) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach a declared shape.
    pub const fn with_shape(mut self, shape: ExprRange) -> Self {
        self.shape = shape;
        self
    }

    /// Attach an argument intent.
    pub const fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Attach an explicit initial value.
    pub const fn with_initial(mut self, initial: ExprId) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Whether the symbol is a routine argument (declared with an intent).
    #[inline]
    pub const fn is_argument(&self) -> bool {
        self.intent.is_some()
    }

    /// Whether the symbol is in the array category.
    #[inline]
    pub const fn is_array(&self) -> bool {
        !self.shape.is_empty()
    }
}
