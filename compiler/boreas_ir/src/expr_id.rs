//! Expression and statement ids for the flat arena.
//!
//! Child links are 4-byte indices instead of boxed pointers: O(1) equality,
//! contiguous storage, and an `INVALID` sentinel where a child is optional
//! (absent range bounds, missing loop conditions, unattached comments).

use std::fmt;

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Invalid expression id (sentinel value).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
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

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Index into the statement arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    /// Invalid statement id (sentinel value).
    pub const INVALID: StmtId = StmtId(u32::MAX);

    /// Create a new `StmtId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    /// Get the index into the arena.
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

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "StmtId({})", self.0)
        } else {
            write!(f, "StmtId::INVALID")
        }
    }
}

impl Default for StmtId {
    fn default() -> Self {
        Self::INVALID
    }
}

// Size assertions to prevent accidental regressions. Ids must stay at
// 4 bytes so node kinds remain cheap Copy values.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, StmtId};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(StmtId, 4);
}
