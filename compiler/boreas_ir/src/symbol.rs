//! Symbol identity interning.
//!
//! Two variable references denote the same program entity exactly when
//! their `(name, parent, rank)` keys match. The [`SymbolTable`] maps each
//! distinct key to a stable [`SymbolId`] so that membership tests,
//! deduplication, and substitution maps compare plain integers, independent
//! of allocation order or call site. The declared type of a reference is
//! deliberately *not* part of the key; it rides on each occurrence in the
//! expression arena.

use crate::{InternError, Name};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;

/// Stable handle for a symbol identity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Sentinel for "no symbol", used as the parent of top-level symbols.
    pub const INVALID: SymbolId = SymbolId(u32::MAX);

    /// Create from a table index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        SymbolId(index)
    }

    /// Get the index into the symbol table.
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

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "SymbolId({})", self.0)
        } else {
            write!(f, "SymbolId::INVALID")
        }
    }
}

impl Default for SymbolId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Interning key for a symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolKey {
    /// Base name of the symbol.
    pub name: Name,
    /// Enclosing aggregate for derived-type members, [`SymbolId::INVALID`]
    /// for top-level symbols.
    pub parent: SymbolId,
    /// Subscript arity. 0 for scalars.
    pub rank: u8,
}

impl SymbolKey {
    /// Key for a top-level scalar.
    #[inline]
    pub const fn scalar(name: Name) -> Self {
        SymbolKey {
            name,
            parent: SymbolId::INVALID,
            rank: 0,
        }
    }

    /// Key for a top-level array of the given rank.
    #[inline]
    pub const fn array(name: Name, rank: u8) -> Self {
        SymbolKey {
            name,
            parent: SymbolId::INVALID,
            rank,
        }
    }

    /// Key for a scalar member of an aggregate.
    #[inline]
    pub const fn member(name: Name, parent: SymbolId) -> Self {
        SymbolKey {
            name,
            parent,
            rank: 0,
        }
    }
}

struct SymbolTableInner {
    map: FxHashMap<SymbolKey, u32>,
    symbols: Vec<SymbolKey>,
}

/// Append-only table mapping [`SymbolKey`]s to stable [`SymbolId`]s.
///
/// Interning is idempotent: repeated calls with the same key return the
/// same id. Interior locking makes `&self` interning safe; the table is
/// owned by the compilation session, never process-global.
pub struct SymbolTable {
    inner: RwLock<SymbolTableInner>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        SymbolTable {
            inner: RwLock::new(SymbolTableInner {
                map: FxHashMap::default(),
                symbols: Vec::new(),
            }),
        }
    }

    /// Try to intern a key, returning its [`SymbolId`] or an error on overflow.
    pub fn try_intern(&self, key: SymbolKey) -> Result<SymbolId, InternError> {
        {
            let guard = self.inner.read();
            if let Some(&index) = guard.map.get(&key) {
                return Ok(SymbolId::new(index));
            }
        }

        let mut guard = self.inner.write();

        if let Some(&index) = guard.map.get(&key) {
            return Ok(SymbolId::new(index));
        }

        let index = u32::try_from(guard.symbols.len()).map_err(|_| InternError::Overflow {
            count: guard.symbols.len(),
        })?;
        guard.symbols.push(key);
        guard.map.insert(key, index);
        Ok(SymbolId::new(index))
    }

    /// Intern a key, returning its [`SymbolId`].
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` symbols. Use
    /// [`Self::try_intern`] for fallible interning.
    #[inline]
    pub fn intern(&self, key: SymbolKey) -> SymbolId {
        self.try_intern(key).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the key for a [`SymbolId`].
    ///
    /// # Panics
    /// Panics if `id` was not produced by this table.
    pub fn lookup(&self, id: SymbolId) -> SymbolKey {
        let guard = self.inner.read();
        guard.symbols[id.index()]
    }

    /// Number of distinct symbols interned so far.
    pub fn len(&self) -> usize {
        self.inner.read().symbols.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
