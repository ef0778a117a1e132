//! String interner backing [`Name`] handles.
//!
//! The table is append-only for the life of the owning session: strings are
//! leaked to `'static` so lookups hand out references without holding the
//! lock. Interior locking makes `&self` interning safe to share; callers
//! that want cross-thread sharing wrap the interner explicitly.

use crate::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Error when an intern table runs out of handle space.
///
/// Shared by [`NameInterner`] and [`SymbolTable`](crate::SymbolTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// The table exceeded `u32::MAX` distinct entries.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "intern table exceeded capacity: {count} entries, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

struct InternerInner {
    /// Map from string content to table index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for interned strings.
    strings: Vec<&'static str>,
}

/// Append-only string interner.
///
/// Provides O(1) lookup and equality for interned strings. Index 0 is the
/// pre-interned empty string ([`Name::EMPTY`]).
pub struct NameInterner {
    inner: RwLock<InternerInner>,
}

impl NameInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        NameInterner {
            inner: RwLock::new(InternerInner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Try to intern a string, returning its [`Name`] or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned.
        {
            let guard = self.inner.read();
            if let Some(&index) = guard.map.get(s) {
                return Ok(Name::from_raw(index));
            }
        }

        let mut guard = self.inner.write();

        // Double-check after acquiring the write lock.
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        // Leak the string to get a 'static lifetime.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` strings. Use [`Self::try_intern`]
    /// for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a [`Name`].
    ///
    /// Interned strings are never deallocated, so the reference is `'static`.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.inner.read();
        guard.strings[name.index()]
    }

    /// Number of interned strings (including the empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check whether only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}
