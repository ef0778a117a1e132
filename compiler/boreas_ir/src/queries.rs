//! Tree queries over the IR.
//!
//! Queries are visitors with a collection policy. They borrow the arena
//! for the duration of the walk and hand back plain `Vec`s of node ids,
//! so results stay valid after the query value is dropped.

use rustc_hash::FxHashSet;

use crate::visitor::{walk_expr, Visitor};
use crate::{ExprArena, ExprId, SymbolId};

/// Collects variable references (scalars and array accesses) from a
/// subtree in traversal order.
///
/// Two collection policies:
///
/// * [`FindVariables::unique`] keeps the first reference to each symbol
///   and drops later ones.
/// * [`FindVariables::all_occurrences`] keeps every reference.
///
/// Array subscripts are traversed, so `y(i)` yields both the access and
/// the index variable. The set of seen symbols is maintained under both
/// policies and can be probed with [`FindVariables::contains`].
#[derive(Debug)]
pub struct FindVariables {
    unique: bool,
    seen: FxHashSet<SymbolId>,
    variables: Vec<ExprId>,
}

impl FindVariables {
    /// Query that records the first reference per symbol.
    #[must_use]
    pub fn unique() -> Self {
        Self {
            unique: true,
            seen: FxHashSet::default(),
            variables: Vec::new(),
        }
    }

    /// Query that records every reference.
    #[must_use]
    pub fn all_occurrences() -> Self {
        Self {
            unique: false,
            seen: FxHashSet::default(),
            variables: Vec::new(),
        }
    }

    /// Collected references, in traversal order.
    #[must_use]
    pub fn variables(&self) -> &[ExprId] {
        &self.variables
    }

    /// Consumes the query and returns the collected references.
    #[must_use]
    pub fn into_variables(self) -> Vec<ExprId> {
        self.variables
    }

    /// Whether any reference to `sym` was walked, under either policy.
    #[must_use]
    pub fn contains(&self, sym: SymbolId) -> bool {
        self.seen.contains(&sym)
    }

    /// Number of collected references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<'ir> Visitor<'ir> for FindVariables {
    fn visit_expr_id(&mut self, id: ExprId, arena: &'ir ExprArena) {
        let expr = arena.get_expr(id);
        if let Some(sym) = expr.symbol() {
            // `insert` returns false once the symbol is known; later
            // references survive only under the all-occurrences policy.
            if self.seen.insert(sym) || !self.unique {
                self.variables.push(id);
            }
        }
        walk_expr(self, expr, arena);
    }
}
