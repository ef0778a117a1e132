//! Arena allocation for the flat IR.
//!
//! One arena per compilation unit owns every expression and statement node
//! plus the flattened side pools their ranges address. Declared-type
//! attributes are hash-consed so repeated declarations share a [`TypeId`].
//! The arena is built by a single owner (`&mut` allocation) and read
//! shared; it is discarded wholesale with the unit.

use crate::ast::{ExprKind, ExprRange, KwArg, KwArgRange, OpRange, OpSymbol, StmtKind, StmtRange};
use crate::{ExprId, StmtId, SymbolAttributes, TypeId};
use rustc_hash::FxHashMap;

/// Contiguous storage for all IR nodes of one compilation unit.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<ExprKind>,

    /// Flattened expression lists (operands, subscripts, argument lists).
    expr_lists: Vec<ExprId>,

    /// Flattened operator chains.
    ops: Vec<OpSymbol>,

    /// Flattened keyword-argument lists.
    kwargs: Vec<KwArg>,

    /// All statements (indexed by `StmtId`).
    stmts: Vec<StmtKind>,

    /// Flattened statement lists (bodies, sections, comment blocks).
    stmt_lists: Vec<StmtId>,

    /// Hash-consed declared-type attributes (indexed by `TypeId`).
    types: Vec<SymbolAttributes>,

    /// Dedup map for [`Self::intern_type`].
    type_dedup: FxHashMap<SymbolAttributes, TypeId>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expression allocation =====

    /// Allocate an expression, returning its id.
    #[inline]
    pub fn alloc_expr(&mut self, expr: ExprKind) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()]
    }

    /// Number of allocated expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate an expression list, returning its range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(exprs);
        let len = (self.expr_lists.len() as u32 - start) as u16;
        ExprRange::new(start, len)
    }

    /// Get an expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // ===== Operator chains =====

    /// Allocate an operator chain, returning its range.
    pub fn alloc_ops(&mut self, ops: impl IntoIterator<Item = OpSymbol>) -> OpRange {
        let start = self.ops.len() as u32;
        self.ops.extend(ops);
        let len = (self.ops.len() as u32 - start) as u16;
        OpRange::new(start, len)
    }

    /// Get an operator chain by range.
    #[inline]
    pub fn get_ops(&self, range: OpRange) -> &[OpSymbol] {
        let start = range.start as usize;
        &self.ops[start..start + range.len()]
    }

    // ===== Keyword arguments =====

    /// Allocate a keyword-argument list, returning its range.
    pub fn alloc_kwargs(&mut self, kwargs: impl IntoIterator<Item = KwArg>) -> KwArgRange {
        let start = self.kwargs.len() as u32;
        self.kwargs.extend(kwargs);
        let len = (self.kwargs.len() as u32 - start) as u16;
        KwArgRange::new(start, len)
    }

    /// Get a keyword-argument list by range.
    #[inline]
    pub fn get_kwargs(&self, range: KwArgRange) -> &[KwArg] {
        let start = range.start as usize;
        &self.kwargs[start..start + range.len()]
    }

    // ===== Statement allocation =====

    /// Allocate a statement, returning its id.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: StmtKind) -> StmtId {
        let id = StmtId::new(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    /// Get a statement by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &StmtKind {
        &self.stmts[id.index()]
    }

    /// Allocate a statement list, returning its range.
    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = self.stmt_lists.len() as u32;
        self.stmt_lists.extend(stmts);
        let len = (self.stmt_lists.len() as u32 - start) as u16;
        StmtRange::new(start, len)
    }

    /// Get a statement list by range.
    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    // ===== Declared types =====

    /// Intern declared-type attributes, returning a stable [`TypeId`].
    ///
    /// Equal attributes always return the same id.
    pub fn intern_type(&mut self, attrs: SymbolAttributes) -> TypeId {
        if let Some(&id) = self.type_dedup.get(&attrs) {
            return id;
        }
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(attrs);
        self.type_dedup.insert(attrs, id);
        id
    }

    /// Get declared-type attributes by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_type(&self, id: TypeId) -> SymbolAttributes {
        self.types[id.index()]
    }
}
