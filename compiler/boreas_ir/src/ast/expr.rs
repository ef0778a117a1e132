//! Expression node catalogue.
//!
//! All children are arena indices, never boxes; sequences are ranges into
//! the arena's flattened pools. Nodes are immutable value objects once
//! allocated: transformation passes replace whole subtrees instead of
//! mutating in place, which keeps structural sharing safe.

use super::ranges::{ExprRange, KwArgRange, OpRange};
use crate::{ExprId, Name, SymbolId, TypeId};

/// A `key=value` pair in a call's keyword-argument list.
///
/// Keyword arguments keep their insertion order through code generation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct KwArg {
    pub name: Name,
    pub value: ExprId,
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Named, unsubscripted value. `ty` is the resolved declared type.
    Scalar { sym: SymbolId, ty: TypeId },

    /// Named value with a subscript/shape expression list.
    ///
    /// `dims` must be non-empty; a zero-rank reference is a [`Self::Scalar`].
    Array {
        sym: SymbolId,
        ty: TypeId,
        dims: ExprRange,
    },

    /// Integer literal: `42`.
    IntLiteral(i64),

    /// Float literal carrying its exact decimal source text (`1.0e-8`)
    /// plus an optional Fortran kind tag (`1.0_jprb`).
    FloatLiteral { text: Name, kind: Option<Name> },

    /// Logical literal: `.true.` / `.false.` in the source.
    LogicLiteral(bool),

    /// Character string literal.
    StringLiteral { text: Name },

    /// Flattened operator chain: `operands[0] ops[0] operands[1] ...`.
    ///
    /// Arity invariant: `ops.len() + 1 == operands.len()`, except the
    /// unary form where both have length 1. `parens` records grouping
    /// written in the source; it must survive code generation verbatim
    /// because it can change floating-point evaluation order.
    Op {
        ops: OpRange,
        operands: ExprRange,
        parens: bool,
    },

    /// Function reference in expression position.
    InlineCall {
        callee: ExprId,
        args: ExprRange,
        kwargs: KwArgRange,
    },

    /// Explicit type conversion; `ty` is the target declared type.
    Cast { ty: TypeId, operand: ExprId },

    /// Named subscript placeholder.
    Index { name: Name },

    /// Subscript range. An [`ExprId::INVALID`] bound means "whole extent";
    /// with all three absent the placeholder renders no subscript text.
    RangeIndex {
        lower: ExprId,
        upper: ExprId,
        step: ExprId,
    },

    /// String concatenation chain (`//` in the source).
    StringConcat { parts: ExprRange },
}

impl ExprKind {
    /// The symbol identity of a variable reference, if this is one.
    #[inline]
    pub const fn symbol(&self) -> Option<SymbolId> {
        match self {
            ExprKind::Scalar { sym, .. } | ExprKind::Array { sym, .. } => Some(*sym),
            _ => None,
        }
    }

    /// The declared type of a variable reference or cast, if any.
    #[inline]
    pub const fn declared_type(&self) -> Option<TypeId> {
        match self {
            ExprKind::Scalar { ty, .. }
            | ExprKind::Array { ty, .. }
            | ExprKind::Cast { ty, .. } => Some(*ty),
            _ => None,
        }
    }

    /// Whether this node is a whole-extent range placeholder.
    #[inline]
    pub const fn is_whole_extent(&self) -> bool {
        matches!(
            self,
            ExprKind::RangeIndex {
                lower: ExprId::INVALID,
                upper: ExprId::INVALID,
                step: ExprId::INVALID,
            }
        )
    }
}
