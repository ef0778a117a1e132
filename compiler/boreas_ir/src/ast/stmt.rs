//! Statement and program-unit nodes.
//!
//! Statements live in the arena next to expressions; program units
//! (subroutines, modules) are plain structs holding ranges into it, and a
//! [`SourceFile`] groups the units parsed from one file together with its
//! original path for output-path derivation.

use super::ranges::{ExprRange, KwArgRange, StmtRange};
use crate::{ExprId, Name, StmtId};
use std::path::PathBuf;

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Single comment line, raw source text including the `!` marker.
    Comment { text: Name },

    /// Run of consecutive comment lines.
    ///
    /// Every statement in `comments` is a [`Self::Comment`].
    CommentBlock { comments: StmtRange },

    /// Declaration of one or more symbols.
    ///
    /// `symbols` are `Scalar`/`Array` expressions whose types carry shape,
    /// intent, and initial value. `comment` ([`StmtId::INVALID`] when
    /// absent) is emitted as its own leading line.
    VariableDeclaration { symbols: ExprRange, comment: StmtId },

    /// Use-association of symbols from another module.
    Import { module: Name, symbols: ExprRange },

    /// Verbatim pass-through line.
    Intrinsic { text: Name },

    /// `lhs = rhs`, with an optional trailing comment on the same line.
    Assignment {
        lhs: ExprId,
        rhs: ExprId,
        comment: StmtId,
    },

    /// Counted loop. `bounds` is a `RangeIndex` expression holding start,
    /// stop, and optional step.
    Loop {
        variable: ExprId,
        bounds: ExprId,
        body: StmtRange,
    },

    /// Conditioned loop. An [`ExprId::INVALID`] condition is an infinite
    /// loop guarded only by internal exits.
    WhileLoop { condition: ExprId, body: StmtRange },

    /// If/elseif/else chain.
    ///
    /// `has_elseif` marks that `else_body` holds exactly one nested
    /// [`Self::Conditional`] continuing a flat elseif chain from the
    /// source; code generation keeps the chain flat.
    Conditional {
        condition: ExprId,
        body: StmtRange,
        else_body: StmtRange,
        has_elseif: bool,
    },

    /// Subroutine call in statement position.
    CallStatement {
        name: Name,
        args: ExprRange,
        kwargs: KwArgRange,
    },

    /// Grouping node; formats as its body.
    Section { body: StmtRange },

    /// Single-expression function definition.
    StatementFunction {
        variable: ExprId,
        arguments: ExprRange,
        rhs: ExprId,
    },
}

/// A subroutine program unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Subroutine {
    pub name: Name,
    /// Dummy arguments in declaration order (`Scalar`/`Array` expressions).
    pub arguments: ExprRange,
    /// Leading documentation comments.
    pub docstring: StmtRange,
    /// Declaration section (declarations, imports, interleaved comments).
    pub decls: StmtId,
    /// Executable body section.
    pub body: StmtId,
}

/// A module program unit.
///
/// Carried through the IR so schedulers can see it, but code generation
/// rejects it explicitly rather than emitting guessed content.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub name: Name,
}

/// Top-level program unit of a source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgramUnit {
    Subroutine(Subroutine),
    Module(Module),
}

/// All program units parsed from one source file.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// Original path of the file, when known. Output-path derivation
    /// fails fast without it.
    pub path: Option<PathBuf>,
    pub units: Vec<ProgramUnit>,
}

impl SourceFile {
    /// Source file with no path metadata.
    pub fn new(units: Vec<ProgramUnit>) -> Self {
        SourceFile { path: None, units }
    }

    /// Source file carrying its original path.
    pub fn with_path(path: impl Into<PathBuf>, units: Vec<ProgramUnit>) -> Self {
        SourceFile {
            path: Some(path.into()),
            units,
        }
    }
}
