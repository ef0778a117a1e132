//! Boreas IR - Intermediate Representation Types
//!
//! This crate contains the core data structures for the Boreas
//! Fortran-to-Python transpiler:
//! - Names for interned identifiers
//! - Symbols and per-symbol type attributes
//! - Expression and statement nodes (`ExprKind`, `StmtKind`)
//! - Arena allocation for the whole tree
//! - Visitors and queries over arena-allocated subtrees
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Symbols → `SymbolId`(u32),
//!   Types → `TypeId`(u32)
//! - **Flatten Everything**: No Box<Expr>, use `ExprId`(u32) indices
//! - **Structural Identity**: Two references to the same variable intern to
//!   the same `SymbolId`; two identical attribute sets intern to the same
//!   `TypeId`
//!
//! Node kinds are plain `Copy` data; anything variable-length lives in an
//! arena side table behind a `{start, len}` range.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod queries;
mod symbol;
mod types;
pub mod visitor;

pub use arena::ExprArena;
pub use ast::{
    ExprKind,
    ExprRange,
    KwArg,
    KwArgRange,
    Module,
    OpRange,
    OpSymbol,
    ProgramUnit,
    SourceFile,
    StmtKind,
    StmtRange,
    Subroutine,
};
pub use expr_id::{ExprId, StmtId};
pub use interner::{InternError, NameInterner};
pub use name::Name;
pub use queries::FindVariables;
pub use symbol::{SymbolId, SymbolKey, SymbolTable};
pub use types::{ElementKind, Intent, SymbolAttributes, TypeId};
