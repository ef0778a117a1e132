//! AST node definitions: expressions, statements, operators, and the
//! range types addressing the arena's flattened pools.

mod expr;
mod operators;
mod ranges;
mod stmt;

pub use expr::{ExprKind, KwArg};
pub use operators::OpSymbol;
pub use ranges::{ExprRange, KwArgRange, OpRange, StmtRange};
pub use stmt::{Module, ProgramUnit, SourceFile, StmtKind, Subroutine};
