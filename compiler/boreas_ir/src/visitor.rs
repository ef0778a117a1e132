//! IR visitor.
//!
//! Generic traversal over the arena-allocated IR. Default `visit_*`
//! methods call the free `walk_*` functions, which match exhaustively over
//! the node catalogues: adding a variant without extending the walks is a
//! compile error, so no node kind can be skipped silently.
//!
//! # Example
//!
//! ```text
//! struct CountLiterals {
//!     count: usize,
//! }
//!
//! impl<'ir> Visitor<'ir> for CountLiterals {
//!     fn visit_expr(&mut self, expr: &'ir ExprKind, arena: &'ir ExprArena) {
//!         if matches!(expr, ExprKind::IntLiteral(_) | ExprKind::FloatLiteral { .. }) {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr, arena);
//!     }
//! }
//! ```

use crate::ast::{ExprKind, Module, ProgramUnit, SourceFile, StmtKind, Subroutine};
use crate::{ExprArena, ExprId, StmtId};

/// IR visitor trait.
///
/// Override `visit_*` methods to add behaviour at specific nodes; call the
/// matching `walk_*` function to continue into children. Visitors may
/// mutate their own state; the IR stays immutable.
pub trait Visitor<'ir> {
    /// Visit a source file.
    fn visit_source_file(&mut self, file: &'ir SourceFile, arena: &'ir ExprArena) {
        walk_source_file(self, file, arena);
    }

    /// Visit a subroutine unit.
    fn visit_subroutine(&mut self, routine: &'ir Subroutine, arena: &'ir ExprArena) {
        walk_subroutine(self, routine, arena);
    }

    /// Visit a module unit.
    fn visit_module(&mut self, module: &'ir Module, _arena: &'ir ExprArena) {
        // Module units carry no traversable body.
        let _ = module;
    }

    /// Visit a statement.
    fn visit_stmt(&mut self, stmt: &'ir StmtKind, arena: &'ir ExprArena) {
        walk_stmt(self, stmt, arena);
    }

    /// Visit a statement by id.
    fn visit_stmt_id(&mut self, id: StmtId, arena: &'ir ExprArena) {
        self.visit_stmt(arena.get_stmt(id), arena);
    }

    /// Visit an expression.
    fn visit_expr(&mut self, expr: &'ir ExprKind, arena: &'ir ExprArena) {
        walk_expr(self, expr, arena);
    }

    /// Visit an expression by id.
    fn visit_expr_id(&mut self, id: ExprId, arena: &'ir ExprArena) {
        self.visit_expr(arena.get_expr(id), arena);
    }
}

// Walk Functions
//
// All walks are depth-first, left-to-right: assignment targets before
// right-hand sides, loop variables before bounds before bodies, list
// elements in declaration order.

/// Walk a source file's program units in order.
pub fn walk_source_file<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    file: &'ir SourceFile,
    arena: &'ir ExprArena,
) {
    for unit in &file.units {
        match unit {
            ProgramUnit::Subroutine(routine) => visitor.visit_subroutine(routine, arena),
            ProgramUnit::Module(module) => visitor.visit_module(module, arena),
        }
    }
}

/// Walk a subroutine's docstring, arguments, declarations, and body.
pub fn walk_subroutine<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    routine: &'ir Subroutine,
    arena: &'ir ExprArena,
) {
    for &comment in arena.get_stmt_list(routine.docstring) {
        visitor.visit_stmt_id(comment, arena);
    }
    for &arg in arena.get_expr_list(routine.arguments) {
        visitor.visit_expr_id(arg, arena);
    }
    if routine.decls.is_valid() {
        visitor.visit_stmt_id(routine.decls, arena);
    }
    if routine.body.is_valid() {
        visitor.visit_stmt_id(routine.body, arena);
    }
}

/// Walk a statement's children.
pub fn walk_stmt<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    stmt: &'ir StmtKind,
    arena: &'ir ExprArena,
) {
    match *stmt {
        // Leaf statements
        StmtKind::Comment { .. } | StmtKind::Intrinsic { .. } => {}

        StmtKind::CommentBlock { comments } => {
            for &id in arena.get_stmt_list(comments) {
                visitor.visit_stmt_id(id, arena);
            }
        }

        StmtKind::VariableDeclaration { symbols, comment } => {
            for &id in arena.get_expr_list(symbols) {
                visitor.visit_expr_id(id, arena);
            }
            if comment.is_valid() {
                visitor.visit_stmt_id(comment, arena);
            }
        }

        StmtKind::Import { symbols, .. } => {
            for &id in arena.get_expr_list(symbols) {
                visitor.visit_expr_id(id, arena);
            }
        }

        StmtKind::Assignment { lhs, rhs, comment } => {
            visitor.visit_expr_id(lhs, arena);
            visitor.visit_expr_id(rhs, arena);
            if comment.is_valid() {
                visitor.visit_stmt_id(comment, arena);
            }
        }

        StmtKind::Loop {
            variable,
            bounds,
            body,
        } => {
            visitor.visit_expr_id(variable, arena);
            visitor.visit_expr_id(bounds, arena);
            for &id in arena.get_stmt_list(body) {
                visitor.visit_stmt_id(id, arena);
            }
        }

        StmtKind::WhileLoop { condition, body } => {
            if condition.is_valid() {
                visitor.visit_expr_id(condition, arena);
            }
            for &id in arena.get_stmt_list(body) {
                visitor.visit_stmt_id(id, arena);
            }
        }

        StmtKind::Conditional {
            condition,
            body,
            else_body,
            ..
        } => {
            visitor.visit_expr_id(condition, arena);
            for &id in arena.get_stmt_list(body) {
                visitor.visit_stmt_id(id, arena);
            }
            for &id in arena.get_stmt_list(else_body) {
                visitor.visit_stmt_id(id, arena);
            }
        }

        StmtKind::CallStatement { args, kwargs, .. } => {
            for &id in arena.get_expr_list(args) {
                visitor.visit_expr_id(id, arena);
            }
            for kwarg in arena.get_kwargs(kwargs) {
                visitor.visit_expr_id(kwarg.value, arena);
            }
        }

        StmtKind::Section { body } => {
            for &id in arena.get_stmt_list(body) {
                visitor.visit_stmt_id(id, arena);
            }
        }

        StmtKind::StatementFunction {
            variable,
            arguments,
            rhs,
        } => {
            visitor.visit_expr_id(variable, arena);
            for &id in arena.get_expr_list(arguments) {
                visitor.visit_expr_id(id, arena);
            }
            visitor.visit_expr_id(rhs, arena);
        }
    }
}

/// Walk an expression's children.
pub fn walk_expr<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    expr: &'ir ExprKind,
    arena: &'ir ExprArena,
) {
    match *expr {
        // Leaves
        ExprKind::Scalar { .. }
        | ExprKind::IntLiteral(_)
        | ExprKind::FloatLiteral { .. }
        | ExprKind::LogicLiteral(_)
        | ExprKind::StringLiteral { .. }
        | ExprKind::Index { .. } => {}

        ExprKind::Array { dims, .. } => {
            for &id in arena.get_expr_list(dims) {
                visitor.visit_expr_id(id, arena);
            }
        }

        ExprKind::Op { operands, .. } => {
            for &id in arena.get_expr_list(operands) {
                visitor.visit_expr_id(id, arena);
            }
        }

        ExprKind::InlineCall {
            callee,
            args,
            kwargs,
        } => {
            visitor.visit_expr_id(callee, arena);
            for &id in arena.get_expr_list(args) {
                visitor.visit_expr_id(id, arena);
            }
            for kwarg in arena.get_kwargs(kwargs) {
                visitor.visit_expr_id(kwarg.value, arena);
            }
        }

        ExprKind::Cast { operand, .. } => {
            visitor.visit_expr_id(operand, arena);
        }

        ExprKind::RangeIndex { lower, upper, step } => {
            if lower.is_valid() {
                visitor.visit_expr_id(lower, arena);
            }
            if upper.is_valid() {
                visitor.visit_expr_id(upper, arena);
            }
            if step.is_valid() {
                visitor.visit_expr_id(step, arena);
            }
        }

        ExprKind::StringConcat { parts } => {
            for &id in arena.get_expr_list(parts) {
                visitor.visit_expr_id(id, arena);
            }
        }
    }
}
