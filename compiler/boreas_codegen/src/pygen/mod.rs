//! Python code generation from IR statements and program units.
//!
//! A recursive-descent emitter over arena-allocated statements. Each
//! generation call owns its indentation depth and line-width state, so
//! separate calls can run over different trees without sharing anything.
//! Expression rendering is delegated to [`PyExprMapper`].
//!
//! Fortran loop bounds are inclusive with a default step of one; the
//! emitted `range(...)` calls shift the upper bound to compensate.
//! Scalar out-arguments disappear from signatures and come back through
//! a synthesized trailing `return`.

use boreas_ir::{
    ElementKind, ExprArena, ExprId, ExprKind, ExprRange, Intent, KwArgRange, Name, NameInterner,
    ProgramUnit, SourceFile, StmtId, StmtKind, StmtRange, Subroutine, SymbolTable,
};
use smallvec::SmallVec;

use crate::emitter::{Emitter, StringEmitter};
use crate::error::PyGenError;
use crate::mapper::PyExprMapper;
use crate::types::numpy_type;

/// Comment prefix marking annotation directives that pass through into
/// the generated output. Checked after marker translation.
const GT4PY_SENTINEL: &str = "#->gt4py";

/// Imports emitted at the top of every generated routine.
const STANDARD_IMPORTS: &[&str] = &["numpy as np"];

/// Fixed header lines for the gt4py backend, emitted before everything
/// else and never indented.
const GT4PY_HEADER: &[&str] = &[
    "# -*- coding: utf-8 -*-",
    "from __future__ import annotations",
    "from gt4py.cartesian.gtscript import Field, IJ, K",
];

const GT4PY_STENCIL_IMPORT: &str =
    "from ifs_physics_common.framework.stencil import stencil_collection";

/// Output dialect for generated Python.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PyBackend {
    /// Plain Python with numpy arrays.
    #[default]
    Numpy,
    /// gt4py stencil Python with the stencil-collection decorator.
    Gt4py,
}

/// Configuration for one generation call.
#[derive(Debug, Clone)]
pub struct PyGenConfig {
    /// Indent unit applied per nesting level.
    pub indent: String,
    /// Maximum line width before wrapping at segment boundaries.
    /// Zero disables wrapping.
    pub max_width: usize,
    /// Output dialect.
    pub backend: PyBackend,
}

impl Default for PyGenConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            max_width: 100,
            backend: PyBackend::Numpy,
        }
    }
}

/// Tree visitor generating Python source from IR.
///
/// Generic over the output [`Emitter`]; the common case writes into a
/// [`StringEmitter`] and hands the text back through [`PyCodegen::finish`].
pub struct PyCodegen<'ir, E = StringEmitter> {
    arena: &'ir ExprArena,
    names: &'ir NameInterner,
    mapper: PyExprMapper<'ir>,
    config: PyGenConfig,
    emitter: E,
    depth: usize,
}

impl<'ir> PyCodegen<'ir, StringEmitter> {
    /// Creates a generator writing into an in-memory string.
    pub fn new(
        arena: &'ir ExprArena,
        names: &'ir NameInterner,
        symbols: &'ir SymbolTable,
        config: PyGenConfig,
    ) -> Self {
        Self::with_emitter(arena, names, symbols, config, StringEmitter::new())
    }

    /// Finishes generation and returns the output.
    ///
    /// Non-empty output always carries a trailing newline.
    pub fn finish(mut self) -> String {
        if !self.emitter.is_empty() {
            self.emitter.ensure_trailing_newline();
        }
        self.emitter.output()
    }
}

impl<'ir, E: Emitter> PyCodegen<'ir, E> {
    /// Creates a generator writing into the given emitter.
    pub fn with_emitter(
        arena: &'ir ExprArena,
        names: &'ir NameInterner,
        symbols: &'ir SymbolTable,
        config: PyGenConfig,
        emitter: E,
    ) -> Self {
        Self {
            arena,
            names,
            mapper: PyExprMapper::new(arena, names, symbols),
            config,
            emitter,
            depth: 0,
        }
    }

    /// Consumes the generator and hands back its emitter.
    pub fn into_emitter(self) -> E {
        self.emitter
    }

    /// Starts generation at the given indentation depth.
    ///
    /// Useful when the output is spliced into an enclosing block.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Emits every program unit of a source file in order.
    pub fn emit_source_file(&mut self, file: &SourceFile) -> Result<(), PyGenError> {
        for unit in &file.units {
            match unit {
                ProgramUnit::Subroutine(routine) => self.emit_subroutine(routine)?,
                ProgramUnit::Module(module) => {
                    tracing::debug!(
                        name = self.names.lookup(module.name),
                        "module units have no Python rendering"
                    );
                    return Err(PyGenError::NotImplemented {
                        construct: "module program units",
                    });
                }
            }
        }
        Ok(())
    }

    /// Emits a routine as a Python function definition.
    ///
    /// Scalar out-arguments leave the parameter list and return instead;
    /// scalar inout-arguments stay and are returned as well. Array and
    /// derived-type arguments always stay parameters.
    pub fn emit_subroutine(&mut self, routine: &Subroutine) -> Result<(), PyGenError> {
        let name = self.names.lookup(routine.name);

        if self.config.backend == PyBackend::Gt4py {
            for line in GT4PY_HEADER {
                self.push_raw_line(line);
            }
        }
        for import in STANDARD_IMPORTS {
            self.push_line(&["import ", import]);
        }
        if self.config.backend == PyBackend::Gt4py {
            self.push_raw_line(GT4PY_STENCIL_IMPORT);
            let decorator = format!("@stencil_collection(\"{}\")", name.to_lowercase());
            self.push_raw_line(&decorator);
        }

        let mut params: SmallVec<[String; 8]> = SmallVec::new();
        let mut returns: SmallVec<[String; 4]> = SmallVec::new();
        let mut out_returns: SmallVec<[String; 4]> = SmallVec::new();
        for &arg in self.arena.get_expr_list(routine.arguments) {
            let expr = self.arena.get_expr(arg);
            let (Some(sym), Some(ty)) = (expr.symbol(), expr.declared_type()) else {
                continue;
            };
            let path = self.mapper.symbol_path(sym);
            let attrs = self.arena.get_type(ty);
            let is_scalar = matches!(expr, ExprKind::Scalar { .. });

            if is_scalar && attrs.intent == Some(Intent::Out) {
                out_returns.push(path);
                continue;
            }
            if is_scalar && attrs.intent == Some(Intent::InOut) {
                returns.push(path.clone());
            }
            // Derived-type parameters are passed by name, unannotated.
            if matches!(attrs.dtype, ElementKind::Derived(_)) {
                params.push(path);
            } else {
                let annotation = numpy_type(attrs, self.names)?;
                params.push(format!("{path}: {annotation}"));
            }
        }
        returns.extend(out_returns);

        let signature = params.join(", ");
        self.push_line(&["def ", name, "(", &signature, "):"]);

        self.depth += 1;
        for &comment in self.arena.get_stmt_list(routine.docstring) {
            self.emit_stmt(comment)?;
        }
        if routine.decls.is_valid() {
            self.emit_stmt(routine.decls)?;
        }
        if routine.body.is_valid() {
            self.emit_stmt(routine.body)?;
        }
        if !returns.is_empty() {
            let values = returns.join(", ");
            self.push_line(&["return ", &values]);
        }
        self.depth -= 1;
        Ok(())
    }

    /// Emits a single statement.
    pub fn emit_stmt(&mut self, id: StmtId) -> Result<(), PyGenError> {
        match *self.arena.get_stmt(id) {
            StmtKind::Comment { text } => {
                let line = translate_comment(self.names.lookup(text));
                self.push_line_no_wrap(&line);
                Ok(())
            }
            StmtKind::CommentBlock { comments } => {
                for &comment in self.arena.get_stmt_list(comments) {
                    self.emit_stmt(comment)?;
                }
                Ok(())
            }
            StmtKind::VariableDeclaration { symbols, comment } => {
                self.emit_declaration(symbols, comment)
            }
            StmtKind::Import { module, .. } => {
                // Import forwarding into generated Python is not resolved;
                // surfaced here instead of silently vanishing.
                tracing::debug!(
                    module = self.names.lookup(module),
                    "import dropped from generated Python"
                );
                Ok(())
            }
            StmtKind::Intrinsic { text } => {
                let text = self.names.lookup(text).trim_start();
                self.push_line(&[text]);
                Ok(())
            }
            StmtKind::Assignment { lhs, rhs, comment } => self.emit_assignment(lhs, rhs, comment),
            StmtKind::Loop {
                variable,
                bounds,
                body,
            } => self.emit_loop(variable, bounds, body),
            StmtKind::WhileLoop { condition, body } => self.emit_while(condition, body),
            StmtKind::Conditional {
                condition,
                body,
                else_body,
                has_elseif,
            } => self.emit_conditional(condition, body, else_body, has_elseif, false),
            StmtKind::CallStatement { name, args, kwargs } => self.emit_call(name, args, kwargs),
            StmtKind::Section { body } => {
                for &stmt in self.arena.get_stmt_list(body) {
                    self.emit_stmt(stmt)?;
                }
                Ok(())
            }
            StmtKind::StatementFunction {
                variable,
                arguments,
                rhs,
            } => self.emit_statement_function(variable, arguments, rhs),
        }
    }

    /// Emits at most one line per declared symbol.
    ///
    /// An explicit initial value always wins; otherwise local arrays get a
    /// numpy allocation shaped by their dimensions; everything else
    /// (arguments, plain scalars) declares nothing.
    fn emit_declaration(&mut self, symbols: ExprRange, comment: StmtId) -> Result<(), PyGenError> {
        if comment.is_valid() {
            self.emit_stmt(comment)?;
        }
        for &decl in self.arena.get_expr_list(symbols) {
            let expr = self.arena.get_expr(decl);
            let (Some(sym), Some(ty)) = (expr.symbol(), expr.declared_type()) else {
                continue;
            };
            let attrs = self.arena.get_type(ty);
            let name = self.mapper.symbol_path(sym);

            if let Some(initial) = attrs.initial {
                let value = self.mapper.map(initial)?;
                self.push_line(&[&name, " = ", &value]);
            } else if let ExprKind::Array { dims, .. } = *expr {
                if attrs.intent.is_none() {
                    let mut rendered: SmallVec<[String; 4]> = SmallVec::new();
                    for &dim in self.arena.get_expr_list(dims) {
                        rendered.push(self.mapper.map(dim)?);
                    }
                    let shape = rendered.join(", ");
                    self.push_line(&[&name, " = np.ndarray(order=\"F\", shape=(", &shape, ",))"]);
                }
            }
        }
        Ok(())
    }

    fn emit_assignment(
        &mut self,
        lhs: ExprId,
        rhs: ExprId,
        comment: StmtId,
    ) -> Result<(), PyGenError> {
        let lhs = self.mapper.map(lhs)?;
        let rhs = self.mapper.map(rhs)?;
        let suffix = if comment.is_valid() {
            match *self.arena.get_stmt(comment) {
                StmtKind::Comment { text } => Some(translate_comment(self.names.lookup(text))),
                _ => None,
            }
        } else {
            None
        };
        match suffix {
            Some(comment) => self.push_line(&[&lhs, " = ", &rhs, "  ", &comment]),
            None => self.push_line(&[&lhs, " = ", &rhs]),
        }
        Ok(())
    }

    /// Emits a counted loop as iteration over an explicit `range(...)`.
    ///
    /// The source bounds are inclusive, so the emitted stop is shifted by
    /// the step (or by one when the step is implied).
    fn emit_loop(
        &mut self,
        variable: ExprId,
        bounds: ExprId,
        body: StmtRange,
    ) -> Result<(), PyGenError> {
        let ExprKind::RangeIndex { lower, upper, step } = *self.arena.get_expr(bounds) else {
            return Err(PyGenError::NotImplemented {
                construct: "loops without explicit range bounds",
            });
        };
        if !lower.is_valid() || !upper.is_valid() {
            return Err(PyGenError::NotImplemented {
                construct: "loop ranges with implied bounds",
            });
        }
        let var = self.mapper.map(variable)?;
        let start = self.mapper.map(lower)?;
        let stop = self.mapper.map(upper)?;
        let control = if step.is_valid() {
            let incr = self.mapper.map(step)?;
            format!("range({start}, {stop} + {incr}, {incr})")
        } else {
            format!("range({start}, {stop} + 1)")
        };
        self.push_line(&["for ", &var, " in ", &control, ":"]);
        self.emit_block(body)
    }

    fn emit_while(&mut self, condition: ExprId, body: StmtRange) -> Result<(), PyGenError> {
        let guard = if condition.is_valid() {
            self.mapper.map(condition)?
        } else {
            "True".to_string()
        };
        self.push_line(&["while ", &guard, ":"]);
        self.emit_block(body)
    }

    /// Emits an if/elif/else chain flat, never nested.
    ///
    /// A conditional marked as carrying an elseif holds the next link of
    /// the chain in its else branch; that link renders as `elif` at the
    /// same indent level as the original `if`.
    fn emit_conditional(
        &mut self,
        condition: ExprId,
        body: StmtRange,
        else_body: StmtRange,
        has_elseif: bool,
        is_elseif: bool,
    ) -> Result<(), PyGenError> {
        let keyword = if is_elseif { "elif" } else { "if" };
        let cond = self.mapper.map(condition)?;
        self.push_line(&[keyword, " ", &cond, ":"]);
        self.emit_block(body)?;

        if has_elseif {
            for &stmt in self.arena.get_stmt_list(else_body) {
                match *self.arena.get_stmt(stmt) {
                    StmtKind::Conditional {
                        condition,
                        body,
                        else_body,
                        has_elseif,
                    } => self.emit_conditional(condition, body, else_body, has_elseif, true)?,
                    _ => self.emit_stmt(stmt)?,
                }
            }
        } else if !else_body.is_empty() {
            self.push_line(&["else:"]);
            self.emit_block(else_body)?;
        }
        Ok(())
    }

    fn emit_call(
        &mut self,
        name: Name,
        args: ExprRange,
        kwargs: KwArgRange,
    ) -> Result<(), PyGenError> {
        let mut items: SmallVec<[String; 8]> = SmallVec::new();
        for &arg in self.arena.get_expr_list(args) {
            items.push(self.mapper.map(arg)?);
        }
        for kwarg in self.arena.get_kwargs(kwargs) {
            let value = self.mapper.map(kwarg.value)?;
            items.push(format!("{}={value}", self.names.lookup(kwarg.name)));
        }
        let joined = items.join(", ");
        self.push_line(&[self.names.lookup(name), "(", &joined, ")"]);
        Ok(())
    }

    /// Emits a statement function as a nested single-expression `def`.
    fn emit_statement_function(
        &mut self,
        variable: ExprId,
        arguments: ExprRange,
        rhs: ExprId,
    ) -> Result<(), PyGenError> {
        let name = match self.arena.get_expr(variable).symbol() {
            Some(sym) => self.mapper.symbol_path(sym),
            None => self.mapper.map(variable)?,
        };
        let mut args: SmallVec<[String; 4]> = SmallVec::new();
        for &arg in self.arena.get_expr_list(arguments) {
            args.push(self.mapper.map(arg)?);
        }
        let joined = args.join(", ");
        self.push_line(&["def ", &name, "(", &joined, "):"]);
        self.depth += 1;
        let value = self.mapper.map(rhs)?;
        self.push_line(&["return ", &value]);
        self.depth -= 1;
        Ok(())
    }

    fn emit_block(&mut self, body: StmtRange) -> Result<(), PyGenError> {
        self.depth += 1;
        for &stmt in self.arena.get_stmt_list(body) {
            self.emit_stmt(stmt)?;
        }
        self.depth -= 1;
        Ok(())
    }

    // Line assembly

    /// Emits one indented line, wrapping at segment boundaries when it
    /// exceeds the configured width. Continuation lines carry the current
    /// indentation plus two spaces.
    fn push_line(&mut self, segments: &[&str]) {
        let indent_width = self.config.indent.len() * self.depth;
        let total: usize = indent_width + segments.iter().map(|s| s.len()).sum::<usize>();
        self.emitter.emit_indent(indent_width);
        if self.config.max_width == 0 || total <= self.config.max_width {
            for segment in segments {
                self.emitter.emit(segment);
            }
            self.emitter.emit_newline();
            return;
        }

        let continuation = indent_width + 2;
        let mut column = indent_width;
        let mut first = true;
        for segment in segments {
            if !first && column + segment.len() > self.config.max_width {
                self.emitter.emit_newline();
                self.emitter.emit_indent(continuation);
                column = continuation;
            }
            self.emitter.emit(segment);
            column += segment.len();
            first = false;
        }
        self.emitter.emit_newline();
    }

    /// Emits one indented line exempt from width wrapping.
    fn push_line_no_wrap(&mut self, text: &str) {
        if text.is_empty() {
            self.emitter.emit_newline();
            return;
        }
        self.emitter.emit_indent(self.config.indent.len() * self.depth);
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }

    /// Emits a line with no indentation and no wrapping.
    fn push_raw_line(&mut self, text: &str) {
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }
}

/// Translates a Fortran comment line for Python output.
///
/// Leading whitespace is dropped and only the first `!` marker becomes
/// `#`. A recognized annotation sentinel prefix is stripped afterwards,
/// along with one following space, so directive text passes through.
fn translate_comment(text: &str) -> String {
    let translated = text.trim_start().replacen('!', "#", 1);
    if let Some(rest) = translated.strip_prefix(GT4PY_SENTINEL) {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        return rest.to_string();
    }
    translated
}

/// Generates numpy-backend Python for a whole source file.
///
/// Uses a wide 300-column limit so statements rarely wrap.
#[tracing::instrument(level = "debug", skip_all, fields(units = file.units.len()))]
pub fn pygen(
    file: &SourceFile,
    arena: &ExprArena,
    names: &NameInterner,
    symbols: &SymbolTable,
) -> Result<String, PyGenError> {
    let config = PyGenConfig {
        max_width: 300,
        ..PyGenConfig::default()
    };
    pygen_with(file, arena, names, symbols, config)
}

/// Generates Python for a whole source file with explicit configuration.
#[tracing::instrument(level = "debug", skip_all, fields(backend = ?config.backend))]
pub fn pygen_with(
    file: &SourceFile,
    arena: &ExprArena,
    names: &NameInterner,
    symbols: &SymbolTable,
    config: PyGenConfig,
) -> Result<String, PyGenError> {
    let mut codegen = PyCodegen::new(arena, names, symbols, config);
    codegen.emit_source_file(file)?;
    Ok(codegen.finish())
}

#[cfg(test)]
mod tests;
