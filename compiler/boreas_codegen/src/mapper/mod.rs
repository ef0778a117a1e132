//! Expression-to-Python rendering.
//!
//! One rule per expression variant, precedence-aware: an operand is
//! parenthesized when its own binding level is looser than the position it
//! is embedded in, and explicitly parenthesized operations reproduce their
//! grouping no matter what precedence would require. Entry points render
//! at statement level, where nothing is wrapped.

use boreas_ir::{
    ExprArena, ExprId, ExprKind, ExprRange, KwArgRange, NameInterner, OpRange, OpSymbol, SymbolId,
    SymbolTable, TypeId,
};
use smallvec::SmallVec;

use crate::error::PyGenError;
use crate::types::numpy_type;

/// Statement-level context: no parentheses ever required.
const PREC_NONE: u8 = 0;
/// Binding level of a prefix sign, between multiplication and
/// exponentiation.
const PREC_UNARY: u8 = 7;
/// Binding level of atoms: literals, names, calls, subscripts.
const PREC_CALL: u8 = 9;

/// Renders expression subtrees as Python source using numpy syntax.
///
/// The mapper borrows the arena and both intern tables; rendering never
/// mutates the tree.
pub struct PyExprMapper<'ir> {
    arena: &'ir ExprArena,
    names: &'ir NameInterner,
    symbols: &'ir SymbolTable,
}

impl<'ir> PyExprMapper<'ir> {
    /// Creates a mapper over the given arena and intern tables.
    pub fn new(arena: &'ir ExprArena, names: &'ir NameInterner, symbols: &'ir SymbolTable) -> Self {
        Self {
            arena,
            names,
            symbols,
        }
    }

    /// Renders an expression at statement level.
    pub fn map(&self, id: ExprId) -> Result<String, PyGenError> {
        self.map_prec(id, PREC_NONE)
    }

    /// Renders the dotted access path of a symbol.
    ///
    /// Derived-type members rewrite the Fortran `%` qualifier to Python
    /// attribute access: `state%u` becomes `state.u`.
    pub fn symbol_path(&self, sym: SymbolId) -> String {
        let key = self.symbols.lookup(sym);
        let name = self.names.lookup(key.name);
        if key.parent.is_valid() {
            format!("{}.{}", self.symbol_path(key.parent), name)
        } else {
            name.to_string()
        }
    }

    fn map_prec(&self, id: ExprId, enclosing: u8) -> Result<String, PyGenError> {
        match *self.arena.get_expr(id) {
            ExprKind::Scalar { sym, .. } => Ok(self.symbol_path(sym)),
            ExprKind::Array { sym, dims, .. } => self.map_array(sym, dims),
            ExprKind::IntLiteral(value) => Ok(value.to_string()),
            ExprKind::FloatLiteral { text, .. } => Ok(self.names.lookup(text).to_string()),
            ExprKind::LogicLiteral(value) => {
                Ok(if value { "True" } else { "False" }.to_string())
            }
            ExprKind::StringLiteral { text } => Ok(format!("'{}'", self.names.lookup(text))),
            ExprKind::Op {
                ops,
                operands,
                parens,
            } => self.map_op(ops, operands, parens, enclosing),
            ExprKind::InlineCall {
                callee,
                args,
                kwargs,
            } => self.map_call(callee, args, kwargs),
            ExprKind::Cast { ty, operand } => self.map_cast(ty, operand),
            ExprKind::Index { name } => Ok(self.names.lookup(name).to_string()),
            ExprKind::RangeIndex { lower, upper, step } => {
                self.map_range_index(lower, upper, step)
            }
            ExprKind::StringConcat { parts } => self.map_string_concat(parts, enclosing),
        }
    }

    /// Renders an array access as `name[dims]`.
    ///
    /// Whole-extent slices render empty and are dropped from the subscript;
    /// an access where every dimension drops out renders as the bare name.
    fn map_array(&self, sym: SymbolId, dims: ExprRange) -> Result<String, PyGenError> {
        let name = self.symbol_path(sym);
        let mut rendered: SmallVec<[String; 4]> = SmallVec::new();
        for &dim in self.arena.get_expr_list(dims) {
            let text = self.map_prec(dim, PREC_NONE)?;
            if !text.is_empty() {
                rendered.push(text);
            }
        }
        if rendered.is_empty() {
            Ok(name)
        } else {
            Ok(format!("{}[{}]", name, rendered.join(", ")))
        }
    }

    fn map_op(
        &self,
        ops: OpRange,
        operands: ExprRange,
        parens: bool,
        enclosing: u8,
    ) -> Result<String, PyGenError> {
        let ops = self.arena.get_ops(ops);
        let operands = self.arena.get_expr_list(operands);

        // Unary form: prefix operator, no separator.
        if let ([op], [operand]) = (ops, operands) {
            let own = match op {
                OpSymbol::Not => op.precedence(),
                _ => PREC_UNARY,
            };
            let operand = self.map_prec(*operand, own)?;
            let text = match op {
                // `not` is a keyword and needs the space.
                OpSymbol::Not => format!("not {operand}"),
                _ => format!("{}{operand}", op.as_symbol()),
            };
            return Ok(Self::wrap_if(text, parens || enclosing > own));
        }

        let Some((&first, rest)) = operands.split_first() else {
            return Ok(String::new());
        };

        // A chain binds as loosely as its loosest operator. Operands after
        // the first must bind strictly tighter, so nested chains at the
        // same level keep their grouping: `a - (b + c)` stays grouped.
        let own = ops.iter().map(|op| op.precedence()).min().unwrap_or(PREC_CALL);
        let mut out = self.map_prec(first, own)?;
        for (op, &operand) in ops.iter().zip(rest) {
            let rhs = self.map_prec(operand, own + 1)?;
            out.push(' ');
            out.push_str(op.as_symbol());
            out.push(' ');
            out.push_str(&rhs);
        }
        Ok(Self::wrap_if(out, parens || enclosing > own))
    }

    /// Renders `callee(positional…, key=value…)`.
    ///
    /// Keyword arguments follow the positional ones in insertion order,
    /// with no spaces around the `=`.
    fn map_call(
        &self,
        callee: ExprId,
        args: ExprRange,
        kwargs: KwArgRange,
    ) -> Result<String, PyGenError> {
        let callee = self.map_prec(callee, PREC_NONE)?;
        let mut items: SmallVec<[String; 8]> = SmallVec::new();
        for &arg in self.arena.get_expr_list(args) {
            items.push(self.map_prec(arg, PREC_NONE)?);
        }
        for kwarg in self.arena.get_kwargs(kwargs) {
            let value = self.map_prec(kwarg.value, PREC_NONE)?;
            items.push(format!("{}={value}", self.names.lookup(kwarg.name)));
        }
        Ok(format!("{}({})", callee, items.join(", ")))
    }

    /// Renders a type conversion as `TargetType(operand)`.
    fn map_cast(&self, ty: TypeId, operand: ExprId) -> Result<String, PyGenError> {
        let target = numpy_type(self.arena.get_type(ty), self.names)?;
        let operand = self.map_prec(operand, PREC_NONE)?;
        Ok(format!("{target}({operand})"))
    }

    /// Renders a range as `lower:upper[:step]` with absent bounds empty.
    ///
    /// A range with no bounds at all stands for the whole extent and
    /// renders empty, which drops it from array subscripts.
    fn map_range_index(
        &self,
        lower: ExprId,
        upper: ExprId,
        step: ExprId,
    ) -> Result<String, PyGenError> {
        if !lower.is_valid() && !upper.is_valid() && !step.is_valid() {
            return Ok(String::new());
        }
        let lower = self.map_optional(lower)?;
        let upper = self.map_optional(upper)?;
        if step.is_valid() {
            let step = self.map_prec(step, PREC_NONE)?;
            Ok(format!("{lower}:{upper}:{step}"))
        } else {
            Ok(format!("{lower}:{upper}"))
        }
    }

    fn map_optional(&self, id: ExprId) -> Result<String, PyGenError> {
        if id.is_valid() {
            self.map_prec(id, PREC_NONE)
        } else {
            Ok(String::new())
        }
    }

    /// Renders concatenation as the parts joined by `+`.
    fn map_string_concat(&self, parts: ExprRange, enclosing: u8) -> Result<String, PyGenError> {
        let mut rendered: SmallVec<[String; 4]> = SmallVec::new();
        for &part in self.arena.get_expr_list(parts) {
            rendered.push(self.map_prec(part, enclosing)?);
        }
        Ok(rendered.join(" + "))
    }

    fn wrap_if(text: String, parenthesize: bool) -> String {
        if parenthesize {
            format!("({text})")
        } else {
            text
        }
    }
}
