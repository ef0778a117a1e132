#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use boreas_ir::{
    ElementKind, ExprArena, ExprId, ExprKind, ExprRange, Intent, KwArg, Module, NameInterner,
    OpSymbol, ProgramUnit, SourceFile, StmtId, StmtKind, StmtRange, Subroutine, SymbolAttributes,
    SymbolKey, SymbolTable,
};
use pretty_assertions::assert_eq;

use super::{pygen, PyBackend, PyCodegen, PyGenConfig};
use crate::error::PyGenError;

struct Fixture {
    names: NameInterner,
    symbols: SymbolTable,
    arena: ExprArena,
}

impl Fixture {
    fn new() -> Self {
        Self {
            names: NameInterner::new(),
            symbols: SymbolTable::new(),
            arena: ExprArena::new(),
        }
    }

    fn real_scalar(&mut self, name: &str) -> ExprId {
        let ty = self
            .arena
            .intern_type(SymbolAttributes::new(ElementKind::Real));
        let sym = self.symbols.intern(SymbolKey::scalar(self.names.intern(name)));
        self.arena.alloc_expr(ExprKind::Scalar { sym, ty })
    }

    fn arg_scalar(&mut self, name: &str, intent: Intent) -> ExprId {
        let ty = self
            .arena
            .intern_type(SymbolAttributes::new(ElementKind::Real).with_intent(intent));
        let sym = self.symbols.intern(SymbolKey::scalar(self.names.intern(name)));
        self.arena.alloc_expr(ExprKind::Scalar { sym, ty })
    }

    fn int(&mut self, value: i64) -> ExprId {
        self.arena.alloc_expr(ExprKind::IntLiteral(value))
    }

    fn binary(&mut self, lhs: ExprId, op: OpSymbol, rhs: ExprId) -> ExprId {
        let ops = self.arena.alloc_ops([op]);
        let operands = self.arena.alloc_expr_list([lhs, rhs]);
        self.arena.alloc_expr(ExprKind::Op {
            ops,
            operands,
            parens: false,
        })
    }

    fn assign(&mut self, lhs: ExprId, rhs: ExprId) -> StmtId {
        self.arena.alloc_stmt(StmtKind::Assignment {
            lhs,
            rhs,
            comment: StmtId::INVALID,
        })
    }

    fn comment(&mut self, text: &str) -> StmtId {
        let text = self.names.intern(text);
        self.arena.alloc_stmt(StmtKind::Comment { text })
    }

    fn section(&mut self, stmts: &[StmtId]) -> StmtId {
        let body = self.arena.alloc_stmt_list(stmts.iter().copied());
        self.arena.alloc_stmt(StmtKind::Section { body })
    }

    fn gen_stmt(&self, stmt: StmtId) -> String {
        self.gen_stmt_with(stmt, PyGenConfig::default())
    }

    fn gen_stmt_with(&self, stmt: StmtId, config: PyGenConfig) -> String {
        let mut codegen = PyCodegen::new(&self.arena, &self.names, &self.symbols, config);
        codegen.emit_stmt(stmt).unwrap();
        codegen.finish()
    }

    fn gen_routine(&self, routine: &Subroutine) -> String {
        self.gen_routine_with(routine, PyGenConfig::default())
    }

    fn gen_routine_with(&self, routine: &Subroutine, config: PyGenConfig) -> String {
        let mut codegen = PyCodegen::new(&self.arena, &self.names, &self.symbols, config);
        codegen.emit_subroutine(routine).unwrap();
        codegen.finish()
    }
}

#[test]
fn loop_range_default_step() {
    let mut fx = Fixture::new();
    let i = fx.real_scalar("i");
    let one = fx.int(1);
    let n = fx.real_scalar("n");
    let bounds = fx.arena.alloc_expr(ExprKind::RangeIndex {
        lower: one,
        upper: n,
        step: ExprId::INVALID,
    });
    let a = fx.real_scalar("a");
    let assign = fx.assign(a, i);
    let body = fx.arena.alloc_stmt_list([assign]);
    let stmt = fx.arena.alloc_stmt(StmtKind::Loop {
        variable: i,
        bounds,
        body,
    });

    assert_eq!(fx.gen_stmt(stmt), "for i in range(1, n + 1):\n  a = i\n");
}

#[test]
fn loop_range_explicit_step() {
    let mut fx = Fixture::new();
    let i = fx.real_scalar("i");
    let one = fx.int(1);
    let n = fx.real_scalar("n");
    let two = fx.int(2);
    let bounds = fx.arena.alloc_expr(ExprKind::RangeIndex {
        lower: one,
        upper: n,
        step: two,
    });
    let a = fx.real_scalar("a");
    let assign = fx.assign(a, i);
    let body = fx.arena.alloc_stmt_list([assign]);
    let stmt = fx.arena.alloc_stmt(StmtKind::Loop {
        variable: i,
        bounds,
        body,
    });

    assert_eq!(fx.gen_stmt(stmt), "for i in range(1, n + 2, 2):\n  a = i\n");
}

#[test]
fn loop_without_range_bounds_fails() {
    let mut fx = Fixture::new();
    let i = fx.real_scalar("i");
    let n = fx.real_scalar("n");
    let assign = fx.assign(i, n);
    let body = fx.arena.alloc_stmt_list([assign]);
    let stmt = fx.arena.alloc_stmt(StmtKind::Loop {
        variable: i,
        bounds: n,
        body,
    });

    let mut codegen = PyCodegen::new(
        &fx.arena,
        &fx.names,
        &fx.symbols,
        PyGenConfig::default(),
    );
    let err = codegen.emit_stmt(stmt).unwrap_err();
    assert_eq!(
        err,
        PyGenError::NotImplemented {
            construct: "loops without explicit range bounds"
        }
    );
}

#[test]
fn while_without_condition_is_infinite() {
    let mut fx = Fixture::new();
    let a = fx.real_scalar("a");
    let b = fx.real_scalar("b");
    let assign = fx.assign(a, b);
    let body = fx.arena.alloc_stmt_list([assign]);
    let stmt = fx.arena.alloc_stmt(StmtKind::WhileLoop {
        condition: ExprId::INVALID,
        body,
    });
    assert_eq!(fx.gen_stmt(stmt), "while True:\n  a = b\n");

    let guard = fx.binary(a, OpSymbol::Lt, b);
    let assign = fx.assign(a, b);
    let body = fx.arena.alloc_stmt_list([assign]);
    let guarded = fx.arena.alloc_stmt(StmtKind::WhileLoop {
        condition: guard,
        body,
    });
    assert_eq!(fx.gen_stmt(guarded), "while a < b:\n  a = b\n");
}

#[test]
fn conditional_chain_stays_flat() {
    let mut fx = Fixture::new();
    let a = fx.real_scalar("a");
    let b = fx.real_scalar("b");
    let c = fx.real_scalar("c");
    let d = fx.real_scalar("d");
    let x = fx.real_scalar("x");
    let one = fx.int(1);
    let two = fx.int(2);
    let three = fx.int(3);

    let first = fx.binary(a, OpSymbol::Lt, b);
    let second = fx.binary(c, OpSymbol::Lt, d);

    let set_two = fx.assign(x, two);
    let set_three = fx.assign(x, three);
    let elif_body = fx.arena.alloc_stmt_list([set_two]);
    let else_body = fx.arena.alloc_stmt_list([set_three]);
    let elif = fx.arena.alloc_stmt(StmtKind::Conditional {
        condition: second,
        body: elif_body,
        else_body,
        has_elseif: false,
    });

    let set_one = fx.assign(x, one);
    let body = fx.arena.alloc_stmt_list([set_one]);
    let chain_tail = fx.arena.alloc_stmt_list([elif]);
    let stmt = fx.arena.alloc_stmt(StmtKind::Conditional {
        condition: first,
        body,
        else_body: chain_tail,
        has_elseif: true,
    });

    assert_eq!(
        fx.gen_stmt(stmt),
        concat!(
            "if a < b:\n",
            "  x = 1\n",
            "elif c < d:\n",
            "  x = 2\n",
            "else:\n",
            "  x = 3\n",
        )
    );
}

#[test]
fn long_elif_chains_stay_flat() {
    let mut fx = Fixture::new();
    let x = fx.real_scalar("x");
    let conds: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|name| {
            let lhs = fx.real_scalar(name);
            let zero = fx.int(0);
            fx.binary(lhs, OpSymbol::Gt, zero)
        })
        .collect();

    // Innermost link first: elif c > 0 / else.
    let three = fx.int(3);
    let set = fx.assign(x, three);
    let body = fx.arena.alloc_stmt_list([set]);
    let four = fx.int(4);
    let set = fx.assign(x, four);
    let else_body = fx.arena.alloc_stmt_list([set]);
    let mut chain = fx.arena.alloc_stmt(StmtKind::Conditional {
        condition: conds[2],
        body,
        else_body,
        has_elseif: false,
    });

    for (value, &condition) in [(2_i64, &conds[1]), (1, &conds[0])] {
        let value = fx.int(value);
        let set = fx.assign(x, value);
        let body = fx.arena.alloc_stmt_list([set]);
        let else_body = fx.arena.alloc_stmt_list([chain]);
        chain = fx.arena.alloc_stmt(StmtKind::Conditional {
            condition,
            body,
            else_body,
            has_elseif: true,
        });
    }

    assert_eq!(
        fx.gen_stmt(chain),
        concat!(
            "if a > 0:\n",
            "  x = 1\n",
            "elif b > 0:\n",
            "  x = 2\n",
            "elif c > 0:\n",
            "  x = 3\n",
            "else:\n",
            "  x = 4\n",
        )
    );
}

#[test]
fn conditional_without_else() {
    let mut fx = Fixture::new();
    let a = fx.real_scalar("a");
    let b = fx.real_scalar("b");
    let x = fx.real_scalar("x");
    let one = fx.int(1);
    let cond = fx.binary(a, OpSymbol::Eq, b);
    let set = fx.assign(x, one);
    let body = fx.arena.alloc_stmt_list([set]);
    let stmt = fx.arena.alloc_stmt(StmtKind::Conditional {
        condition: cond,
        body,
        else_body: StmtRange::EMPTY,
        has_elseif: false,
    });

    assert_eq!(fx.gen_stmt(stmt), "if a == b:\n  x = 1\n");
}

#[test]
fn comment_marker_translated_once() {
    let mut fx = Fixture::new();
    let plain = fx.comment("! note ! again");
    assert_eq!(fx.gen_stmt(plain), "# note ! again\n");

    let indented = fx.comment("   ! indented");
    assert_eq!(fx.gen_stmt(indented), "# indented\n");

    let directive = fx.comment("!->gt4py set dt");
    assert_eq!(fx.gen_stmt(directive), "set dt\n");
}

#[test]
fn comment_block_emits_every_line() {
    let mut fx = Fixture::new();
    let first = fx.comment("! one");
    let second = fx.comment("! two");
    let comments = fx.arena.alloc_stmt_list([first, second]);
    let block = fx.arena.alloc_stmt(StmtKind::CommentBlock { comments });

    assert_eq!(fx.gen_stmt(block), "# one\n# two\n");
}

#[test]
fn declaration_matrix() {
    let mut fx = Fixture::new();

    // Local array: allocated with its declared shape.
    let n = fx.real_scalar("n");
    let m = fx.real_scalar("m");
    let dims = fx.arena.alloc_expr_list([n, m]);
    let array_ty = fx
        .arena
        .intern_type(SymbolAttributes::new(ElementKind::Real).with_shape(dims));
    let x_sym = fx.symbols.intern(SymbolKey::array(fx.names.intern("x"), 2));
    let x = fx.arena.alloc_expr(ExprKind::Array {
        sym: x_sym,
        ty: array_ty,
        dims,
    });

    // Initialized scalar: assigned its initial value.
    let zero = fx.int(0);
    let init_ty = fx
        .arena
        .intern_type(SymbolAttributes::new(ElementKind::Integer).with_initial(zero));
    let y_sym = fx.symbols.intern(SymbolKey::scalar(fx.names.intern("y")));
    let y = fx.arena.alloc_expr(ExprKind::Scalar {
        sym: y_sym,
        ty: init_ty,
    });

    // Argument: declared by the signature, no line here.
    let z = fx.arg_scalar("z", Intent::In);

    let symbols = fx.arena.alloc_expr_list([x, y, z]);
    let stmt = fx.arena.alloc_stmt(StmtKind::VariableDeclaration {
        symbols,
        comment: StmtId::INVALID,
    });

    assert_eq!(
        fx.gen_stmt(stmt),
        "x = np.ndarray(order=\"F\", shape=(n, m,))\ny = 0\n"
    );
}

#[test]
fn initializer_wins_over_allocation() {
    let mut fx = Fixture::new();
    let n = fx.real_scalar("n");
    let dims = fx.arena.alloc_expr_list([n]);
    let zero = fx.int(0);
    let ty = fx.arena.intern_type(
        SymbolAttributes::new(ElementKind::Real)
            .with_shape(dims)
            .with_initial(zero),
    );
    let sym = fx.symbols.intern(SymbolKey::array(fx.names.intern("w"), 1));
    let w = fx.arena.alloc_expr(ExprKind::Array { sym, ty, dims });
    let symbols = fx.arena.alloc_expr_list([w]);
    let stmt = fx.arena.alloc_stmt(StmtKind::VariableDeclaration {
        symbols,
        comment: StmtId::INVALID,
    });

    assert_eq!(fx.gen_stmt(stmt), "w = 0\n");
}

#[test]
fn declaration_comment_leads() {
    let mut fx = Fixture::new();
    let zero = fx.int(0);
    let ty = fx
        .arena
        .intern_type(SymbolAttributes::new(ElementKind::Integer).with_initial(zero));
    let sym = fx.symbols.intern(SymbolKey::scalar(fx.names.intern("count")));
    let count = fx.arena.alloc_expr(ExprKind::Scalar { sym, ty });
    let symbols = fx.arena.alloc_expr_list([count]);
    let note = fx.comment("! running total");
    let stmt = fx.arena.alloc_stmt(StmtKind::VariableDeclaration {
        symbols,
        comment: note,
    });

    assert_eq!(fx.gen_stmt(stmt), "# running total\ncount = 0\n");
}

#[test]
fn assignment_comment_suffix() {
    let mut fx = Fixture::new();
    let a = fx.real_scalar("a");
    let b = fx.real_scalar("b");
    let note = fx.comment("! update");
    let stmt = fx.arena.alloc_stmt(StmtKind::Assignment {
        lhs: a,
        rhs: b,
        comment: note,
    });

    assert_eq!(fx.gen_stmt(stmt), "a = b  # update\n");
}

#[test]
fn call_statement_renders_positional_then_keyword() {
    let mut fx = Fixture::new();
    let a = fx.real_scalar("a");
    let b = fx.real_scalar("b");
    let x = fx.real_scalar("x");
    let name = fx.names.intern("compute");
    let dt = fx.names.intern("dt");
    let args = fx.arena.alloc_expr_list([a, b]);
    let kwargs = fx.arena.alloc_kwargs([KwArg { name: dt, value: x }]);
    let stmt = fx
        .arena
        .alloc_stmt(StmtKind::CallStatement { name, args, kwargs });

    assert_eq!(fx.gen_stmt(stmt), "compute(a, b, dt=x)\n");
}

#[test]
fn import_is_dropped() {
    let mut fx = Fixture::new();
    let module = fx.names.intern("parkind1");
    let stmt = fx.arena.alloc_stmt(StmtKind::Import {
        module,
        symbols: ExprRange::EMPTY,
    });

    assert_eq!(fx.gen_stmt(stmt), "");
}

#[test]
fn intrinsic_passes_through_trimmed() {
    let mut fx = Fixture::new();
    let text = fx.names.intern("  print(\"x\")");
    let stmt = fx.arena.alloc_stmt(StmtKind::Intrinsic { text });

    assert_eq!(fx.gen_stmt(stmt), "print(\"x\")\n");
}

#[test]
fn statement_function_renders_nested_def() {
    let mut fx = Fixture::new();
    let f = fx.real_scalar("f");
    let x = fx.real_scalar("x");
    let one = fx.int(1);
    let rhs = fx.binary(x, OpSymbol::Add, one);
    let arguments = fx.arena.alloc_expr_list([x]);
    let stmt = fx.arena.alloc_stmt(StmtKind::StatementFunction {
        variable: f,
        arguments,
        rhs,
    });

    assert_eq!(fx.gen_stmt(stmt), "def f(x):\n  return x + 1\n");
}

#[test]
fn subroutine_signature_and_return() {
    let mut fx = Fixture::new();
    let a = fx.arg_scalar("a", Intent::In);
    let b = fx.arg_scalar("b", Intent::InOut);
    let c = fx.arg_scalar("c", Intent::Out);

    let grid = fx.names.intern("Grid");
    let derived_ty = fx
        .arena
        .intern_type(SymbolAttributes::new(ElementKind::Derived(grid)).with_intent(Intent::In));
    let g_sym = fx.symbols.intern(SymbolKey::scalar(fx.names.intern("g")));
    let g = fx.arena.alloc_expr(ExprKind::Scalar {
        sym: g_sym,
        ty: derived_ty,
    });

    let n = fx.real_scalar("n");
    let dims = fx.arena.alloc_expr_list([n]);
    let field_ty = fx.arena.intern_type(
        SymbolAttributes::new(ElementKind::Real)
            .with_shape(dims)
            .with_intent(Intent::Out),
    );
    let field_sym = fx
        .symbols
        .intern(SymbolKey::array(fx.names.intern("field"), 1));
    let field = fx.arena.alloc_expr(ExprKind::Array {
        sym: field_sym,
        ty: field_ty,
        dims,
    });

    let sum = fx.binary(a, OpSymbol::Add, b);
    let set_c = fx.assign(c, sum);
    let body = fx.section(&[set_c]);
    let doc = fx.comment("! Computes things.");
    let docstring = fx.arena.alloc_stmt_list([doc]);

    let arguments = fx.arena.alloc_expr_list([a, b, g, field, c]);
    let routine = Subroutine {
        name: fx.names.intern("f"),
        arguments,
        docstring,
        decls: StmtId::INVALID,
        body,
    };

    assert_eq!(
        fx.gen_routine(&routine),
        concat!(
            "import numpy as np\n",
            "def f(a: np.float64, b: np.float64, g, field: np.ndarray):\n",
            "  # Computes things.\n",
            "  c = a + b\n",
            "  return b, c\n",
        )
    );
}

#[test]
fn module_units_fail() {
    let fx = Fixture::new();
    let module = Module {
        name: fx.names.intern("mod_physics"),
    };
    let file = SourceFile::new(vec![ProgramUnit::Module(module)]);

    let err = pygen(&file, &fx.arena, &fx.names, &fx.symbols).unwrap_err();
    assert_eq!(
        err,
        PyGenError::NotImplemented {
            construct: "module program units"
        }
    );
}

#[test]
fn end_to_end_add() {
    let mut fx = Fixture::new();
    let a = fx.arg_scalar("a", Intent::In);
    let b = fx.arg_scalar("b", Intent::Out);
    let text = fx.names.intern("1.0");
    let one = fx.arena.alloc_expr(ExprKind::FloatLiteral { text, kind: None });
    let sum = fx.binary(a, OpSymbol::Add, one);
    let set_b = fx.assign(b, sum);
    let body = fx.section(&[set_b]);
    let arguments = fx.arena.alloc_expr_list([a, b]);
    let routine = Subroutine {
        name: fx.names.intern("ADD"),
        arguments,
        docstring: StmtRange::EMPTY,
        decls: StmtId::INVALID,
        body,
    };
    let file = SourceFile::new(vec![ProgramUnit::Subroutine(routine)]);

    let text = pygen(&file, &fx.arena, &fx.names, &fx.symbols).unwrap();
    assert_eq!(
        text,
        concat!(
            "import numpy as np\n",
            "def ADD(a: np.float64):\n",
            "  b = a + 1.0\n",
            "  return b\n",
        )
    );
}

#[test]
fn gt4py_backend_headers() {
    let mut fx = Fixture::new();
    let x = fx.real_scalar("x");
    let one = fx.int(1);
    let set = fx.assign(x, one);
    let body = fx.section(&[set]);
    let routine = Subroutine {
        name: fx.names.intern("STEP"),
        arguments: ExprRange::EMPTY,
        docstring: StmtRange::EMPTY,
        decls: StmtId::INVALID,
        body,
    };

    let config = PyGenConfig {
        backend: PyBackend::Gt4py,
        ..PyGenConfig::default()
    };
    assert_eq!(
        fx.gen_routine_with(&routine, config),
        concat!(
            "# -*- coding: utf-8 -*-\n",
            "from __future__ import annotations\n",
            "from gt4py.cartesian.gtscript import Field, IJ, K\n",
            "import numpy as np\n",
            "from ifs_physics_common.framework.stencil import stencil_collection\n",
            "@stencil_collection(\"step\")\n",
            "def STEP():\n",
            "  x = 1\n",
        )
    );
}

#[test]
fn long_lines_wrap_at_segment_boundaries() {
    let mut fx = Fixture::new();
    let alpha = fx.real_scalar("alpha");
    let beta = fx.real_scalar("beta_gamma");
    let stmt = fx.assign(alpha, beta);

    let config = PyGenConfig {
        max_width: 10,
        ..PyGenConfig::default()
    };
    assert_eq!(fx.gen_stmt_with(stmt, config), "alpha = \n  beta_gamma\n");
}

#[test]
fn base_depth_indents_everything() {
    let mut fx = Fixture::new();
    let a = fx.real_scalar("a");
    let b = fx.real_scalar("b");
    let stmt = fx.assign(a, b);

    let mut codegen = PyCodegen::new(
        &fx.arena,
        &fx.names,
        &fx.symbols,
        PyGenConfig::default(),
    )
    .with_depth(2);
    codegen.emit_stmt(stmt).unwrap();
    assert_eq!(codegen.finish(), "    a = b\n");
}

#[test]
fn zero_width_disables_wrapping() {
    let mut fx = Fixture::new();
    let alpha = fx.real_scalar("alpha");
    let beta = fx.real_scalar("beta_gamma");
    let stmt = fx.assign(alpha, beta);

    let config = PyGenConfig {
        max_width: 0,
        ..PyGenConfig::default()
    };
    assert_eq!(fx.gen_stmt_with(stmt, config), "alpha = beta_gamma\n");
}
