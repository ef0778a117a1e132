//! Operator symbols for operation chains.
//!
//! One closed enum covers the operators surviving translation to the
//! Python target. Logical operators carry their keyword spelling; the
//! Fortran source forms (`.and.`, `/=`, ...) are the frontend's concern.

/// Operator in an [`Op`](crate::ExprKind::Op) chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum OpSymbol {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
    Not,
}

impl OpSymbol {
    /// Returns the rendered token for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }

    /// Returns the infix precedence level of this operator.
    ///
    /// Higher number = binds tighter. Levels follow the target language:
    /// - 1: `or`
    /// - 2: `and`
    /// - 3: `not`
    /// - 4: comparisons
    /// - 5: `+` `-`
    /// - 6: `*` `/`
    /// - 8: `**`
    ///
    /// Level 7 is reserved for the unary sign position and level 9 for
    /// atoms and call syntax; both live in the expression mapper.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Not => 3,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div => 6,
            Self::Pow => 8,
        }
    }
}
