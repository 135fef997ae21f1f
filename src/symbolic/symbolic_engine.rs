use std::fmt;

/// Binary operator tag carried by [`Expr::Binary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }
}

/// Core symbolic expression enum representing a parsed formula as an abstract
/// syntax tree. Uses Box<Expr> for recursive structures, allowing arbitrarily
/// deep expression trees. Immutable after construction.
///
/// The function set is not fixed in the type: a call node carries its function
/// name and the implementation is looked up in the evaluator's capability
/// table, so alternate function sets can be substituted for testing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numerical constant value
    Const(f64),
    /// The free input variable, conventionally named "x"
    Var,
    /// Unary negation: -operand
    Neg(Box<Expr>),
    /// Binary operation: left op right
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Function application: name(argument), name resolved at evaluation time
    Call(String, Box<Expr>),
}

/// Display implementation for pretty printing symbolic expressions.
/// Parenthesizes every compound node so precedence is unambiguous.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Var => write!(f, "x"),
            Expr::Neg(inner) => write!(f, "(-{})", inner),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call(name, arg) => write!(f, "{}({})", name, arg),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinOp::Add, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinOp::Sub, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinOp::Mul, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Binary(BinOp::Div, self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Binary(BinOp::Pow, self.boxed(), rhs.boxed())
    }

    /// Creates a function application node name(arg).
    pub fn call(name: &str, arg: Expr) -> Expr {
        Expr::Call(name.to_string(), arg.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Const(val) => *val == 0.0,
            _ => false,
        }
    }

    /// check if the expression mentions the free variable at all
    pub fn contains_variable(&self) -> bool {
        match self {
            Expr::Var => true,
            Expr::Const(_) => false,
            Expr::Neg(inner) => inner.contains_variable(),
            Expr::Binary(_, lhs, rhs) => lhs.contains_variable() || rhs.contains_variable(),
            Expr::Call(_, arg) => arg.contains_variable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_binary() {
        let expr = Expr::Var.pow(Expr::Const(2.0)) - Expr::Const(4.0);
        assert_eq!(format!("{}", expr), "((x ^ 2) - 4)");
    }

    #[test]
    fn test_display_call_and_neg() {
        let expr = -Expr::call("sin", Expr::Var);
        assert_eq!(format!("{}", expr), "(-sin(x))");
    }

    #[test]
    fn test_ops_build_binary_nodes() {
        let expr = Expr::Var + Expr::Const(2.0);
        assert_eq!(
            expr,
            Expr::Binary(BinOp::Add, Expr::Var.boxed(), Expr::Const(2.0).boxed())
        );
    }

    #[test]
    fn test_contains_variable() {
        assert!(Expr::call("exp", Expr::Var).contains_variable());
        assert!(!(Expr::Const(1.0) + Expr::Const(2.0)).contains_variable());
    }
}
