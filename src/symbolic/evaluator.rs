use crate::symbolic::parse_expr::{ParseError, parse_formula};
use crate::symbolic::symbolic_engine::{BinOp, Expr};
use std::collections::HashMap;
use thiserror::Error;

/// Evaluation-time domain failure. Each variant carries the offending operand
/// so the caller can report where the math went wrong, never a silent NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("division by zero while evaluating '{numerator} / 0'")]
    DivisionByZero { numerator: String },
    #[error("log of non-positive value {value}")]
    LogOfNonPositive { value: f64 },
    #[error("square root of negative value {value}")]
    SqrtOfNegative { value: f64 },
    #[error("cot undefined at {value} (tan is zero)")]
    CotUndefined { value: f64 },
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },
}

/// A named real function with an explicit domain check.
pub type RealFunction = fn(f64) -> Result<f64, DomainError>;

fn checked_sin(v: f64) -> Result<f64, DomainError> {
    Ok(v.sin())
}

fn checked_cos(v: f64) -> Result<f64, DomainError> {
    Ok(v.cos())
}

fn checked_tan(v: f64) -> Result<f64, DomainError> {
    Ok(v.tan())
}

fn checked_cot(v: f64) -> Result<f64, DomainError> {
    let t = v.tan();
    if t == 0.0 {
        Err(DomainError::CotUndefined { value: v })
    } else {
        Ok(1.0 / t)
    }
}

/// natural logarithm
fn checked_log(v: f64) -> Result<f64, DomainError> {
    if v <= 0.0 {
        Err(DomainError::LogOfNonPositive { value: v })
    } else {
        Ok(v.ln())
    }
}

fn checked_sqrt(v: f64) -> Result<f64, DomainError> {
    if v < 0.0 {
        Err(DomainError::SqrtOfNegative { value: v })
    } else {
        Ok(v.sqrt())
    }
}

fn checked_exp(v: f64) -> Result<f64, DomainError> {
    Ok(v.exp())
}

/// Capability table mapping function names to their implementations. The
/// evaluator takes the table as an argument, so tests can substitute stubs
/// for any entry without touching the expression tree.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    functions: HashMap<String, RealFunction>,
}

impl FunctionTable {
    /// The standard table: sin, cos, tan, cot, log (natural), sqrt, exp.
    pub fn standard() -> Self {
        let mut table = FunctionTable {
            functions: HashMap::new(),
        };
        table.insert("sin", checked_sin);
        table.insert("cos", checked_cos);
        table.insert("tan", checked_tan);
        table.insert("cot", checked_cot);
        table.insert("log", checked_log);
        table.insert("sqrt", checked_sqrt);
        table.insert("exp", checked_exp);
        table
    }

    pub fn insert(&mut self, name: &str, function: RealFunction) {
        self.functions.insert(name.to_string(), function);
    }

    pub fn get(&self, name: &str) -> Option<RealFunction> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        FunctionTable::standard()
    }
}

/// Evaluates the expression tree at the given x against the function table.
/// Pure structural recursion: the same tree, x and table always produce the
/// same result.
pub fn evaluate(expr: &Expr, x: f64, table: &FunctionTable) -> Result<f64, DomainError> {
    match expr {
        Expr::Const(val) => Ok(*val),
        Expr::Var => Ok(x),
        Expr::Neg(inner) => Ok(-evaluate(inner, x, table)?),
        Expr::Binary(op, lhs, rhs) => {
            let left = evaluate(lhs, x, table)?;
            let right = evaluate(rhs, x, table)?;
            match op {
                BinOp::Add => Ok(left + right),
                BinOp::Sub => Ok(left - right),
                BinOp::Mul => Ok(left * right),
                BinOp::Div => {
                    if right == 0.0 {
                        Err(DomainError::DivisionByZero {
                            numerator: lhs.to_string(),
                        })
                    } else {
                        Ok(left / right)
                    }
                }
                BinOp::Pow => Ok(left.powf(right)),
            }
        }
        Expr::Call(name, arg) => {
            let function = table.get(name).ok_or_else(|| DomainError::UnknownFunction {
                name: name.clone(),
            })?;
            let value = evaluate(arg, x, table)?;
            function(value)
        }
    }
}

/// An expression tree paired with its function table, callable like a plain
/// f(x). This is what the numerical engines consume.
#[derive(Debug, Clone)]
pub struct EvaluableFunction {
    expr: Expr,
    table: FunctionTable,
}

impl EvaluableFunction {
    pub fn new(expr: Expr, table: FunctionTable) -> Self {
        EvaluableFunction { expr, table }
    }

    pub fn from_expression(expr: Expr) -> Self {
        EvaluableFunction::new(expr, FunctionTable::standard())
    }

    /// Parses "f(x) = expression" and pairs it with the standard table.
    pub fn from_formula(input: &str) -> Result<Self, ParseError> {
        let expr = parse_formula(input)?;
        Ok(EvaluableFunction::from_expression(expr))
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn evaluate(&self, x: f64) -> Result<f64, DomainError> {
        evaluate(&self.expr, x, &self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_quadratic() {
        let f = EvaluableFunction::from_formula("f(x) = x^2 - 4").unwrap();
        assert_eq!(f.evaluate(2.0).unwrap(), 0.0);
        assert_eq!(f.evaluate(-2.0).unwrap(), 0.0);
        assert_eq!(f.evaluate(0.0).unwrap(), -4.0);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let f = EvaluableFunction::from_formula("f(x) = sin(x)*exp(x) - x/3").unwrap();
        let first = f.evaluate(1.234).unwrap();
        let second = f.evaluate(1.234).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_evaluate_log_domain_error() {
        let f = EvaluableFunction::from_formula("f(x) = log(x)").unwrap();
        assert_eq!(
            f.evaluate(-1.0).unwrap_err(),
            DomainError::LogOfNonPositive { value: -1.0 }
        );
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let f = EvaluableFunction::from_formula("f(x) = 1/x").unwrap();
        assert!(matches!(
            f.evaluate(0.0).unwrap_err(),
            DomainError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_stubbed_function_table() {
        fn fake_sin(_v: f64) -> Result<f64, DomainError> {
            Ok(0.5)
        }
        let mut table = FunctionTable::standard();
        table.insert("sin", fake_sin);
        let expr = crate::symbolic::parse_expr::parse_expression("sin(x)+1").unwrap();
        let f = EvaluableFunction::new(expr, table);
        assert_eq!(f.evaluate(100.0).unwrap(), 1.5);
    }
}
