#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a formula String into a flat sequence of lexical tokens
///# Example
/// ```
/// use RustedRoots::symbolic::tokenizer::tokenize;
/// let tokens = tokenize("sin(x)+2").unwrap();
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["sin", "(", "x", ")", "+", "2"]);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod tokenizer;
///____________________________________________________________________________________________________________________________
/// a module turns a token sequence into a symbolic expression by recursive descent
///# Example
/// ```
/// use RustedRoots::symbolic::parse_expr::parse_formula;
/// let input = "f(x) = x^2 - 4";
/// let parsed_expression = parse_formula(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// a missing '=' separator, a bare function name without '(', an unmatched
/// parenthesis or a trailing token are all ParseError - never a partial tree
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// the expression tree itself: one tagged variant per node kind, immutable
/// after construction, with Display and std::ops sugar for building trees by hand
///# Example
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let f = Expr::Var.pow(Expr::Const(2.0)) - Expr::Const(4.0);
/// println!("expression: {}", f);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
///____________________________________________________________________________________________________________________________
/// a module evaluates an expression tree at a given x against an injected
/// capability table of real functions {sin, cos, tan, cot, log, sqrt, exp}
///# Example
/// ```
/// use RustedRoots::symbolic::evaluator::EvaluableFunction;
/// let f = EvaluableFunction::from_formula("f(x) = x^2 - 4").unwrap();
/// assert_eq!(f.evaluate(2.0).unwrap(), 0.0);
/// assert_eq!(f.evaluate(0.0).unwrap(), -4.0);
/// ```
/// division by zero and out-of-domain arguments of log/sqrt surface as
/// DomainError carrying the offending operand - never a silent sentinel value
/// ________________________________________________________________________________________________________________________________
pub mod evaluator;
