use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::tokenizer::{LexError, Token, TokenKind, tokenize};
use thiserror::Error;

/// Function names the parser accepts in call position. The evaluator's
/// capability table decides what they mean; the parser only fixes the syntax.
pub const FUNCTION_NAMES: [&str; 7] = ["sin", "cos", "tan", "cot", "log", "sqrt", "exp"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("formula must contain '=' separating the name part from the expression")]
    MissingSeparator,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected token '{token}'")]
    UnexpectedToken { token: String },
    #[error("missing closing parenthesis")]
    MissingClosingParen,
    #[error("function '{name}' must be followed by a parenthesized argument")]
    BareFunction { name: String },
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },
    #[error("trailing token '{token}' after complete expression")]
    TrailingToken { token: String },
}

/// Forward-only cursor over the token sequence. Every grammar rule advances
/// it; nothing ever backtracks.
struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    fn new(tokens: Vec<Token>) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// consume the current token if it is one of the given operator symbols
    fn eat_operator(&mut self, symbols: &[&str]) -> Option<String> {
        let token = self.peek()?;
        if symbols.iter().any(|s| token.is_operator(s)) {
            let text = token.text.clone();
            self.pos += 1;
            Some(text)
        } else {
            None
        }
    }

    fn expect_right_paren(&mut self) -> Result<(), ParseError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::RightParen => Ok(()),
            _ => Err(ParseError::MissingClosingParen),
        }
    }
}

/// Parses a full formula of the form "f(x) = expression". Everything left of
/// the first '=' is ignored as a label; the right-hand side must be a complete
/// expression.
pub fn parse_formula(input: &str) -> Result<Expr, ParseError> {
    let (_label, body) = input.split_once('=').ok_or(ParseError::MissingSeparator)?;
    parse_expression(body)
}

/// Parses a bare expression (no "f(x) =" prefix). Errors if any token is left
/// unconsumed after the top-level expression.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    let mut cursor = TokenCursor::new(tokens);
    let expr = expression(&mut cursor)?;
    if let Some(token) = cursor.peek() {
        return Err(ParseError::TrailingToken {
            token: token.text.clone(),
        });
    }
    Ok(expr)
}

/// expression := term (('+' | '-') term)*
fn expression(cursor: &mut TokenCursor) -> Result<Expr, ParseError> {
    let mut lhs = term(cursor)?;
    while let Some(op) = cursor.eat_operator(&["+", "-"]) {
        let rhs = term(cursor)?;
        lhs = if op == "+" { lhs + rhs } else { lhs - rhs };
    }
    Ok(lhs)
}

/// term := power (('*' | '/') power)*
fn term(cursor: &mut TokenCursor) -> Result<Expr, ParseError> {
    let mut lhs = power(cursor)?;
    while let Some(op) = cursor.eat_operator(&["*", "/"]) {
        let rhs = power(cursor)?;
        lhs = if op == "*" { lhs * rhs } else { lhs / rhs };
    }
    Ok(lhs)
}

/// power := factor ('^' factor)*
/// chains associate to the left, so 2^3^2 is (2^3)^2
fn power(cursor: &mut TokenCursor) -> Result<Expr, ParseError> {
    let mut lhs = factor(cursor)?;
    while cursor.eat_operator(&["^"]).is_some() {
        let rhs = factor(cursor)?;
        lhs = lhs.pow(rhs);
    }
    Ok(lhs)
}

/// factor := '-' factor | '(' expression ')' | number | identifier
fn factor(cursor: &mut TokenCursor) -> Result<Expr, ParseError> {
    let token = cursor.next().ok_or(ParseError::UnexpectedEnd)?;
    if token.is_operator("-") {
        let inner = factor(cursor)?;
        return Ok(-inner);
    }
    match token.kind {
        TokenKind::LeftParen => {
            let inner = expression(cursor)?;
            cursor.expect_right_paren()?;
            Ok(inner)
        }
        TokenKind::Number => {
            let value: f64 = token
                .text
                .parse()
                .map_err(|_| ParseError::UnexpectedToken {
                    token: token.text.clone(),
                })?;
            Ok(Expr::Const(value))
        }
        TokenKind::Identifier => identifier(cursor, &token.text),
        _ => Err(ParseError::UnexpectedToken { token: token.text }),
    }
}

fn identifier(cursor: &mut TokenCursor, name: &str) -> Result<Expr, ParseError> {
    if name == "x" {
        return Ok(Expr::Var);
    }
    if name == "e" {
        return Ok(Expr::Const(std::f64::consts::E));
    }
    if FUNCTION_NAMES.contains(&name) {
        match cursor.peek() {
            Some(token) if token.kind == TokenKind::LeftParen => {
                cursor.next();
                let arg = expression(cursor)?;
                cursor.expect_right_paren()?;
                Ok(Expr::call(name, arg))
            }
            _ => Err(ParseError::BareFunction {
                name: name.to_string(),
            }),
        }
    } else {
        Err(ParseError::UnknownIdentifier {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_engine::{BinOp, Expr};

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expression("42").unwrap(), Expr::Const(42.0));
        assert_eq!(parse_expression("2.5").unwrap(), Expr::Const(2.5));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_expression("x").unwrap(), Expr::Var);
    }

    #[test]
    fn test_parse_precedence() {
        // 2 + 3 * x parses as 2 + (3 * x)
        let expr = parse_expression("2+3*x").unwrap();
        assert_eq!(expr, Expr::Const(2.0) + Expr::Const(3.0) * Expr::Var);
    }

    #[test]
    fn test_parse_power_chains_left() {
        let expr = parse_expression("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::Const(2.0).pow(Expr::Const(3.0)).pow(Expr::Const(2.0))
        );
    }

    #[test]
    fn test_parse_double_negation() {
        let expr = parse_expression("--x").unwrap();
        assert_eq!(expr, -(-Expr::Var));
    }

    #[test]
    fn test_parse_function_call() {
        let expr = parse_expression("sin(x)").unwrap();
        assert_eq!(expr, Expr::call("sin", Expr::Var));
    }

    #[test]
    fn test_parse_bare_function_name() {
        let err = parse_expression("sin+1").unwrap_err();
        assert_eq!(
            err,
            ParseError::BareFunction {
                name: "sin".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_closing_paren() {
        let err = parse_expression("(x+2").unwrap_err();
        assert_eq!(err, ParseError::MissingClosingParen);
    }

    #[test]
    fn test_parse_trailing_paren() {
        let err = parse_expression("x+2)").unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingToken {
                token: ")".to_string()
            }
        );
    }

    #[test]
    fn test_parse_formula_requires_separator() {
        let err = parse_formula("x^2 - 4").unwrap_err();
        assert_eq!(err, ParseError::MissingSeparator);
        let expr = parse_formula("f(x) = x^2 - 4").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinOp::Sub,
                Expr::Var.pow(Expr::Const(2.0)).boxed(),
                Expr::Const(4.0).boxed()
            )
        );
    }

    #[test]
    fn test_parse_unknown_identifier() {
        let err = parse_expression("x + y").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownIdentifier {
                name: "y".to_string()
            }
        );
    }

    #[test]
    fn test_parse_adjacent_tokens_are_trailing() {
        let err = parse_expression("x 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingToken {
                token: "2".to_string()
            }
        );
    }
}
