use std::fmt;
use thiserror::Error;

/// Lexical error: the scanner met a character that starts no token class.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unrecognized character '{character}' at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },
}

/// Coarse token classes produced by the scanner. Operator keeps the raw
/// symbol in the token text, the parser dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Scans a formula string into tokens. Whitespace separates tokens and is
/// otherwise ignored. A '.' is part of a number only when a digit follows it,
/// so "2." is a number token "2" and then a lexical error on the dot.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let text: String = chars[start..i].iter().collect();
            tokens.push(Token::new(TokenKind::Number, text));
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            tokens.push(Token::new(TokenKind::Identifier, text));
        } else if c == '(' {
            tokens.push(Token::new(TokenKind::LeftParen, "("));
            i += 1;
        } else if c == ')' {
            tokens.push(Token::new(TokenKind::RightParen, ")"));
            i += 1;
        } else if matches!(c, '+' | '-' | '*' | '/' | '^' | ',') {
            tokens.push(Token::new(TokenKind::Operator, c.to_string()));
            i += 1;
        } else {
            return Err(LexError::UnrecognizedCharacter {
                character: c,
                position: i,
            });
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_function_call() {
        let tokens = tokenize("sin(x)+2").unwrap();
        let expected = vec![
            Token::new(TokenKind::Identifier, "sin"),
            Token::new(TokenKind::LeftParen, "("),
            Token::new(TokenKind::Identifier, "x"),
            Token::new(TokenKind::RightParen, ")"),
            Token::new(TokenKind::Operator, "+"),
            Token::new(TokenKind::Number, "2"),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokenize_decimal_number() {
        let tokens = tokenize("2.5*x^2").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["2.5", "*", "x", "^", "2"]);
        assert_eq!(tokens[0].kind, TokenKind::Number);
    }

    #[test]
    fn test_tokenize_skips_whitespace() {
        let tokens = tokenize("  x +  2 ").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["x", "+", "2"]);
    }

    #[test]
    fn test_tokenize_stray_symbol() {
        let err = tokenize("x+$2").unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedCharacter {
                character: '$',
                position: 2
            }
        );
    }

    #[test]
    fn test_tokenize_trailing_dot_is_not_decimal() {
        let err = tokenize("2.").unwrap_err();
        assert!(matches!(
            err,
            LexError::UnrecognizedCharacter { character: '.', .. }
        ));
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }
}
