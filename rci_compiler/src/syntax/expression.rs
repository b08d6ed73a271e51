//! Integer arithmetic for parenthesized instance counts and bounds
//!
//! `(4*2+1)` may stand wherever a count or `min`/`max` integer is expected.
//! The expression may span several tokens; they are joined without spaces
//! until the parentheses balance.

use crate::config::compile_time::syntax::MAX_EXPRESSION_LENGTH;
use crate::lexical::TokenScanner;
use crate::logging::codes;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("Invalid Math Expression, missing ')'")]
    MissingCloseParen,

    #[error("Invalid Math Expression, missing '('")]
    MissingOpenParen,

    #[error("Bad Expression {expression}: {reason}")]
    Bad { expression: String, reason: String },

    #[error("Math expression longer than {max} characters")]
    TooLong { max: usize },
}

impl ExpressionError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::syntax::INVALID_EXPRESSION
    }
}

pub type ExpressionResult<T> = Result<T, ExpressionError>;

fn balance(text: &str) -> i64 {
    text.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

/// Join tokens from the scanner until the parentheses balance.
///
/// The caller has already seen that the next token starts with `(`.
pub fn read_expression(scanner: &mut TokenScanner<'_>) -> ExpressionResult<String> {
    let mut expression = String::new();

    loop {
        if !expression.is_empty() && scanner.peek_starts_with('"') {
            return Err(ExpressionError::MissingCloseParen);
        }
        let token = scanner
            .next_token()
            .ok_or(ExpressionError::MissingCloseParen)?;
        expression.push_str(token.text);

        if expression.chars().count() > MAX_EXPRESSION_LENGTH {
            return Err(ExpressionError::TooLong {
                max: MAX_EXPRESSION_LENGTH,
            });
        }

        match balance(&expression) {
            0 => return Ok(expression),
            depth if depth < 0 => return Err(ExpressionError::MissingOpenParen),
            _ => {}
        }
    }
}

/// Read a parenthesized expression and evaluate it
pub fn next_expression(scanner: &mut TokenScanner<'_>) -> ExpressionResult<i32> {
    let expression = read_expression(scanner)?;
    evaluate(&expression)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Number(i64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Open,
    Close,
}

impl Lexeme {
    fn precedence(self) -> Option<u8> {
        match self {
            Lexeme::Plus | Lexeme::Minus => Some(1),
            Lexeme::Star | Lexeme::Slash | Lexeme::Percent => Some(2),
            _ => None,
        }
    }
}

fn lex(expression: &str) -> Result<Vec<Lexeme>, String> {
    let mut lexemes = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let lexeme = match c {
            c if c.is_whitespace() => continue,
            '+' => Lexeme::Plus,
            '-' => Lexeme::Minus,
            '*' => Lexeme::Star,
            '/' => Lexeme::Slash,
            '%' => Lexeme::Percent,
            '(' => Lexeme::Open,
            ')' => Lexeme::Close,
            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some(&(i, next)) = chars.peek() {
                    if !next.is_ascii_alphanumeric() {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                Lexeme::Number(parse_literal(&expression[start..end])?)
            }
            other => return Err(format!("unexpected character '{}'", other)),
        };
        lexemes.push(lexeme);
    }

    Ok(lexemes)
}

fn parse_literal(literal: &str) -> Result<i64, String> {
    let parsed = match literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => literal.parse(),
    };
    parsed.map_err(|_| format!("invalid number '{}'", literal))
}

/// Precedence-climbing evaluator over the lexeme stream
struct Evaluator {
    lexemes: Vec<Lexeme>,
    position: usize,
}

impl Evaluator {
    fn peek(&self) -> Option<Lexeme> {
        self.lexemes.get(self.position).copied()
    }

    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = self.peek();
        self.position += 1;
        lexeme
    }

    fn expression(&mut self, min_precedence: u8) -> Result<i64, String> {
        let mut lhs = self.operand()?;

        while let Some(op) = self.peek() {
            let precedence = match op.precedence() {
                Some(p) if p >= min_precedence => p,
                _ => break,
            };
            self.position += 1;
            let rhs = self.expression(precedence + 1)?;
            lhs = apply(op, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn operand(&mut self) -> Result<i64, String> {
        match self.next() {
            Some(Lexeme::Number(n)) => Ok(n),
            Some(Lexeme::Minus) => self
                .operand()?
                .checked_neg()
                .ok_or_else(|| "overflow".to_string()),
            Some(Lexeme::Plus) => self.operand(),
            Some(Lexeme::Open) => {
                let value = self.expression(1)?;
                match self.next() {
                    Some(Lexeme::Close) => Ok(value),
                    _ => Err("expected ')'".to_string()),
                }
            }
            Some(other) => Err(format!("unexpected {:?}", other)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

fn apply(op: Lexeme, lhs: i64, rhs: i64) -> Result<i64, String> {
    let result = match op {
        Lexeme::Plus => lhs.checked_add(rhs),
        Lexeme::Minus => lhs.checked_sub(rhs),
        Lexeme::Star => lhs.checked_mul(rhs),
        Lexeme::Slash | Lexeme::Percent if rhs == 0 => {
            return Err("division by zero".to_string())
        }
        Lexeme::Slash => lhs.checked_div(rhs),
        Lexeme::Percent => lhs.checked_rem(rhs),
        _ => return Err(format!("unexpected {:?}", op)),
    };
    result.ok_or_else(|| "overflow".to_string())
}

/// Evaluate an integer expression with `+ - * / %`, unary sign and
/// parentheses. Division truncates toward zero.
pub fn evaluate(expression: &str) -> ExpressionResult<i32> {
    let bad = |reason: String| ExpressionError::Bad {
        expression: expression.to_string(),
        reason,
    };

    let mut evaluator = Evaluator {
        lexemes: lex(expression).map_err(bad)?,
        position: 0,
    };
    let value = evaluator.expression(1).map_err(bad)?;

    if evaluator.position < evaluator.lexemes.len() {
        return Err(bad("trailing input".to_string()));
    }

    i32::try_from(value).map_err(|_| bad("result does not fit in 32 bits".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(evaluate("(2+3*4)").unwrap(), 14);
        assert_eq!(evaluate("((2+3)*4)").unwrap(), 20);
        assert_eq!(evaluate("(10-4-3)").unwrap(), 3);
        assert_eq!(evaluate("(7/2)").unwrap(), 3);
        assert_eq!(evaluate("(-7/2)").unwrap(), -3);
        assert_eq!(evaluate("(17%5)").unwrap(), 2);
        assert_eq!(evaluate("(0x10+1)").unwrap(), 17);
        assert_eq!(evaluate("(-(3))").unwrap(), -3);
    }

    #[test]
    fn test_evaluation_failures() {
        assert_matches!(evaluate("(1/0)"), Err(ExpressionError::Bad { .. }));
        assert_matches!(evaluate("(2+)"), Err(ExpressionError::Bad { .. }));
        assert_matches!(evaluate("(a+1)"), Err(ExpressionError::Bad { .. }));
        assert_matches!(evaluate("(1)(2)"), Err(ExpressionError::Bad { .. }));

        let error = evaluate("(4294967296)").unwrap_err();
        assert!(error.to_string().starts_with("Bad Expression (4294967296)"));
    }

    #[test]
    fn test_read_joins_tokens_until_balanced() {
        let mut scanner = TokenScanner::new("(2 * (3 + 1)) \"desc\"").unwrap();
        assert_eq!(read_expression(&mut scanner).unwrap(), "(2*(3+1))");
        assert_eq!(scanner.next_quoted(), Some("desc"));
    }

    #[test]
    fn test_read_stops_at_quote_or_end() {
        let mut scanner = TokenScanner::new("(2 * 3 \"desc\"").unwrap();
        assert_eq!(
            read_expression(&mut scanner),
            Err(ExpressionError::MissingCloseParen)
        );

        let mut scanner = TokenScanner::new("(2 *\n 3").unwrap();
        assert_eq!(
            read_expression(&mut scanner),
            Err(ExpressionError::MissingCloseParen)
        );
    }

    #[test]
    fn test_read_rejects_excess_close() {
        let mut scanner = TokenScanner::new("(2))").unwrap();
        assert_eq!(
            read_expression(&mut scanner).unwrap_err().to_string(),
            "Invalid Math Expression, missing '('"
        );
    }

    #[test]
    fn test_next_expression() {
        let mut scanner = TokenScanner::new("(3 * 4) rest").unwrap();
        assert_eq!(next_expression(&mut scanner).unwrap(), 12);
        assert_eq!(scanner.next_token().map(|t| t.text), Some("rest"));
    }
}
