//! Lexical errors

use crate::logging::codes;

/// Failures raised while reading tokens
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Not an integer (expect an integer value): {token}")]
    NotAnInteger { token: String, line: usize },

    #[error("Token too long on line {line}: {length} characters (max {max})")]
    TokenTooLong {
        line: usize,
        length: usize,
        max: usize,
    },

    #[error("Token pushed back while another is pending on line {line}")]
    PushbackOccupied { line: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::NotAnInteger { .. } => codes::lexical::INVALID_NUMBER,
            LexerError::TokenTooLong { .. } => codes::lexical::TOKEN_TOO_LONG,
            LexerError::PushbackOccupied { .. } => codes::lexical::PUSHBACK_OVERFLOW,
        }
    }

    /// Line the error was detected on
    pub fn line(&self) -> usize {
        match self {
            LexerError::NotAnInteger { line, .. }
            | LexerError::TokenTooLong { line, .. }
            | LexerError::PushbackOccupied { line } => *line,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }
}

pub type LexResult<T> = Result<T, LexerError>;
