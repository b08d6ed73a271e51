use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::syntax::ParseError;
use crate::validation::ValidationError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] ParseError),

    #[error("Cross-reference validation failed: {source}")]
    Validation {
        #[source]
        source: ValidationError,
        line: usize,
    },

    #[error("No groups specified in file: {file}")]
    NoGroups { file: String },
}

impl PipelineError {
    /// Source line the failure is attributed to, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            PipelineError::FileProcessing(_) | PipelineError::NoGroups { .. } => None,
            PipelineError::LexicalAnalysis(error) => Some(error.line()),
            PipelineError::SyntaxAnalysis(error) => Some(error.line()),
            PipelineError::Validation { line, .. } => Some(*line),
        }
    }

    /// The stage error's own message without the stage prefix
    pub fn message(&self) -> String {
        match self {
            PipelineError::FileProcessing(error) => error.to_string(),
            PipelineError::LexicalAnalysis(error) => error.to_string(),
            PipelineError::SyntaxAnalysis(error) => error.to_string(),
            PipelineError::Validation { source, .. } => source.to_string(),
            PipelineError::NoGroups { .. } => self.to_string(),
        }
    }

    /// `Error found in <file>, line <n>: <message>`
    pub fn diagnostic(&self, file: &str) -> String {
        match self.line() {
            Some(line) => format!("Error found in {}, line {}: {}", file, line, self.message()),
            None => format!("Error found in {}: {}", file, self.message()),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(error) => error.error_code(),
            PipelineError::LexicalAnalysis(error) => error.error_code(),
            PipelineError::SyntaxAnalysis(error) => error.error_code(),
            PipelineError::Validation { source, .. } => source.error_code(),
            PipelineError::NoGroups { .. } => codes::structural::NO_GROUPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ParseErrorKind;

    #[test]
    fn test_diagnostic_with_line() {
        let error = PipelineError::from(ParseError::new(
            ParseErrorKind::UnrecognizedKeyword {
                keyword: "grup".to_string(),
            },
            3,
        ));
        assert_eq!(error.line(), Some(3));
        assert!(error
            .diagnostic("device.rci")
            .starts_with("Error found in device.rci, line 3: "));
        assert!(error.diagnostic("device.rci").ends_with("grup"));
    }

    #[test]
    fn test_diagnostic_without_line() {
        let error = PipelineError::NoGroups {
            file: "device.rci".to_string(),
        };
        assert_eq!(error.line(), None);
        assert_eq!(
            error.diagnostic("device.rci"),
            "Error found in device.rci: No groups specified in file: device.rci"
        );
        assert_eq!(error.error_code(), codes::structural::NO_GROUPS);
    }

    #[test]
    fn test_validation_error_keeps_line() {
        let error = PipelineError::Validation {
            source: ValidationError::ConditionPathInvalid {
                name: "c1".to_string(),
            },
            line: 12,
        };
        assert_eq!(
            error.diagnostic("a.rci"),
            "Error found in a.rci, line 12: conditional source path is invalid: c1"
        );
    }
}
