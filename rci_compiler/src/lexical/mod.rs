//! Lexical analysis for RCI configuration sources
//!
//! Splits source text into whitespace-delimited tokens with a single
//! pushback slot and quote-aware string reads.

pub mod error;
pub mod scanner;

use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::{log_error, log_success};

pub use error::{LexResult, LexerError};
pub use scanner::{Token, TokenScanner};

/// Create a scanner over a processed file's source
pub fn scan_file_result(file_result: &FileProcessingResult) -> LexResult<TokenScanner<'_>> {
    match TokenScanner::new(&file_result.source) {
        Ok(scanner) => {
            log_success!(codes::success::SCAN_STARTED, "Token scanner ready",
                "file" => file_result.metadata.path.display(),
                "lines" => file_result.metadata.line_count
            );
            Ok(scanner)
        }
        Err(error) => {
            log_error!(error.error_code(), &error.to_string(),
                "line" => error.line()
            );
            Err(error)
        }
    }
}
