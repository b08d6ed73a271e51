//! File to validated configuration: read, scan, parse, cross-reference

mod error;
mod result;

pub use error::PipelineError;
pub use result::PipelineResult;

use crate::config::GeneratorLimits;
use crate::file_processor::{FileMetadata, FileProcessor};
use crate::lexical::TokenScanner;
use crate::logging;
use crate::model::ParseSession;
use std::path::PathBuf;
use std::time::Instant;

fn run(
    source_name: &str,
    mut scanner: TokenScanner<'_>,
    limits: GeneratorLimits,
    file_metadata: Option<FileMetadata>,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError> {
    let mut session = ParseSession::new(limits);

    crate::syntax::parse_source(&mut scanner, &mut session)?;

    if session.group_count() == 0 {
        let error = PipelineError::NoGroups {
            file: source_name.to_string(),
        };
        crate::log_error!(error.error_code(), &error.to_string());
        return Err(error);
    }

    let line_count = scanner.line_number();
    let validation_metrics =
        crate::validation::validate(&mut session).map_err(|source| PipelineError::Validation {
            source,
            line: line_count,
        })?;

    let result = PipelineResult {
        session,
        source_name: source_name.to_string(),
        file_metadata,
        validation_metrics,
        line_count,
        processing_duration: start_time.elapsed(),
    };
    result.log_success();
    Ok(result)
}

/// Process source text that did not come from the file processor
pub fn process_source(
    source_name: &str,
    source: &str,
    limits: GeneratorLimits,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    logging::with_file_context(PathBuf::from(source_name), 0, || {
        crate::log_info!("Processing RCI source", "source" => source_name);
        let scanner = TokenScanner::new(source)?;
        run(source_name, scanner, limits, None, start_time)
    })
}

/// Process a file through the complete pipeline with the given processor
pub fn process_file_with(
    processor: &FileProcessor,
    file_path: &str,
    limits: GeneratorLimits,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting RCI file processing pipeline", "file" => file_path);

        let file_result = processor.process_file(file_path)?;
        let scanner = crate::lexical::scan_file_result(&file_result)?;

        run(
            &file_result.metadata.file_name(),
            scanner,
            limits,
            Some(file_result.metadata.clone()),
            start_time,
        )
    })
}

/// Process a single file with default file-processing settings
pub fn process_file(file_path: &str, limits: GeneratorLimits) -> Result<PipelineResult, PipelineError> {
    process_file_with(&FileProcessor::new(), file_path, limits)
}
