use crate::file_processor::FileMetadata;
use crate::model::ParseSession;
use crate::validation::ValidationMetrics;
use std::time::Duration;

/// Validated configuration together with what it took to produce it
#[derive(Debug)]
pub struct PipelineResult {
    pub session: ParseSession,
    pub source_name: String,
    pub file_metadata: Option<FileMetadata>,
    pub validation_metrics: ValidationMetrics,
    pub line_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    /// Session and statistics as a JSON document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let document = serde_json::json!({
            "file": self.source_name,
            "lines": self.line_count,
            "duration_ms": self.processing_duration.as_secs_f64() * 1000.0,
            "configuration": self.session,
        });
        serde_json::to_string_pretty(&document)
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "RCI configuration processed",
            "file" => self.source_name,
            "groups" => self.session.group_count(),
            "lines" => self.line_count,
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
