//! Reading RCI source files under compile-time size limits

mod processor;

use crate::config::runtime::FileProcessorPreferences;
pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, SourceEncoding,
};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Compile-time maximum file size
pub fn get_max_file_size() -> u64 {
    FileProcessor::max_file_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.rci");
        fs::write(&file_path, "group setting g \"G\" element e \"E\" type uint32\n").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_compile_time_limit() {
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
        assert!(get_max_file_size() > 0);
    }
}
