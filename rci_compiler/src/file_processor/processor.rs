//! File processor with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .rci, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: &std::io::Error, path: &Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }
}

/// How the file bytes were decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Latin1,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "iso-8859-1",
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    /// Number of lines in file
    pub line_count: usize,
    pub is_rci_file: bool,
    pub encoding: SourceEncoding,
}

impl FileMetadata {
    /// File size in human-readable form
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Name used in diagnostics
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// File contents with metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Whether the file holds only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Every byte maps to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// File processor with compile-time limits and runtime preferences
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_rci_extension: bool,
    pub enable_performance_logging: bool,
    pub allow_latin1_fallback: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_rci_extension: false,
            enable_performance_logging: true,
            allow_latin1_fallback: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_rci_extension: prefs.require_rci_extension,
            enable_performance_logging: prefs.enable_performance_logging,
            allow_latin1_fallback: prefs.allow_latin1_fallback,
        }
    }

    pub fn with_rci_extension_required(mut self, required: bool) -> Self {
        self.require_rci_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_latin1_fallback(mut self, enabled: bool) -> Self {
        self.allow_latin1_fallback = enabled;
        self
    }

    /// Compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and return its decoded contents with metadata
    pub fn process_file(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let (size, extension) = self.stat(&path, file_path)?;

        let is_rci_file = extension.as_deref() == Some("rci");
        self.validate_file(size, extension.as_deref(), is_rci_file, file_path)?;

        let (source, encoding) = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT
            );
            return Err(error);
        }

        let result = FileProcessingResult {
            source,
            metadata: FileMetadata {
                path,
                size,
                extension,
                line_count,
                is_rci_file,
                encoding,
            },
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, file_path);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "encoding" => result.metadata.encoding.as_str(),
                "duration_ms" => duration_ms
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);
        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e
            );
            error
        })
    }

    fn stat(&self, path: &Path, file_path: &str) -> Result<(u64, Option<String>), FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => file_path,
                "io_error" => e
            );
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        Ok((metadata.len(), extension))
    }

    fn validate_file(
        &self,
        size: u64,
        extension: Option<&str>,
        is_rci_file: bool,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => size,
                "limit_bytes" => MAX_FILE_SIZE
            );
            return Err(error);
        }

        if size == 0 {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "file" => file_path);
            return Err(error);
        }

        if self.require_rci_extension && !is_rci_file {
            let error = FileProcessorError::InvalidExtension {
                extension: extension.map(str::to_string),
            };
            log_error!(error.error_code(), "File does not have required .rci extension",
                "file" => file_path,
                "extension" => extension.unwrap_or("none")
            );
            return Err(error);
        }

        Ok(())
    }

    fn read_file(
        &self,
        path: &Path,
        file_path: &str,
    ) -> Result<(String, SourceEncoding), FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "I/O error reading file",
                "file" => file_path,
                "io_error" => e
            );
            error
        })?;

        match String::from_utf8(bytes) {
            Ok(content) => Ok((content, SourceEncoding::Utf8)),
            Err(e) if self.allow_latin1_fallback => {
                log_warning!("File is not valid UTF-8, decoding as ISO-8859-1",
                    "file" => file_path,
                    "valid_up_to" => e.utf8_error().valid_up_to()
                );
                Ok((decode_latin1(e.as_bytes()), SourceEncoding::Latin1))
            }
            Err(_) => {
                let error = FileProcessorError::InvalidEncoding {
                    path: path.display().to_string(),
                };
                log_error!(error.error_code(), "Invalid UTF-8 encoding in file",
                    "file" => file_path
                );
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("device.rci");
        let content = "group setting g \"G\"\n element e \"E\" type uint32\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_rci_file);
        assert_eq!(result.metadata.encoding, SourceEncoding::Utf8);
        assert_eq!(result.metadata.file_name(), "device.rci");
        assert_eq!(result.char_count(), content.chars().count());
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().process_file("nonexistent.rci");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.rci");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::EmptyFile));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("device.txt");
        fs::write(&file_path, "group").unwrap();

        let lenient = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert!(lenient.is_ok());

        let strict = FileProcessor::new()
            .with_rci_extension_required(true)
            .process_file(file_path.to_str().unwrap());
        assert_matches!(
            strict,
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }

    #[test]
    fn test_latin1_fallback() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("latin.rci");
        fs::write(&file_path, b"group setting g \"Caf\xe9\"\n").unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();
        assert_eq!(result.metadata.encoding, SourceEncoding::Latin1);
        assert!(result.source.contains("Café"));

        let strict = FileProcessor::new()
            .with_latin1_fallback(false)
            .process_file(file_path.to_str().unwrap());
        assert_matches!(strict, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_error_metadata() {
        let error = FileProcessorError::FileNotFound {
            path: "x.rci".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(
            FileProcessorError::EmptyFile.error_code(),
            codes::file_processing::EMPTY_FILE
        );
    }

    #[test]
    fn test_preferences() {
        let prefs = FileProcessorPreferences {
            require_rci_extension: true,
            enable_performance_logging: false,
            allow_latin1_fallback: false,
        };
        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_rci_extension);
        assert!(!processor.enable_performance_logging);
        assert!(!processor.allow_latin1_fallback);
    }
}
