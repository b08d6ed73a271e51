// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Limits handed to the parser before it starts.
///
/// These are the three knobs the descriptor generator exposes on its command
/// line. They are fixed for the lifetime of a [`crate::model::ParseSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorLimits {
    /// Maximum length of an attribute value in the generated descriptor
    pub max_attribute_length: usize,

    /// Maximum length of any element, collection or value name
    pub max_name_length: usize,

    /// Maximum key length for dynamic dictionaries, 0 disables them
    pub max_dynamic_key_length: usize,
}

impl GeneratorLimits {
    pub const DEFAULT_ATTRIBUTE_LENGTH: usize = 20;
    pub const DEFAULT_NAME_LENGTH: usize = 40;

    /// Limits with built-in defaults, ignoring the environment
    pub fn builtin() -> Self {
        Self {
            max_attribute_length: Self::DEFAULT_ATTRIBUTE_LENGTH,
            max_name_length: Self::DEFAULT_NAME_LENGTH,
            max_dynamic_key_length: 0,
        }
    }

    pub fn with_max_name_length(mut self, length: usize) -> Self {
        self.max_name_length = length;
        self
    }

    pub fn with_max_dynamic_key_length(mut self, length: usize) -> Self {
        self.max_dynamic_key_length = length;
        self
    }

    pub fn with_max_attribute_length(mut self, length: usize) -> Self {
        self.max_attribute_length = length;
        self
    }

    pub fn dynamic_keys_enabled(&self) -> bool {
        self.max_dynamic_key_length > 0
    }
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_attribute_length: env::var(env_vars::MAX_ATTRIBUTE_LENGTH)
                .ok()
                .and_then(|v| parse_positive(&v))
                .unwrap_or(Self::DEFAULT_ATTRIBUTE_LENGTH),
            max_name_length: env::var(env_vars::MAX_NAME_LENGTH)
                .ok()
                .and_then(|v| parse_positive(&v))
                .unwrap_or(Self::DEFAULT_NAME_LENGTH),
            max_dynamic_key_length: env::var(env_vars::MAX_KEY_LENGTH)
                .ok()
                .and_then(|v| parse_positive(&v))
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require the .rci extension
    pub require_rci_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,

    /// Whether to accept ISO-8859-1 input that is not valid UTF-8
    pub allow_latin1_fallback: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_rci_extension: env::var(env_vars::REQUIRE_RCI_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            allow_latin1_fallback: env::var(env_vars::ALLOW_LATIN1_FALLBACK)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level an event needs to be emitted
    pub min_log_level: LogLevel,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Parse a strictly positive integer option value
pub fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub limits: GeneratorLimits,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load a runtime configuration from a TOML file.
    ///
    /// Sections missing from the file fall back to their environment-driven
    /// defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| RuntimeConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Generator limits
    pub const MAX_NAME_LENGTH: &str = "RCI_MAX_NAME_LENGTH";
    pub const MAX_KEY_LENGTH: &str = "RCI_MAX_KEY_LENGTH";
    pub const MAX_ATTRIBUTE_LENGTH: &str = "RCI_MAX_ATTRIBUTE_LENGTH";

    // File Processor
    pub const REQUIRE_RCI_EXTENSION: &str = "RCI_REQUIRE_RCI_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "RCI_ENABLE_PERFORMANCE_LOGGING";
    pub const ALLOW_LATIN1_FALLBACK: &str = "RCI_ALLOW_LATIN1_FALLBACK";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RCI_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RCI_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RCI_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "RCI_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_parse_positive_rejects_zero_and_garbage() {
        assert_eq!(parse_positive("32"), Some(32));
        assert_eq!(parse_positive(" 7 "), Some(7));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-4"), None);
        assert_eq!(parse_positive("ten"), None);
    }

    #[test]
    fn test_builtin_limits() {
        let limits = GeneratorLimits::builtin();
        assert_eq!(limits.max_attribute_length, 20);
        assert_eq!(limits.max_name_length, 40);
        assert_eq!(limits.max_dynamic_key_length, 0);
        assert!(!limits.dynamic_keys_enabled());
        assert!(limits.with_max_dynamic_key_length(16).dynamic_keys_enabled());
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[limits]\nmax_attribute_length = 24\nmax_name_length = 32\nmax_dynamic_key_length = 8\n\n[logging]\nmin_log_level = \"debug\""
        )
        .unwrap();

        let config = RuntimeConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.limits.max_name_length, 32);
        assert_eq!(config.limits.max_dynamic_key_length, 8);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_runtime_config_missing_file() {
        let result = RuntimeConfig::from_toml_file("/nonexistent/rci.toml");
        assert!(matches!(result, Err(RuntimeConfigError::Read { .. })));
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::MAX_KEY_LENGTH.starts_with("RCI_"));
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
    }
}
