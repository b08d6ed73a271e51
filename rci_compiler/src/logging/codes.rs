//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Token scanner error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_NUMBER: Code = Code::new("E020");
    pub const TOKEN_TOO_LONG: Code = Code::new("E021");
    pub const PUSHBACK_OVERFLOW: Code = Code::new("E022");
}

/// Statement grammar error codes
pub mod syntax {
    use super::Code;

    pub const UNRECOGNIZED_KEYWORD: Code = Code::new("E040");
    pub const MISSING_TOKEN: Code = Code::new("E041");
    pub const INVALID_EXPRESSION: Code = Code::new("E042");
    pub const INVALID_DESCRIPTION: Code = Code::new("E043");
    pub const INVALID_KEYWORD_VALUE: Code = Code::new("E044");
    pub const DUPLICATE_KEYWORD: Code = Code::new("E045");
    pub const MAX_NESTING_DEPTH: Code = Code::new("E046");
}

/// Identifier and uniqueness error codes
pub mod naming {
    use super::Code;

    pub const MISSING_NAME: Code = Code::new("E060");
    pub const NAME_TOO_LONG: Code = Code::new("E061");
    pub const INVALID_NAME: Code = Code::new("E062");
    pub const DUPLICATE_NAME: Code = Code::new("E063");
    pub const RESERVED_NAME: Code = Code::new("E064");
}

/// Element type and range error codes
pub mod model {
    use super::Code;

    pub const MISSING_TYPE: Code = Code::new("E080");
    pub const UNSUPPORTED_RANGE: Code = Code::new("E081");
    pub const VALUE_OUT_OF_RANGE: Code = Code::new("E082");
    pub const INVALID_VALUE: Code = Code::new("E083");
    pub const INVALID_DEFAULT: Code = Code::new("E084");
    pub const INVALID_PATTERN: Code = Code::new("E085");
}

/// Collection structure error codes
pub mod structural {
    use super::Code;

    pub const EMPTY_COLLECTION: Code = Code::new("E100");
    pub const COUNT_AND_KEYS: Code = Code::new("E101");
    pub const DYNAMIC_KEYS_DISABLED: Code = Code::new("E102");
    pub const INVALID_INSTANCES: Code = Code::new("E103");
    pub const UNSUPPORTED_DICTIONARY: Code = Code::new("E104");
    pub const NO_GROUPS: Code = Code::new("E105");
}

/// Cross-reference error codes
pub mod references {
    use super::Code;

    pub const UNDEFINED_CONDITION: Code = Code::new("E120");
    pub const INVALID_REF_ENUM_PATH: Code = Code::new("E121");
    pub const UNRESOLVED_REF_ENUM: Code = Code::new("E122");
    pub const CONDITION_PATH_INVALID: Code = Code::new("E123");
    pub const CONDITION_NOT_ELEMENT: Code = Code::new("E124");
    pub const RELATIVE_PATH_ERROR: Code = Code::new("E125");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");

    // Parse success codes
    pub const SCAN_STARTED: Code = Code::new("I020");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const GROUP_REGISTERED: Code = Code::new("I041");
    pub const CONDITION_REGISTERED: Code = Code::new("I042");

    // Cross-reference success codes
    pub const REF_ENUM_RESOLUTION_COMPLETE: Code = Code::new("I060");
    pub const CONDITION_RESOLUTION_COMPLETE: Code = Code::new("I061");
    pub const VALIDATION_COMPLETE: Code = Code::new("I080");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn register(registry: &mut HashMap<&'static str, ErrorMetadata>, metadata: ErrorMetadata) {
    registry.insert(metadata.code, metadata);
}

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the input that triggered it",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Initialization failure",
                "Check logging and runtime configuration",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR003",
                "System",
                Severity::High,
                false,
                true,
                "Invalid runtime configuration",
                "Fix the configuration file or RCI_* environment variables",
            ),
        );

        // File processing errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File does not have .rci extension",
                "Rename the file or disable RCI_REQUIRE_RCI_EXTENSION",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Split the configuration or rebuild with a larger limit",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File is empty",
                "Provide a configuration file with at least one group",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File is neither UTF-8 nor accepted as ISO-8859-1",
                "Convert the file to UTF-8 or enable the Latin-1 fallback",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error while reading file",
                "Check file system health and retry",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Path is not a regular file",
                "Pass the path of a configuration file",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E013",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum line count",
                "Split the configuration or rebuild with a larger limit",
            ),
        );

        // Lexical errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::High,
                false,
                true,
                "Integer expected",
                "Supply a decimal integer",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "Token exceeds maximum length",
                "Shorten the token",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Critical,
                false,
                true,
                "Token pushback already occupied",
                "File a bug report with the input that triggered it",
            ),
        );

        // Syntax errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                false,
                true,
                "Unrecognized keyword",
                "Use globalerror, condition or group at the top level",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::High,
                false,
                true,
                "Required token missing",
                "Complete the statement",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::High,
                false,
                true,
                "Invalid arithmetic expression",
                "Balance parentheses and use only integers and + - * /",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::High,
                false,
                true,
                "Invalid description",
                "Use a quoted Latin-1 description of at most 200 characters",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::High,
                false,
                true,
                "Invalid keyword value",
                "Use one of the values accepted by the keyword",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::High,
                false,
                true,
                "Keyword given more than once",
                "Remove the repeated keyword",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E046",
                "Syntax",
                Severity::High,
                false,
                true,
                "List nesting too deep",
                "Flatten nested lists",
            ),
        );

        // Naming errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E060",
                "Naming",
                Severity::High,
                false,
                true,
                "Name missing",
                "Supply a name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E061",
                "Naming",
                Severity::High,
                false,
                true,
                "Name exceeds maximum length",
                "Shorten the name or raise --max-name-length",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E062",
                "Naming",
                Severity::High,
                false,
                true,
                "Name contains invalid characters",
                "Use letters, digits, '_', ':', '.', and '-'",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E063",
                "Naming",
                Severity::High,
                false,
                true,
                "Duplicate name",
                "Rename one of the conflicting definitions",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E064",
                "Naming",
                Severity::High,
                false,
                true,
                "Reserved name",
                "Do not name items 'error' or 'warning'",
            ),
        );

        // Model errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E080",
                "Model",
                Severity::High,
                false,
                true,
                "Element type missing",
                "Add a type keyword to the element",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E081",
                "Model",
                Severity::High,
                false,
                true,
                "min/max not supported or missing for element type",
                "Check which types accept min and max",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E082",
                "Model",
                Severity::High,
                false,
                true,
                "Value outside allowed range",
                "Adjust min, max or default",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E083",
                "Model",
                Severity::High,
                false,
                true,
                "Malformed value",
                "Use a valid numeral for the element type",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E084",
                "Model",
                Severity::High,
                false,
                true,
                "Invalid default value",
                "Use a default accepted by the element type",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E085",
                "Model",
                Severity::High,
                false,
                true,
                "Invalid regular expression",
                "Fix the pattern or add the missing syntax keyword",
            ),
        );

        // Structural errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E100",
                "Structural",
                Severity::High,
                false,
                true,
                "Collection has no items",
                "Add at least one element or list",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E101",
                "Structural",
                Severity::High,
                false,
                true,
                "Count and keys both specified",
                "Use either an instance count or keys",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E102",
                "Structural",
                Severity::High,
                false,
                true,
                "Dynamic dictionary without a key length",
                "Pass --max-key-length",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E103",
                "Structural",
                Severity::High,
                false,
                true,
                "Invalid instance count",
                "Use a positive instance count",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E104",
                "Structural",
                Severity::High,
                false,
                true,
                "Unsupported dictionary form",
                "Use keys {} with variable capacity",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E105",
                "Structural",
                Severity::High,
                false,
                true,
                "No groups in file",
                "Declare at least one setting or state group",
            ),
        );

        // Reference errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E120",
                "References",
                Severity::High,
                false,
                true,
                "Condition not declared",
                "Declare the condition before attaching it",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E121",
                "References",
                Severity::High,
                false,
                true,
                "Malformed ref_enum path",
                "Use an absolute path of value names or '*'",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E122",
                "References",
                Severity::High,
                false,
                true,
                "ref_enum reference does not resolve to a dictionary",
                "Point the reference at a dictionary in a setting group",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E123",
                "References",
                Severity::High,
                false,
                true,
                "Condition source path does not resolve",
                "Fix the condition source path",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E124",
                "References",
                Severity::High,
                false,
                true,
                "Condition source is not an element",
                "Point the condition source at an element",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E125",
                "References",
                Severity::High,
                false,
                true,
                "Relative path cannot be computed",
                "Attach conditions only to nodes in the same table as their source",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_codes_have_metadata() {
        for code in [
            file_processing::FILE_NOT_FOUND,
            lexical::INVALID_NUMBER,
            syntax::UNRECOGNIZED_KEYWORD,
            naming::DUPLICATE_NAME,
            model::VALUE_OUT_OF_RANGE,
            structural::DYNAMIC_KEYS_DISABLED,
            references::CONDITION_PATH_INVALID,
        ] {
            assert!(get_error_metadata(code.as_str()).is_some(), "{}", code);
        }
    }

    #[test]
    fn test_classification_defaults() {
        assert_eq!(get_description("NOPE"), "Unknown error");
        assert_eq!(get_category("NOPE"), "Unknown");
        assert_eq!(get_severity("NOPE"), Severity::Medium);
        assert!(is_recoverable("NOPE"));
    }

    #[test]
    fn test_halting_codes() {
        assert!(requires_halt(naming::DUPLICATE_NAME.as_str()));
        assert!(!requires_halt(file_processing::INVALID_EXTENSION.as_str()));
        assert_eq!(get_category(references::CONDITION_NOT_ELEMENT.as_str()), "References");
    }
}
