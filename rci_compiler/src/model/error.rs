//! Errors raised by the configuration model while nodes are built and
//! locally validated

use super::element::ElementType;
use crate::logging::codes;
use std::fmt;

/// Which numeric bound a range error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
    Default,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bound::Min => "min",
            Bound::Max => "max",
            Bound::Default => "default",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    // ---- items ----
    #[error("Missing or bad description")]
    MissingDescription,

    #[error("Invalid name: {name}")]
    ReservedName { name: String },

    #[error("Invalid access Type: {value}")]
    InvalidAccess { value: String },

    #[error("Duplicate <access> keyword: {value}")]
    DuplicateAccess { value: String },

    #[error("Condition not found: {name}")]
    ConditionNotFound { name: String },

    #[error("Duplicate <condition> keyword: {name}")]
    DuplicateConditionKeyword { name: String },

    // ---- locations and conditions ----
    #[error("Invalid group Type: {value}")]
    InvalidTableType { value: String },

    #[error("Unable to make relative path: setting/state mismatch")]
    TableMismatch,

    #[error("Unable to make relative path: common object")]
    CommonObject,

    #[error("Invalid <condition> operation: {value}")]
    InvalidOperation { value: String },

    #[error("Invalid condition Type: {value}")]
    InvalidRegexCase { value: String },

    // ---- elements ----
    #[error("Invalid element Type: {value}")]
    InvalidElementType { value: String },

    #[error("Duplicate <{keyword}> keyword: {value}")]
    DuplicateKeyword { keyword: &'static str, value: String },

    #[error("Missing type of enum or ref_enum on element: {element}")]
    ValueWithoutType { element: String },

    #[error("Invalid <value> for type: {element_type}")]
    ValueNotAllowed { element_type: ElementType },

    #[error("Duplicate <value>: {name}")]
    DuplicateValue { name: String },

    #[error("Invalid regex pattern: {reason}")]
    InvalidPattern { reason: String },

    #[error("Missing <type>")]
    MissingType,

    #[error("{bound} is not supported")]
    RangeNotSupported { bound: Bound },

    #[error("max is required")]
    MaxRequired,

    #[error("Regular expressions require both a 'pattern' and a 'syntax' keyword")]
    IncompleteRegex,

    #[error("No values found for enum type")]
    NoEnumValues,

    #[error("No values or references found for ref_enum type")]
    NoRefEnumValues,

    #[error("default enumeration value not found")]
    DefaultNotEnumerated,

    #[error("Bad default {element_type} value")]
    BadDefaultLiteral { element_type: ElementType },

    #[error("invalid IPv4 address")]
    InvalidIpv4,

    #[error("invalid FQDN address")]
    InvalidFqdn,

    #[error("Default value is invalid for <list>")]
    ListDefault,

    #[error("Default value is unsupported for {element_type}")]
    DefaultUnsupported { element_type: ElementType },

    #[error("{bound} value invalid")]
    ValueInvalid { bound: Bound },

    #[error("{bound} value is below protocol minimum")]
    BelowMinimum { bound: Bound },

    #[error("{bound} value is above protocol maximum")]
    AboveMaximum { bound: Bound },

    #[error("min value > max value")]
    MinAboveMax,

    #[error("default value is out of range")]
    DefaultOutOfRange,

    // ---- lists and groups ----
    #[error("Invalid instance count for: {name}")]
    InvalidInstances { name: String },

    #[error("Duplicate name: {name}")]
    DuplicateItem { name: String },

    #[error("Count and keys both specified")]
    CountAndKeys,

    #[error("fixed dictionaries are not supported")]
    FixedDictionary,

    #[error("max key length must be specified on the command line when using dynamic dictionaries")]
    DynamicKeysDisabled,

    #[error("No items specified")]
    NoItems,

    #[error("Duplicate <error>: {name}")]
    DuplicateError { name: String },

    #[error("Missing or bad error description")]
    MissingErrorDescription,

    // ---- session registries ----
    #[error("Missing or bad globalerror description")]
    MissingGlobalErrorDescription,

    #[error("Existing protocol error <globalerror>: {name}")]
    ProtocolErrorName { name: String },

    #[error("Duplicate <globalerror>: {name}")]
    DuplicateGlobalError { name: String },

    #[error("Duplicate <group> name: {name}")]
    DuplicateGroup { name: String },

    #[error("Duplicate <condition> name: {name}")]
    DuplicateCondition { name: String },
}

impl ModelError {
    pub fn error_code(&self) -> crate::logging::Code {
        use ModelError::*;

        match self {
            MissingDescription | MissingErrorDescription | MissingGlobalErrorDescription => {
                codes::syntax::INVALID_DESCRIPTION
            }
            ReservedName { .. } => codes::naming::RESERVED_NAME,
            InvalidAccess { .. }
            | InvalidTableType { .. }
            | InvalidOperation { .. }
            | InvalidRegexCase { .. }
            | InvalidElementType { .. } => codes::syntax::INVALID_KEYWORD_VALUE,
            DuplicateAccess { .. }
            | DuplicateKeyword { .. }
            | DuplicateConditionKeyword { .. } => codes::syntax::DUPLICATE_KEYWORD,
            ConditionNotFound { .. } => codes::references::UNDEFINED_CONDITION,
            TableMismatch | CommonObject => codes::references::RELATIVE_PATH_ERROR,
            ValueWithoutType { .. } | MissingType => codes::model::MISSING_TYPE,
            ValueNotAllowed { .. } | ValueInvalid { .. } => codes::model::INVALID_VALUE,
            DuplicateValue { .. }
            | DuplicateItem { .. }
            | DuplicateError { .. }
            | ProtocolErrorName { .. }
            | DuplicateGlobalError { .. }
            | DuplicateGroup { .. }
            | DuplicateCondition { .. } => codes::naming::DUPLICATE_NAME,
            InvalidPattern { .. } | IncompleteRegex => codes::model::INVALID_PATTERN,
            RangeNotSupported { .. } | MaxRequired => codes::model::UNSUPPORTED_RANGE,
            NoEnumValues | NoRefEnumValues | NoItems => codes::structural::EMPTY_COLLECTION,
            DefaultNotEnumerated
            | BadDefaultLiteral { .. }
            | InvalidIpv4
            | InvalidFqdn
            | ListDefault
            | DefaultUnsupported { .. } => codes::model::INVALID_DEFAULT,
            BelowMinimum { .. } | AboveMaximum { .. } | MinAboveMax | DefaultOutOfRange => {
                codes::model::VALUE_OUT_OF_RANGE
            }
            InvalidInstances { .. } => codes::structural::INVALID_INSTANCES,
            CountAndKeys => codes::structural::COUNT_AND_KEYS,
            FixedDictionary => codes::structural::UNSUPPORTED_DICTIONARY,
            DynamicKeysDisabled => codes::structural::DYNAMIC_KEYS_DISABLED,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
