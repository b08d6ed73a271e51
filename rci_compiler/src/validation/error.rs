//! Errors from the cross-reference pass

use crate::logging::{codes, Code};
use crate::model::Location;

pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("ref_enum has invalid reference: {reference}")]
    InvalidReference { reference: String },

    #[error("conditional source path does not end at an element: {name}")]
    ConditionNotAtElement { name: String },

    #[error("conditional source path is invalid: {name}")]
    ConditionPathInvalid { name: String },

    #[error("ref_enum element not found: {location}")]
    MissingRefEnum { location: Location },
}

impl ValidationError {
    pub fn error_code(&self) -> Code {
        match self {
            ValidationError::InvalidReference { .. } => codes::references::UNRESOLVED_REF_ENUM,
            ValidationError::ConditionNotAtElement { .. } => {
                codes::references::CONDITION_NOT_ELEMENT
            }
            ValidationError::ConditionPathInvalid { .. } => {
                codes::references::CONDITION_PATH_INVALID
            }
            ValidationError::MissingRefEnum { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
