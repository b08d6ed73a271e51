//! Named visibility predicates over another node's value

use super::error::{ModelError, ModelResult};
use super::location::Location;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Equals,
    Regex,
}

impl Operation {
    pub fn parse(value: &str) -> ModelResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "equals" => Ok(Operation::Equals),
            "regex" => Ok(Operation::Regex),
            _ => Err(ModelError::InvalidOperation {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Equals => "equals",
            Operation::Regex => "regex",
        }
    }
}

/// Case sensitivity of a regular expression match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegexCase {
    #[default]
    Match,
    Ignore,
}

impl RegexCase {
    pub fn parse(value: &str) -> ModelResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "match" => Ok(RegexCase::Match),
            "ignore" => Ok(RegexCase::Ignore),
            _ => Err(ModelError::InvalidRegexCase {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegexCase::Match => "match",
            RegexCase::Ignore => "ignore",
        }
    }
}

impl fmt::Display for RegexCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Predicate {
    Equals { value: String },
    Regex { pattern: String, case: RegexCase },
}

impl Predicate {
    pub fn operation(&self) -> Operation {
        match self {
            Predicate::Equals { .. } => Operation::Equals,
            Predicate::Regex { .. } => Operation::Regex,
        }
    }
}

/// A predicate over the value found at `source`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    name: String,
    source: Location,
    #[serde(flatten)]
    predicate: Predicate,
}

impl Condition {
    pub fn new(name: impl Into<String>, source: Location, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            source,
            predicate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Location {
        &self.source
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_operation_and_case_parsing() {
        assert_eq!(Operation::parse("REGEX"), Ok(Operation::Regex));
        assert_eq!(Operation::default(), Operation::Equals);
        assert_matches!(
            Operation::parse("contains"),
            Err(ModelError::InvalidOperation { .. })
        );
        assert_eq!(RegexCase::parse("Ignore"), Ok(RegexCase::Ignore));
        assert_eq!(
            RegexCase::parse("maybe").unwrap_err().to_string(),
            "Invalid condition Type: maybe"
        );
    }

    #[test]
    fn test_condition_serializes_flat_predicate() {
        let condition = Condition::new(
            "is_static",
            Location::parse("/network/mode").unwrap(),
            Predicate::Regex {
                pattern: "(static|manual)".to_string(),
                case: RegexCase::Ignore,
            },
        );
        assert_eq!(condition.predicate().operation(), Operation::Regex);

        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["operation"], "regex");
        assert_eq!(json["case"], "ignore");
        assert_eq!(json["source"]["path"][1], "mode");
    }
}
