//! Parse errors with the construct and line they belong to

use super::expression::ExpressionError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::model::ModelError;
use std::fmt;

/// Statement kinds that own the line an error is reported on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Group,
    Element,
    Condition,
    List,
}

impl Construct {
    pub fn as_str(&self) -> &'static str {
        match self {
            Construct::Group => "group",
            Construct::Element => "element",
            Construct::Condition => "condition",
            Construct::List => "list",
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which quoted string a description error is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionKind {
    Label,
    Help,
    Error,
}

impl fmt::Display for DescriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DescriptionKind::Label => "label",
            DescriptionKind::Help => "help",
            DescriptionKind::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unrecognized keyword: {keyword}")]
    UnrecognizedKeyword { keyword: String },

    #[error("unknown token in <list>: {token}")]
    UnknownListToken { token: String },

    #[error("Error in <{construct}>: Invalid capacity type of {value}")]
    InvalidCapacity { construct: Construct, value: String },

    #[error("Error in <{construct}>: Key parser is unimplemented")]
    KeysUnimplemented { construct: Construct },

    #[error("Missing {what}")]
    Missing { what: &'static str },

    #[error("Missing or bad {what}")]
    MissingOrBad { what: &'static str },

    #[error("Missing {what} in <condition>")]
    MissingConditionPart { what: &'static str },

    // ---- names ----
    #[error("Missing name!")]
    MissingName,

    #[error("The name > the maximum length limited {max}")]
    NameTooLong { max: usize },

    #[error("Invalid character in name: {name}")]
    InvalidName { name: String },

    #[error("The name is larger than the maximum length of {max}")]
    ValueNameTooLong { max: usize },

    #[error("Invalid character in value name: {name}")]
    InvalidValueName { name: String },

    #[error("ref_enum path must start at root: {path}")]
    RefPathNotRooted { path: String },

    #[error("ref_enum path must not end with '/': {path}")]
    RefPathTrailingSlash { path: String },

    #[error("Invalid character in ref_enum path: '{segment}'")]
    InvalidRefPathSegment { segment: String },

    // ---- descriptions ----
    #[error("Invalid {kind} description")]
    InvalidDescription { kind: DescriptionKind },

    #[error("Non-Latin-1 character in {kind} description")]
    NonLatin1 { kind: DescriptionKind },

    #[error("description > maximum length {max}")]
    DescriptionTooLong { max: usize },

    #[error("Invalid case value: must be 'ignore' or 'match'")]
    InvalidCase,

    #[error("list nesting deeper than {max} levels")]
    ListTooDeep { max: usize },
}

impl ParseErrorKind {
    pub fn error_code(&self) -> Code {
        use ParseErrorKind::*;

        match self {
            Lexer(e) => e.error_code(),
            Expression(e) => e.error_code(),
            Model(e) => e.error_code(),
            UnrecognizedKeyword { .. } | UnknownListToken { .. } => {
                codes::syntax::UNRECOGNIZED_KEYWORD
            }
            InvalidCapacity { .. } | KeysUnimplemented { .. } | InvalidCase => {
                codes::syntax::INVALID_KEYWORD_VALUE
            }
            Missing { .. } | MissingOrBad { .. } | MissingConditionPart { .. } => {
                codes::syntax::MISSING_TOKEN
            }
            MissingName => codes::naming::MISSING_NAME,
            NameTooLong { .. } | ValueNameTooLong { .. } => codes::naming::NAME_TOO_LONG,
            InvalidName { .. } | InvalidValueName { .. } => codes::naming::INVALID_NAME,
            RefPathNotRooted { .. } | RefPathTrailingSlash { .. } | InvalidRefPathSegment { .. } => {
                codes::references::INVALID_REF_ENUM_PATH
            }
            InvalidDescription { .. } | NonLatin1 { .. } | DescriptionTooLong { .. } => {
                codes::syntax::INVALID_DESCRIPTION
            }
            ListTooDeep { .. } => codes::syntax::MAX_NESTING_DEPTH,
        }
    }
}

/// A parse failure located on a source line.
///
/// Failures raised while closing a construct carry that construct and, when
/// it was already named, its name. The line is then the one the construct
/// was opened on; otherwise it is the scanner's line when the failure
/// happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    line: usize,
    construct: Option<Construct>,
    name: Option<String>,
}

impl ParseError {
    pub fn new(kind: impl Into<ParseErrorKind>, line: usize) -> Self {
        Self {
            kind: kind.into(),
            line,
            construct: None,
            name: None,
        }
    }

    /// Failure owned by an unnamed construct opened on `line`
    pub fn within(construct: Construct, line: usize, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            line,
            construct: Some(construct),
            name: None,
        }
    }

    /// Failure of the named construct opened on `line`
    pub fn of(
        construct: Construct,
        name: impl Into<String>,
        line: usize,
        kind: impl Into<ParseErrorKind>,
    ) -> Self {
        Self {
            kind: kind.into(),
            line,
            construct: Some(construct),
            name: Some(name.into()),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn construct(&self) -> Option<Construct> {
        self.construct
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn error_code(&self) -> Code {
        self.kind.error_code()
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.construct, &self.name) {
            (Some(construct), Some(name)) => {
                write!(f, "Error in <{}>: {}\n\t{}", construct, name, self.kind)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Attach the current line to a stage error
pub(crate) trait AtLine<T> {
    fn at_line(self, line: usize) -> ParseResult<T>;
}

impl<T, E: Into<ParseErrorKind>> AtLine<T> for Result<T, E> {
    fn at_line(self, line: usize) -> ParseResult<T> {
        self.map_err(|e| ParseError::new(e, line))
    }
}
