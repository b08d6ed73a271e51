//! Shared primitive types used by the scanner, parser and logging

pub mod span;

pub use span::{Position, Span};
