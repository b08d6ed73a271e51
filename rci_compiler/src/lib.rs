//! Parser and validator for RCI device configuration descriptions
//!
//! Source text flows through [`file_processor`], [`lexical`], [`syntax`] and
//! [`validation`] into a [`model::ParseSession`]; [`pipeline`] runs them in
//! order.

pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod syntax;
pub mod utils;
pub mod validation;

pub use model::ParseSession;
pub use pipeline::{PipelineError, PipelineResult};
