//! Syntax analysis: token stream to configuration tree
//!
//! The parser fills a [`ParseSession`] statement by statement. Each node is
//! validated on its own when it is closed; checks that need the complete
//! tree run afterwards in [`crate::validation`].

pub mod error;
pub mod expression;
pub mod parser;

pub use error::{Construct, DescriptionKind, ParseError, ParseErrorKind, ParseResult};
pub use expression::{evaluate, ExpressionError, ExpressionResult};
pub use parser::Parser;

use crate::lexical::TokenScanner;
use crate::logging::codes;
use crate::model::ParseSession;
use crate::{log_debug, log_error, log_success};

/// Parse every statement of `scanner` into `session`
pub fn parse_source(scanner: &mut TokenScanner<'_>, session: &mut ParseSession) -> ParseResult<()> {
    log_debug!("Starting syntax analysis");

    let result = Parser::new(scanner, session).parse();

    match &result {
        Ok(()) => {
            log_success!(codes::success::PARSE_COMPLETE, "Syntax analysis completed",
                "groups" => session.group_count(),
                "ref_enums" => session.ref_enums().len(),
                "lines" => scanner.line_number()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), &error.to_string(),
                "line" => error.line(),
                "construct" => error.construct().map(|c| c.as_str()).unwrap_or("none")
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::model::TableType;

    #[test]
    fn test_parse_source_fills_session() {
        let mut scanner = TokenScanner::new(
            "group setting g \"G\"\n  element e \"E\" type uint32\nend\ngroup state s \"S\"\n  element v \"V\" type string",
        )
        .unwrap();
        let mut session = ParseSession::new(GeneratorLimits::builtin());

        parse_source(&mut scanner, &mut session).unwrap();

        assert_eq!(session.table(TableType::Setting).len(), 1);
        assert_eq!(session.table(TableType::State).len(), 1);
        assert_eq!(scanner.line_number(), 5);
    }

    #[test]
    fn test_parse_source_stops_at_first_error() {
        let mut scanner = TokenScanner::new("group setting g \"G\"\nwhatever").unwrap();
        let mut session = ParseSession::new(GeneratorLimits::builtin());

        let error = parse_source(&mut scanner, &mut session).unwrap_err();
        assert_eq!(error.to_string(), "Error in <group>: g\n\tNo items specified");
        assert_eq!(session.group_count(), 0);
    }
}
