//! Cross-reference validation run after the whole file has been parsed
//!
//! References and condition sources may point forward in the file, so they
//! are only checked once every group is known. Both checks read the tree;
//! the only write is storing the computed `ref_enum` ranges at the end.

pub mod conditions;
pub mod error;
pub mod ref_enums;

pub use error::{ValidationError, ValidationResult};
pub use ref_enums::{reference_resolves, RefEnumRange};

use crate::logging::codes;
use crate::model::ParseSession;
use crate::{log_debug, log_error, log_info, log_performance, log_success, log_warning};
use std::time::Instant;

/// Cross-reference validation metrics
#[derive(Debug, Clone, Default)]
pub struct ValidationMetrics {
    pub total_duration_ms: f64,
    pub ref_enum_duration_ms: f64,
    pub condition_duration_ms: f64,
    pub ref_enums_resolved: usize,
    pub conditions_checked: usize,
    pub unused_conditions: usize,
}

fn report(error: &ValidationError) {
    log_error!(error.error_code(), &error.to_string(),
        "severity" => error.severity(),
        "category" => error.category()
    );
}

/// Resolve every `ref_enum` and condition source against the finished tables
pub fn validate(session: &mut ParseSession) -> ValidationResult<ValidationMetrics> {
    let start_time = Instant::now();
    let mut metrics = ValidationMetrics::default();

    log_info!("Starting cross-reference validation",
        "ref_enums" => session.ref_enums().len(),
        "groups" => session.group_count()
    );

    let ref_start = Instant::now();
    let ranges = ref_enums::compute_ranges(session).inspect_err(report)?;
    metrics.ref_enum_duration_ms = ref_start.elapsed().as_secs_f64() * 1000.0;
    metrics.ref_enums_resolved = ranges.len();
    log_success!(codes::success::REF_ENUM_RESOLUTION_COMPLETE, "ref_enum references resolved",
        "count" => ranges.len()
    );

    let condition_start = Instant::now();
    for table in session.tables() {
        metrics.conditions_checked += conditions::check_table(table).inspect_err(report)?;

        for name in conditions::unused_conditions(table) {
            log_warning!("Condition is never attached",
                "condition" => name,
                "table" => table.table_type()
            );
            metrics.unused_conditions += 1;
        }
    }
    metrics.condition_duration_ms = condition_start.elapsed().as_secs_f64() * 1000.0;
    log_success!(codes::success::CONDITION_RESOLUTION_COMPLETE, "Condition sources resolved",
        "count" => metrics.conditions_checked
    );

    ref_enums::apply_ranges(session, &ranges).inspect_err(report)?;
    for range in &ranges {
        log_debug!("ref_enum range",
            "element" => range.location,
            "min" => range.min,
            "max" => range.max
        );
    }

    let elapsed = start_time.elapsed();
    metrics.total_duration_ms = elapsed.as_secs_f64() * 1000.0;
    log_performance!(codes::success::VALIDATION_COMPLETE, "Cross-reference validation complete",
        duration = elapsed,
        "ref_enums" => metrics.ref_enums_resolved,
        "conditions" => metrics.conditions_checked
    );

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::lexical::TokenScanner;
    use crate::model::{Location, TableType};
    use crate::syntax::parse_source;
    use assert_matches::assert_matches;

    fn parsed(source: &str) -> ParseSession {
        let mut scanner = TokenScanner::new(source).unwrap();
        let mut session =
            ParseSession::new(GeneratorLimits::builtin().with_max_dynamic_key_length(8));
        parse_source(&mut scanner, &mut session).unwrap();
        session
    }

    #[test]
    fn test_condition_before_its_source_exists() {
        let mut session = parsed(
            "condition c1 source /g1/e1 value foo\ngroup setting g \"G\"\n element x \"X\" type uint32\n",
        );
        let error = validate(&mut session).unwrap_err();
        assert_eq!(error.to_string(), "conditional source path is invalid: c1");
    }

    #[test]
    fn test_forward_reference_is_annotated() {
        let mut session = parsed(
            "group setting pick \"Pick\"\n element which \"Which\" type ref_enum ref /ports\nend\ngroup setting ports \"Ports\" keys {}\n element speed \"Speed\" type uint32\n",
        );

        let metrics = validate(&mut session).unwrap();
        assert_eq!(metrics.ref_enums_resolved, 1);

        let location = Location::parse("/pick/which").unwrap();
        let element = session
            .table(TableType::Setting)
            .resolve(location.path())
            .and_then(|r| r.as_element())
            .unwrap();
        assert_eq!(element.min(), Some("14"));
        assert_eq!(element.max(), Some("14"));
    }

    #[test]
    fn test_state_conditions_are_checked() {
        let mut session = parsed(
            "group state s \"S\"\n element up \"Up\" type boolean\nend\ncondition online source state:/s/up value true\ncondition dead source state:/s/down value true\n",
        );
        assert_matches!(
            validate(&mut session),
            Err(ValidationError::ConditionPathInvalid { name }) if name == "dead"
        );
    }

    #[test]
    fn test_metrics_count_unused_conditions() {
        let mut session = parsed(
            "group setting g \"G\"\n element e \"E\" type on_off\nend\ncondition c source /g/e value on\n",
        );
        let metrics = validate(&mut session).unwrap();
        assert_eq!(metrics.conditions_checked, 1);
        assert_eq!(metrics.unused_conditions, 1);
    }
}
