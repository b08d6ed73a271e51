//! Resolution of condition source paths

use super::error::{ValidationError, ValidationResult};
use crate::model::{Item, ItemList, Resolved, Table};
use std::collections::BTreeSet;

/// Check that every condition of `table` reads its value from an element
pub fn check_table(table: &Table) -> ValidationResult<usize> {
    let mut checked = 0;

    for condition in table.conditions() {
        match table.resolve(condition.source().path()) {
            Some(Resolved::Item(Item::Element(_))) => checked += 1,
            Some(_) => {
                return Err(ValidationError::ConditionNotAtElement {
                    name: condition.name().to_string(),
                })
            }
            None => {
                return Err(ValidationError::ConditionPathInvalid {
                    name: condition.name().to_string(),
                })
            }
        }
    }

    Ok(checked)
}

fn collect_attached<'t>(list: &'t ItemList, names: &mut BTreeSet<&'t str>) {
    if let Some(attached) = list.info().condition() {
        names.insert(attached.name.as_str());
    }
    for item in list.items() {
        if let Some(attached) = item.info().condition() {
            names.insert(attached.name.as_str());
        }
        if let Some(child) = item.as_list() {
            collect_attached(child, names);
        }
    }
}

/// Conditions declared in `table` that no node attaches
pub fn unused_conditions(table: &Table) -> Vec<String> {
    let mut attached = BTreeSet::new();
    for group in table.groups() {
        collect_attached(group.list(), &mut attached);
    }

    table
        .conditions()
        .map(|c| c.name())
        .filter(|name| !attached.contains(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::lexical::TokenScanner;
    use crate::model::{ParseSession, TableType};
    use crate::syntax::parse_source;
    use assert_matches::assert_matches;

    fn setting(source: &str) -> Table {
        let mut scanner = TokenScanner::new(source).unwrap();
        let mut session = ParseSession::new(GeneratorLimits::builtin());
        parse_source(&mut scanner, &mut session).unwrap();
        session.table(TableType::Setting).clone()
    }

    const BASE: &str = "group setting g1 \"G1\"\n element e1 \"E1\" type on_off\n list l \"L\"\n  element inner \"Inner\" type uint32\n end\nend\n";

    #[test]
    fn test_condition_on_element() {
        let table = setting(&format!(
            "{}condition c1 source /g1/e1 value on\ncondition c2 source /g1/l/inner value 3\n",
            BASE
        ));
        assert_eq!(check_table(&table).unwrap(), 2);
    }

    #[test]
    fn test_condition_on_list_or_group() {
        let table = setting(&format!("{}condition c1 source /g1/l value x\n", BASE));
        assert_eq!(
            check_table(&table).unwrap_err().to_string(),
            "conditional source path does not end at an element: c1"
        );

        let table = setting(&format!("{}condition c1 source /g1 value x\n", BASE));
        assert_matches!(
            check_table(&table),
            Err(ValidationError::ConditionNotAtElement { .. })
        );
    }

    #[test]
    fn test_condition_on_missing_path() {
        let table = setting(&format!("{}condition c1 source /g1/nope value x\n", BASE));
        assert_matches!(
            check_table(&table),
            Err(ValidationError::ConditionPathInvalid { name }) if name == "c1"
        );

        let table = setting(&format!("{}condition c1 source /g1/e1/deeper value x\n", BASE));
        assert_matches!(
            check_table(&table),
            Err(ValidationError::ConditionPathInvalid { .. })
        );
    }

    #[test]
    fn test_unused_conditions() {
        let table = setting(&format!(
            "{}condition used source /g1/e1 value on\ncondition spare source /g1/e1 value off\ngroup setting g2 \"G2\"\n element x \"X\" type uint32 condition used\n",
            BASE
        ));
        assert_eq!(unused_conditions(&table), vec!["spare".to_string()]);
    }
}
