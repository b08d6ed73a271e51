//! Per-table registries of groups and conditions

use super::condition::Condition;
use super::element::Element;
use super::error::{ModelError, ModelResult};
use super::item::Item;
use super::list::Group;
use super::location::TableType;
use indexmap::IndexMap;
use serde::Serialize;

/// What a path through a table lands on
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Group(&'a Group),
    Item(&'a Item),
}

impl<'a> Resolved<'a> {
    pub fn as_element(&self) -> Option<&'a Element> {
        match *self {
            Resolved::Item(item) => item.as_element(),
            Resolved::Group(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    table_type: TableType,
    groups: IndexMap<String, Group>,
    conditions: IndexMap<String, Condition>,
}

impl Table {
    pub fn new(table_type: TableType) -> Self {
        Self {
            table_type,
            groups: IndexMap::new(),
            conditions: IndexMap::new(),
        }
    }

    pub fn table_type(&self) -> TableType {
        self.table_type
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.values()
    }

    pub fn condition(&self, name: &str) -> ModelResult<&Condition> {
        self.conditions
            .get(name)
            .ok_or_else(|| ModelError::ConditionNotFound {
                name: name.to_string(),
            })
    }

    pub fn add_group(&mut self, group: Group) -> ModelResult<()> {
        if self.groups.contains_key(group.name()) {
            return Err(ModelError::DuplicateGroup {
                name: group.name().to_string(),
            });
        }
        self.groups.insert(group.name().to_string(), group);
        Ok(())
    }

    pub fn add_condition(&mut self, condition: Condition) -> ModelResult<()> {
        if self.conditions.contains_key(condition.name()) {
            return Err(ModelError::DuplicateCondition {
                name: condition.name().to_string(),
            });
        }
        self.conditions
            .insert(condition.name().to_string(), condition);
        Ok(())
    }

    /// Follow `path` by name from a group through nested lists
    pub fn resolve(&self, path: &[String]) -> Option<Resolved<'_>> {
        let (first, rest) = path.split_first()?;
        let group = self.groups.get(first)?;

        let Some((second, rest)) = rest.split_first() else {
            return Some(Resolved::Group(group));
        };

        let mut current = group.list().find(second)?;
        for name in rest {
            current = current.as_list()?.find(name)?;
        }
        Some(Resolved::Item(current))
    }

    pub fn element_mut(&mut self, path: &[String]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let (second, rest) = rest.split_first()?;

        let mut current = self.groups.get_mut(first)?.list_mut().find_mut(second)?;
        for name in rest {
            current = current.as_list_mut()?.find_mut(name)?;
        }
        current.as_element_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::condition::Predicate;
    use crate::model::item::ItemInfo;
    use crate::model::list::ItemList;
    use crate::model::location::Location;
    use assert_matches::assert_matches;

    fn info(name: &str) -> ItemInfo {
        ItemInfo::new(name, Some(name.to_string()), None).unwrap()
    }

    fn path(text: &str) -> Vec<String> {
        Location::parse(text).unwrap().path().to_vec()
    }

    fn sample() -> Table {
        let mut inner = ItemList::new(info("l1"));
        inner.add_item(Element::new(info("leaf"))).unwrap();

        let mut group = Group::new(info("g1"));
        group.list_mut().add_item(Element::new(info("e1"))).unwrap();
        group.list_mut().add_item(inner).unwrap();

        let mut table = Table::new(TableType::Setting);
        table.add_group(group).unwrap();
        table
    }

    #[test]
    fn test_duplicate_group_and_condition() {
        let mut table = sample();
        assert_eq!(
            table.add_group(Group::new(info("g1"))).unwrap_err().to_string(),
            "Duplicate <group> name: g1"
        );

        let condition = Condition::new(
            "c1",
            Location::parse("/g1/e1").unwrap(),
            Predicate::Equals {
                value: "x".to_string(),
            },
        );
        table.add_condition(condition.clone()).unwrap();
        assert_matches!(
            table.add_condition(condition),
            Err(ModelError::DuplicateCondition { .. })
        );
        assert!(table.condition("c1").is_ok());
        assert_matches!(table.condition("c2"), Err(ModelError::ConditionNotFound { .. }));
    }

    #[test]
    fn test_resolve_paths() {
        let table = sample();
        assert_matches!(table.resolve(&path("/g1")), Some(Resolved::Group(_)));
        assert!(table.resolve(&path("/g1/e1")).and_then(|r| r.as_element()).is_some());
        assert!(table.resolve(&path("/g1/l1/leaf")).and_then(|r| r.as_element()).is_some());
        assert_matches!(table.resolve(&path("/g1/l1")), Some(Resolved::Item(Item::List(_))));
        assert!(table.resolve(&path("/g1/e1/deeper")).is_none());
        assert!(table.resolve(&path("/g2/e1")).is_none());
        assert!(table.resolve(&[]).is_none());
    }

    #[test]
    fn test_element_mut() {
        let mut table = sample();
        table
            .element_mut(&path("/g1/l1/leaf"))
            .unwrap()
            .set_resolved_range(1, 2);
        assert_eq!(
            table
                .resolve(&path("/g1/l1/leaf"))
                .and_then(|r| r.as_element())
                .and_then(|e| e.max()),
            Some("2")
        );
        assert!(table.element_mut(&path("/g1/l1")).is_none());
    }
}
