//! Collections: nested lists and top-level groups

use super::error::{ModelError, ModelResult};
use super::item::{Item, ItemInfo};
use crate::config::GeneratorLimits;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Fixed,
    Variable,
}

impl Capacity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "fixed" => Some(Capacity::Fixed),
            "variable" => Some(Capacity::Variable),
            _ => None,
        }
    }
}

/// Ordered, uniquely named children indexed either by instance number or by
/// key.
///
/// A list is a dictionary exactly when it has no instance count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemList {
    #[serde(flatten)]
    info: ItemInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keys: Option<Vec<String>>,
    capacity: Option<Capacity>,
    items: Vec<Item>,
}

impl ItemList {
    pub fn new(info: ItemInfo) -> Self {
        Self {
            info,
            instances: None,
            keys: None,
            capacity: None,
            items: Vec::new(),
        }
    }

    pub fn info(&self) -> &ItemInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn instances(&self) -> Option<u32> {
        self.instances
    }

    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    pub fn capacity(&self) -> Option<Capacity> {
        self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_dictionary(&self) -> bool {
        self.instances.is_none()
    }

    pub fn is_array(&self) -> bool {
        !self.is_dictionary()
    }

    pub fn is_variable(&self) -> bool {
        self.capacity == Some(Capacity::Variable)
    }

    pub fn set_instances(&mut self, count: i32) -> ModelResult<()> {
        match u32::try_from(count) {
            Ok(count) if count > 0 => {
                self.instances = Some(count);
                Ok(())
            }
            _ => Err(ModelError::InvalidInstances {
                name: self.name().to_string(),
            }),
        }
    }

    pub fn set_capacity(&mut self, capacity: Capacity) {
        self.capacity = Some(capacity);
    }

    pub fn set_keys(&mut self, keys: Vec<String>) {
        self.keys = Some(keys);
    }

    pub fn add_item(&mut self, item: impl Into<Item>) -> ModelResult<()> {
        let item = item.into();
        if self.find(item.name()).is_some() {
            return Err(ModelError::DuplicateItem {
                name: item.name().to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    /// Settle capacity and sizing once every child has been added
    pub fn validate(&mut self, limits: &GeneratorLimits) -> ModelResult<()> {
        match (self.instances, &self.keys) {
            (None, None) => {
                self.instances = Some(1);
                self.capacity = Some(Capacity::Fixed);
            }
            (None, Some(keys)) => {
                if self.capacity.is_none() {
                    self.capacity = Some(if keys.is_empty() {
                        Capacity::Variable
                    } else {
                        Capacity::Fixed
                    });
                }
            }
            (Some(_), Some(_)) => return Err(ModelError::CountAndKeys),
            (Some(_), None) => {
                self.capacity.get_or_insert(Capacity::Fixed);
            }
        }

        if self.keys.is_some() {
            if self.capacity == Some(Capacity::Fixed) {
                return Err(ModelError::FixedDictionary);
            }
            if !limits.dynamic_keys_enabled() {
                return Err(ModelError::DynamicKeysDisabled);
            }
        }

        if self.items.is_empty() {
            return Err(ModelError::NoItems);
        }

        Ok(())
    }
}

/// Top-level collection with its own error catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    #[serde(flatten)]
    list: ItemList,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    errors: IndexMap<String, String>,
}

impl Group {
    pub fn new(info: ItemInfo) -> Self {
        Self {
            list: ItemList::new(info),
            errors: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.list.name()
    }

    pub fn list(&self) -> &ItemList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ItemList {
        &mut self.list
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn add_error(&mut self, name: &str, description: Option<String>) -> ModelResult<()> {
        if self.errors.contains_key(name) {
            return Err(ModelError::DuplicateError {
                name: name.to_string(),
            });
        }
        let description = description.ok_or(ModelError::MissingErrorDescription)?;
        self.errors.insert(name.to_string(), description);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::Element;
    use assert_matches::assert_matches;

    fn info(name: &str) -> ItemInfo {
        ItemInfo::new(name, Some(name.to_uppercase()), None).unwrap()
    }

    fn list_with_child(name: &str) -> ItemList {
        let mut list = ItemList::new(info(name));
        list.add_item(Element::new(info("child"))).unwrap();
        list
    }

    fn dynamic() -> GeneratorLimits {
        GeneratorLimits::builtin().with_max_dynamic_key_length(16)
    }

    #[test]
    fn test_plain_list_becomes_single_fixed_instance() {
        let mut list = list_with_child("l1");
        list.set_capacity(Capacity::Variable);
        list.validate(&GeneratorLimits::builtin()).unwrap();
        assert_eq!(list.instances(), Some(1));
        assert_eq!(list.capacity(), Some(Capacity::Fixed));
        assert!(list.is_array());
    }

    #[test]
    fn test_counted_list_defaults_to_fixed() {
        let mut list = list_with_child("l1");
        list.set_instances(4).unwrap();
        list.validate(&GeneratorLimits::builtin()).unwrap();
        assert_eq!(list.capacity(), Some(Capacity::Fixed));

        assert_matches!(list.set_instances(0), Err(ModelError::InvalidInstances { .. }));
        assert_eq!(
            list.set_instances(-2).unwrap_err().to_string(),
            "Invalid instance count for: l1"
        );
    }

    #[test]
    fn test_empty_keys_make_variable_dictionary() {
        let mut list = list_with_child("d1");
        list.set_keys(Vec::new());
        list.validate(&dynamic()).unwrap();
        assert!(list.is_dictionary());
        assert!(list.is_variable());
    }

    #[test]
    fn test_dictionary_requires_key_length() {
        let mut list = list_with_child("d1");
        list.set_keys(Vec::new());
        assert_eq!(
            list.validate(&GeneratorLimits::builtin()),
            Err(ModelError::DynamicKeysDisabled)
        );
    }

    #[test]
    fn test_fixed_dictionary_is_rejected() {
        let mut list = list_with_child("d1");
        list.set_keys(Vec::new());
        list.set_capacity(Capacity::Fixed);
        assert_eq!(list.validate(&dynamic()), Err(ModelError::FixedDictionary));
    }

    #[test]
    fn test_count_and_keys_conflict() {
        let mut list = list_with_child("l1");
        list.set_instances(2).unwrap();
        list.set_keys(Vec::new());
        assert_eq!(list.validate(&dynamic()), Err(ModelError::CountAndKeys));
    }

    #[test]
    fn test_empty_list_and_duplicates() {
        let mut list = ItemList::new(info("l1"));
        assert_eq!(list.validate(&GeneratorLimits::builtin()), Err(ModelError::NoItems));

        list.add_item(Element::new(info("dup"))).unwrap();
        assert_eq!(
            list.add_item(Element::new(info("dup"))).unwrap_err().to_string(),
            "Duplicate name: dup"
        );
        assert!(list.find("dup").is_some());
        assert!(list.find("other").is_none());
    }

    #[test]
    fn test_group_errors() {
        let mut group = Group::new(info("g1"));
        group.add_error("busy", Some("Device busy".to_string())).unwrap();
        assert_matches!(
            group.add_error("busy", Some("again".to_string())),
            Err(ModelError::DuplicateError { .. })
        );
        assert_matches!(
            group.add_error("other", None),
            Err(ModelError::MissingErrorDescription)
        );
        assert_eq!(group.errors().len(), 1);
    }
}
