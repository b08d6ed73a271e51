//! The state owned by one parse: both tables, global error catalogs and the
//! statistics later consumed by code generation

use super::element::ElementType;
use super::error::{ModelError, ModelResult};
use super::list::ItemList;
use super::location::{Location, TableType};
use super::table::Table;
use crate::config::GeneratorLimits;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Sequentially numbered error names and descriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCatalog {
    offset: usize,
    entries: IndexMap<String, String>,
}

impl ErrorCatalog {
    fn new(offset: usize, entries: &[(&str, &str)]) -> Self {
        Self {
            offset,
            entries: entries
                .iter()
                .map(|(name, desc)| (name.to_string(), desc.to_string()))
                .collect(),
        }
    }

    /// Id of the first entry
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name).map(|i| self.offset + i)
    }

    /// First id after this catalog
    pub fn end(&self) -> usize {
        self.offset + self.entries.len()
    }
}

/// Fatal protocol, protocol and user errors, numbered in that order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalErrors {
    fatal: ErrorCatalog,
    protocol: ErrorCatalog,
    user: ErrorCatalog,
}

impl GlobalErrors {
    pub fn new() -> Self {
        let fatal = ErrorCatalog::new(
            1,
            &[
                ("bad_command", "Bad command"),
                ("bad_descriptor", "Bad configuration"),
                ("bad_value", "Bad value"),
            ],
        );
        let protocol = ErrorCatalog::new(
            fatal.end(),
            &[
                ("bad_value", "Bad value"),
                ("invalid_index", "Invalid index"),
                ("invalid_name", "Invalid name"),
                ("missing_name", "Missing name"),
            ],
        );
        let user = ErrorCatalog::new(protocol.end(), &[]);

        Self {
            fatal,
            protocol,
            user,
        }
    }

    pub fn fatal(&self) -> &ErrorCatalog {
        &self.fatal
    }

    pub fn protocol(&self) -> &ErrorCatalog {
        &self.protocol
    }

    pub fn user(&self) -> &ErrorCatalog {
        &self.user
    }

    pub fn is_protocol_error(&self, name: &str) -> bool {
        self.fatal.contains(name) || self.protocol.contains(name)
    }

    pub fn add_user_error(&mut self, name: &str, description: Option<String>) -> ModelResult<()> {
        let description = description.ok_or(ModelError::MissingGlobalErrorDescription)?;

        if self.is_protocol_error(name) {
            return Err(ModelError::ProtocolErrorName {
                name: name.to_string(),
            });
        }
        if self.user.contains(name) {
            return Err(ModelError::DuplicateGlobalError {
                name: name.to_string(),
            });
        }

        self.user.entries.insert(name.to_string(), description);
        Ok(())
    }

    /// First id available to per-group errors
    pub fn group_errors_offset(&self) -> usize {
        self.user.end()
    }
}

impl Default for GlobalErrors {
    fn default() -> Self {
        Self::new()
    }
}

/// Item kinds whose longest name sizes generated declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Collections,
    Elements,
    Values,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub variable_group: bool,
    pub variable_list: bool,
    pub dictionary: bool,
    pub variable_array: bool,
    pub variable_dictionary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    max_list_depth: usize,
    max_name_lengths: BTreeMap<ItemCategory, usize>,
    types_seen: BTreeSet<ElementType>,
    flags: FeatureFlags,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            max_list_depth: 0,
            max_name_lengths: [
                ItemCategory::Collections,
                ItemCategory::Elements,
                ItemCategory::Values,
            ]
            .into_iter()
            .map(|category| (category, 0))
            .collect(),
            types_seen: BTreeSet::new(),
            flags: FeatureFlags::default(),
        }
    }
}

impl Statistics {
    pub fn max_list_depth(&self) -> usize {
        self.max_list_depth
    }

    pub fn record_list_depth(&mut self, depth: usize) {
        self.max_list_depth = self.max_list_depth.max(depth);
    }

    pub fn max_name_length(&self, category: ItemCategory) -> usize {
        self.max_name_lengths.get(&category).copied().unwrap_or(0)
    }

    pub fn record_name_length(&mut self, category: ItemCategory, length: usize) {
        let entry = self.max_name_lengths.entry(category).or_insert(0);
        *entry = (*entry).max(length);
    }

    pub fn types_seen(&self) -> &BTreeSet<ElementType> {
        &self.types_seen
    }

    pub fn record_type(&mut self, element_type: ElementType) {
        self.types_seen.insert(element_type);
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    /// Note the sizing features a validated group or list uses
    pub fn record_collection(&mut self, list: &ItemList, is_group: bool) {
        let variable = list.is_variable();

        if variable {
            if is_group {
                self.flags.variable_group = true;
            } else {
                self.flags.variable_list = true;
            }
        }

        if list.is_dictionary() {
            self.flags.dictionary = true;
            if variable {
                self.flags.variable_dictionary = true;
            }
        } else if variable {
            self.flags.variable_array = true;
        }
    }
}

/// Everything one parse produces.
///
/// Built empty before parsing, filled by the parser, then annotated by the
/// cross-reference pass.
#[derive(Debug, Clone, Serialize)]
pub struct ParseSession {
    limits: GeneratorLimits,
    setting: Table,
    state: Table,
    global_errors: GlobalErrors,
    statistics: Statistics,
    #[serde(skip)]
    ref_enums: Vec<Location>,
}

impl ParseSession {
    pub fn new(limits: GeneratorLimits) -> Self {
        Self {
            limits,
            setting: Table::new(TableType::Setting),
            state: Table::new(TableType::State),
            global_errors: GlobalErrors::new(),
            statistics: Statistics::default(),
            ref_enums: Vec::new(),
        }
    }

    pub fn limits(&self) -> &GeneratorLimits {
        &self.limits
    }

    pub fn table(&self, table_type: TableType) -> &Table {
        match table_type {
            TableType::Setting => &self.setting,
            TableType::State => &self.state,
        }
    }

    pub fn table_mut(&mut self, table_type: TableType) -> &mut Table {
        match table_type {
            TableType::Setting => &mut self.setting,
            TableType::State => &mut self.state,
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        [&self.setting, &self.state].into_iter()
    }

    pub fn group_count(&self) -> usize {
        self.setting.len() + self.state.len()
    }

    pub fn global_errors(&self) -> &GlobalErrors {
        &self.global_errors
    }

    pub fn global_errors_mut(&mut self) -> &mut GlobalErrors {
        &mut self.global_errors
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.statistics
    }

    /// Remember a `ref_enum` element for the cross-reference pass
    pub fn register_ref_enum(&mut self, location: Location) {
        self.ref_enums.push(location);
    }

    pub fn ref_enums(&self) -> &[Location] {
        &self.ref_enums
    }

    /// Store a computed length range on the `ref_enum` at `location`
    pub fn annotate_ref_enum_range(&mut self, location: &Location, min: usize, max: usize) -> bool {
        match self.table_mut(location.table()).element_mut(location.path()) {
            Some(element) => {
                element.set_resolved_range(min, max);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::ItemInfo;
    use assert_matches::assert_matches;

    #[test]
    fn test_catalog_numbering() {
        let mut errors = GlobalErrors::new();
        assert_eq!(errors.fatal().offset(), 1);
        assert_eq!(errors.protocol().offset(), 4);
        assert_eq!(errors.user().offset(), 8);
        assert_eq!(errors.protocol().id_of("invalid_name"), Some(6));

        errors
            .add_user_error("no_memory", Some("Out of memory".to_string()))
            .unwrap();
        errors
            .add_user_error("busy", Some("Busy".to_string()))
            .unwrap();
        assert_eq!(errors.user().id_of("busy"), Some(9));
        assert_eq!(errors.group_errors_offset(), 10);
    }

    #[test]
    fn test_user_error_rules() {
        let mut errors = GlobalErrors::new();
        assert_eq!(
            errors
                .add_user_error("bad_command", Some("x".to_string()))
                .unwrap_err()
                .to_string(),
            "Existing protocol error <globalerror>: bad_command"
        );
        assert_matches!(
            errors.add_user_error("load", None),
            Err(ModelError::MissingGlobalErrorDescription)
        );
        errors.add_user_error("load", Some("x".to_string())).unwrap();
        assert_matches!(
            errors.add_user_error("load", Some("y".to_string())),
            Err(ModelError::DuplicateGlobalError { .. })
        );
    }

    #[test]
    fn test_statistics() {
        let mut stats = Statistics::default();
        stats.record_name_length(ItemCategory::Values, 4);
        stats.record_name_length(ItemCategory::Values, 2);
        stats.record_list_depth(2);
        stats.record_list_depth(1);
        stats.record_type(ElementType::Int32);
        stats.record_type(ElementType::Int32);

        assert_eq!(stats.max_name_length(ItemCategory::Values), 4);
        assert_eq!(stats.max_name_length(ItemCategory::Elements), 0);
        assert_eq!(stats.max_list_depth(), 2);
        assert_eq!(stats.types_seen().len(), 1);
    }

    #[test]
    fn test_collection_flags() {
        let info = || ItemInfo::new("l", Some("L".to_string()), None).unwrap();

        let mut stats = Statistics::default();
        let mut dictionary = ItemList::new(info());
        dictionary.set_keys(Vec::new());
        dictionary.set_capacity(crate::model::list::Capacity::Variable);
        stats.record_collection(&dictionary, false);
        assert_eq!(
            stats.flags(),
            FeatureFlags {
                variable_list: true,
                dictionary: true,
                variable_dictionary: true,
                ..FeatureFlags::default()
            }
        );

        let mut stats = Statistics::default();
        let mut array = ItemList::new(info());
        array.set_instances(3).unwrap();
        array.set_capacity(crate::model::list::Capacity::Variable);
        stats.record_collection(&array, true);
        assert!(stats.flags().variable_group);
        assert!(stats.flags().variable_array);
        assert!(!stats.flags().dictionary);
    }

    #[test]
    fn test_session_serializes_without_ref_enum_index() {
        let mut session = ParseSession::new(GeneratorLimits::builtin());
        session.register_ref_enum(Location::parse("/g/e").unwrap());
        assert_eq!(session.group_count(), 0);

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("ref_enums").is_none());
        assert_eq!(json["limits"]["max_name_length"], 40);
        assert_eq!(json["statistics"]["max_name_lengths"]["collections"], 0);
    }
}
