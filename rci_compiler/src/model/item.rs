//! Tree nodes shared by every kind of configuration item

use super::condition::{Condition, Predicate};
use super::element::Element;
use super::error::{ModelError, ModelResult};
use super::list::ItemList;
use super::location::Location;
use serde::Serialize;
use std::fmt;

const RESERVED_NAMES: [&str; 2] = ["error", "warning"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessType {
    pub fn parse(value: &str) -> ModelResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "read_only" => Ok(AccessType::ReadOnly),
            "write_only" => Ok(AccessType::WriteOnly),
            "read_write" => Ok(AccessType::ReadWrite),
            _ => Err(ModelError::InvalidAccess {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::ReadOnly => "read_only",
            AccessType::WriteOnly => "write_only",
            AccessType::ReadWrite => "read_write",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition bound to a node, with the path from that node to the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedCondition {
    pub name: String,
    pub reference: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

/// Fields common to every item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemInfo {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access: Option<AccessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<AttachedCondition>,
}

impl ItemInfo {
    /// Item with a required description
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        help: Option<String>,
    ) -> ModelResult<Self> {
        let description = description.ok_or(ModelError::MissingDescription)?;
        Self::build(name.into(), description, help)
    }

    /// Enumeration member, where the description may be omitted
    pub fn for_member(
        name: impl Into<String>,
        description: Option<String>,
        help: Option<String>,
    ) -> ModelResult<Self> {
        Self::build(name.into(), description.unwrap_or_default(), help)
    }

    fn build(name: String, description: String, help: Option<String>) -> ModelResult<Self> {
        if RESERVED_NAMES.iter().any(|r| name.eq_ignore_ascii_case(r)) {
            return Err(ModelError::ReservedName { name });
        }

        Ok(Self {
            name,
            description,
            help,
            access: None,
            condition: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn access(&self) -> Option<AccessType> {
        self.access
    }

    pub fn condition(&self) -> Option<&AttachedCondition> {
        self.condition.as_ref()
    }

    /// Description as published to the device: `desc` or `desc:help`
    pub fn rci_description(&self) -> String {
        match &self.help {
            Some(help) => format!("{}:{}", self.description, help),
            None => self.description.clone(),
        }
    }

    /// Name usable as a generated identifier
    pub fn sanitized_name(&self) -> String {
        self.name.replace('-', "_").replace('.', "_fullstop_")
    }

    pub fn set_access(&mut self, access: AccessType) -> ModelResult<()> {
        if self.access.is_some() {
            return Err(ModelError::DuplicateAccess {
                value: access.as_str().to_string(),
            });
        }
        self.access = Some(access);
        Ok(())
    }

    /// Apply `access` only when none was declared
    pub fn inherit_access(&mut self, access: AccessType) {
        self.access.get_or_insert(access);
    }

    /// Bind `condition` to the node at `current`
    pub fn attach_condition(&mut self, condition: &Condition, current: &Location) -> ModelResult<()> {
        if self.condition.is_some() {
            return Err(ModelError::DuplicateConditionKeyword {
                name: condition.name().to_string(),
            });
        }

        let reference = condition.source().relative_to(current)?;
        self.condition = Some(AttachedCondition {
            name: condition.name().to_string(),
            reference,
            predicate: condition.predicate().clone(),
        });
        Ok(())
    }
}

/// Member of an `enum` or `ref_enum` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    #[serde(flatten)]
    pub info: ItemInfo,
}

/// Path from a `ref_enum` element into the setting table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    #[serde(flatten)]
    pub info: ItemInfo,
}

impl EnumValue {
    pub fn new(name: &str, description: Option<String>, help: Option<String>) -> ModelResult<Self> {
        Ok(Self {
            info: ItemInfo::for_member(name, description, help)?,
        })
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }
}

impl Reference {
    pub fn new(path: &str, description: Option<String>, help: Option<String>) -> ModelResult<Self> {
        Ok(Self {
            info: ItemInfo::for_member(path, description, help)?,
        })
    }

    /// The absolute path, e.g. `/network/interfaces`
    pub fn path(&self) -> &str {
        self.info.name()
    }
}

/// A node of the configuration tree. Enumeration members hang off their
/// element rather than forming nodes of their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Element(Element),
    List(ItemList),
}

impl Item {
    pub fn info(&self) -> &ItemInfo {
        match self {
            Item::Element(element) => element.info(),
            Item::List(list) => list.info(),
        }
    }

    pub fn name(&self) -> &str {
        self.info().name()
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Item::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Item::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ItemList> {
        match self {
            Item::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ItemList> {
        match self {
            Item::List(list) => Some(list),
            _ => None,
        }
    }
}

impl From<Element> for Item {
    fn from(element: Element) -> Self {
        Item::Element(element)
    }
}

impl From<ItemList> for Item {
    fn from(list: ItemList) -> Self {
        Item::List(list)
    }
}
