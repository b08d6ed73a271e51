//! Configuration data model
//!
//! Groups, lists and elements form a tree per table. Nodes check their own
//! constraints as they are completed; checks spanning the whole tree live in
//! [`crate::validation`].

pub mod condition;
pub mod element;
pub mod error;
pub mod item;
pub mod list;
pub mod location;
pub mod session;
pub mod table;

pub use condition::{Condition, Operation, Predicate, RegexCase};
pub use element::{Element, ElementType, RegexRule};
pub use error::{Bound, ModelError, ModelResult};
pub use item::{AccessType, AttachedCondition, EnumValue, Item, ItemInfo, Reference};
pub use list::{Capacity, Group, ItemList};
pub use location::{Location, TableType};
pub use session::{
    ErrorCatalog, FeatureFlags, GlobalErrors, ItemCategory, ParseSession, Statistics,
};
pub use table::{Resolved, Table};
