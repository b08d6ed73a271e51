//! Typed paths into the configuration tree

use super::error::{ModelError, ModelResult};
use super::item::AccessType;
use serde::Serialize;
use std::fmt;

/// The two configuration tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Setting,
    State,
}

impl TableType {
    pub const ALL: [TableType; 2] = [TableType::Setting, TableType::State];

    pub fn parse(value: &str) -> ModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ModelError::InvalidTableType {
                value: value.to_string(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Setting => "setting",
            TableType::State => "state",
        }
    }

    /// Access given to elements of a group that never declares one
    pub fn default_access(&self) -> AccessType {
        match self {
            TableType::Setting => AccessType::ReadWrite,
            TableType::State => AccessType::ReadOnly,
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table plus the names leading from a top-level group down to a node.
///
/// Locations are values: descending produces a new location and leaves the
/// original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    table: TableType,
    path: Vec<String>,
}

impl Location {
    pub fn root(table: TableType) -> Self {
        Self {
            table,
            path: Vec::new(),
        }
    }

    /// Parse `[setting:|state:]/a/b/c`. The table defaults to setting.
    ///
    /// Only a `:` ahead of the first `/` names a table; later colons belong
    /// to the names in the path.
    pub fn parse(text: &str) -> ModelResult<Self> {
        let (table, path) = match text.split_once(':') {
            Some((table, path)) if !table.contains('/') => (TableType::parse(table)?, path),
            _ => (TableType::Setting, text),
        };

        let path = path.strip_prefix('/').unwrap_or(path);
        let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        Ok(Self {
            table,
            path: segments,
        })
    }

    pub fn table(&self) -> TableType {
        self.table
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn descend(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self {
            table: self.table,
            path,
        }
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.path.split_last()?;
        Some(Self {
            table: self.table,
            path: parent.to_vec(),
        })
    }

    /// Path from `anchor` to this location in descriptor form.
    ///
    /// Every step up is `..`; every list crossed on the way down is followed
    /// by instance `1`. Without a shared prefix the result is absolute.
    pub fn relative_to(&self, anchor: &Location) -> ModelResult<String> {
        if self.table != anchor.table {
            return Err(ModelError::TableMismatch);
        }

        if self.path == anchor.path {
            return Err(ModelError::CommonObject);
        }

        let common = self
            .path
            .iter()
            .zip(&anchor.path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut relative: Vec<&str> = Vec::new();
        if common == 0 {
            relative.push("");
        } else {
            relative.extend(std::iter::repeat("..").take(anchor.depth() - common));
        }

        let last = self.path.len().saturating_sub(1);
        for (index, segment) in self.path.iter().enumerate().skip(common) {
            relative.push(segment);
            if index != last {
                relative.push("1");
            }
        }

        Ok(relative.join("/"))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:/{}", self.table, self.path.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn loc(text: &str) -> Location {
        Location::parse(text).unwrap()
    }

    #[test]
    fn test_parse_defaults_to_setting() {
        let location = loc("/serial/baud");
        assert_eq!(location.table(), TableType::Setting);
        assert_eq!(location.path(), ["serial", "baud"]);

        let location = loc("State:system/uptime/");
        assert_eq!(location.table(), TableType::State);
        assert_eq!(location.path(), ["system", "uptime"]);
        assert_eq!(location.to_string(), "state:/system/uptime");
    }

    #[test]
    fn test_parse_rejects_unknown_table() {
        assert_matches!(
            Location::parse("config:/a"),
            Err(ModelError::InvalidTableType { ref value }) if value == "config"
        );
    }

    #[test]
    fn test_parse_keeps_colons_inside_names() {
        let location = loc("/g/ns:e");
        assert_eq!(location.table(), TableType::Setting);
        assert_eq!(location.path(), ["g", "ns:e"]);

        let location = loc("state:/sys/a::b");
        assert_eq!(location.table(), TableType::State);
        assert_eq!(location.path(), ["sys", "a::b"]);
    }

    #[test]
    fn test_descend_leaves_original_untouched() {
        let group = Location::root(TableType::Setting).descend("g1");
        let element = group.descend("e1");
        assert_eq!(group.depth(), 1);
        assert_eq!(element.depth(), 2);
        assert_eq!(element.parent(), Some(group));
    }

    #[test]
    fn test_relative_to_sibling_and_cousin() {
        assert_eq!(loc("/g1/e1").relative_to(&loc("/g1/l1/e2")).unwrap(), "../../e1");
        assert_eq!(loc("/g1/l1/e1").relative_to(&loc("/g1/e2")).unwrap(), "../l1/1/e1");
        assert_eq!(loc("/g1/e1").relative_to(&loc("/g1/e2")).unwrap(), "../e1");
    }

    #[test]
    fn test_relative_to_without_common_prefix_is_absolute() {
        assert_eq!(loc("/g2/l/e").relative_to(&loc("/g1/x")).unwrap(), "/g2/1/l/1/e");
    }

    #[test]
    fn test_up_steps_match_depth_difference() {
        let anchor = loc("/g1/a/b/c");
        let relative = loc("/g1/e").relative_to(&anchor).unwrap();
        let ups = relative.split('/').filter(|s| *s == "..").count();
        assert_eq!(ups, anchor.depth() - 1);
    }

    #[test]
    fn test_relative_to_failures() {
        assert_matches!(
            loc("/g1/e1").relative_to(&loc("/g1/e1")),
            Err(ModelError::CommonObject)
        );
        assert_matches!(
            loc("state:/g1/e1").relative_to(&loc("/g1/e2")),
            Err(ModelError::TableMismatch)
        );
    }
}
