//! Difference records produced by a schema comparison
//!
//! These types are stable and serialized into report.json.
//! Extend them with new optional fields only.

use serde::{Deserialize, Serialize};

/// Identifies one of the two databases under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The first database (e.g. staging)
    Db1,

    /// The second database (e.g. production)
    Db2,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db1 => write!(f, "database 1"),
            Self::Db2 => write!(f, "database 2"),
        }
    }
}

/// A table that exists in exactly one database
///
/// The single `only_in` field makes "present only in db1" and "present only
/// in db2" mutually exclusive per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDiff {
    /// Table name
    pub table: String,

    /// The side that has the table
    pub only_in: Side,
}

impl TableDiff {
    pub fn new(table: impl Into<String>, only_in: Side) -> Self {
        Self {
            table: table.into(),
            only_in,
        }
    }

    /// The side the table is missing from
    pub fn missing_from(&self) -> Side {
        match self.only_in {
            Side::Db1 => Side::Db2,
            Side::Db2 => Side::Db1,
        }
    }
}

/// Column asymmetry for a table present in at least one database
///
/// Only materialized when at least one of the two lists is non-empty.
/// Column order within each list follows that database's native ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDiff {
    /// Table name
    pub table: String,

    /// Columns present only in database 1
    pub only_in_db1: Vec<String>,

    /// Columns present only in database 2
    pub only_in_db2: Vec<String>,
}

impl ColumnDiff {
    pub fn new(
        table: impl Into<String>,
        only_in_db1: Vec<String>,
        only_in_db2: Vec<String>,
    ) -> Self {
        Self {
            table: table.into(),
            only_in_db1,
            only_in_db2,
        }
    }

    /// Whether both sides are empty (such a record should not be emitted)
    pub fn is_empty(&self) -> bool {
        self.only_in_db1.is_empty() && self.only_in_db2.is_empty()
    }
}

/// A scoped per-table failure recorded during column comparison
///
/// In the hardened (non-strict) mode one bad table does not abort the run;
/// the failure is carried in the result next to the successful entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableError {
    /// Table whose column fetch failed
    pub table: String,

    /// The side the failing query was issued against
    pub side: Side,

    /// Human-readable cause
    pub message: String,
}

impl TableError {
    pub fn new(table: impl Into<String>, side: Side, message: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            side,
            message: message.into(),
        }
    }
}

/// The full result of comparing two database schemas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// Tables present in exactly one database
    pub table_diffs: Vec<TableDiff>,

    /// Per-table column asymmetries
    pub column_diffs: Vec<ColumnDiff>,

    /// Scoped per-table failures (empty in strict mode - strict aborts)
    pub errors: Vec<TableError>,
}

impl SchemaDiff {
    /// An empty diff: identical schemas, no errors
    pub fn empty() -> Self {
        Self {
            table_diffs: Vec::new(),
            column_diffs: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Whether the two schemas were structurally identical
    pub fn is_empty(&self) -> bool {
        self.table_diffs.is_empty() && self.column_diffs.is_empty()
    }

    /// Whether any per-table errors were recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_display() {
        assert_eq!(Side::Db1.to_string(), "database 1");
        assert_eq!(Side::Db2.to_string(), "database 2");
    }

    #[test]
    fn table_diff_missing_from() {
        let diff = TableDiff::new("orders", Side::Db1);
        assert_eq!(diff.only_in, Side::Db1);
        assert_eq!(diff.missing_from(), Side::Db2);
    }

    #[test]
    fn column_diff_emptiness() {
        let empty = ColumnDiff::new("users", vec![], vec![]);
        assert!(empty.is_empty());

        let one_sided = ColumnDiff::new("users", vec!["email".to_string()], vec![]);
        assert!(!one_sided.is_empty());
    }

    #[test]
    fn schema_diff_accessors() {
        let mut diff = SchemaDiff::empty();
        assert!(diff.is_empty());
        assert!(!diff.has_errors());

        diff.table_diffs.push(TableDiff::new("orders", Side::Db1));
        assert!(!diff.is_empty());

        diff.errors
            .push(TableError::new("users", Side::Db2, "permission denied"));
        assert!(diff.has_errors());
    }

    #[test]
    fn diff_serialization() {
        let diff = SchemaDiff {
            table_diffs: vec![TableDiff::new("orders", Side::Db1)],
            column_diffs: vec![ColumnDiff::new(
                "users",
                vec!["email".to_string()],
                vec!["phone".to_string()],
            )],
            errors: vec![],
        };

        let json = serde_json::to_string(&diff).unwrap();
        assert!(json.contains("\"only_in\":\"db1\""));
        assert!(json.contains("\"only_in_db2\":[\"phone\"]"));

        let parsed: SchemaDiff = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, diff);
    }
}
