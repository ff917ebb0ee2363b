//! Schema types

use serde::{Deserialize, Serialize};

/// Nullability state as reported by the database's metadata views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nullability {
    /// Definitely nullable
    Yes,

    /// Definitely not nullable
    No,

    /// Cannot determine nullability
    Unknown,
}

impl std::fmt::Display for Nullability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "NULL"),
            Self::No => write!(f, "NOT NULL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A column in a table schema
///
/// The metadata queries return more than the name (type, nullability); those
/// fields are kept for display but only `name` participates in comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Column name, compared case-sensitively
    pub name: String,

    /// Engine-native type string (e.g. "integer", "character varying")
    pub data_type: String,

    /// Nullability
    pub nullable: Nullability,
}

impl Column {
    /// Create a new column with unknown nullability
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: Nullability::Unknown,
        }
    }

    /// Set nullability
    pub fn with_nullability(mut self, nullable: Nullability) -> Self {
        self.nullable = nullable;
        self
    }
}

/// An ordered collection of columns
///
/// Column order follows the database's native (declaration) ordering. The
/// order is preserved for reporting but carries no comparison semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of columns
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Create a schema from columns
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_operations() {
        let schema = Schema::from_columns(vec![
            Column::new("id", "integer"),
            Column::new("name", "text"),
        ]);

        assert_eq!(schema.column_names(), vec!["id", "name"]);
        assert!(schema.find_column("id").is_some());
        assert!(schema.find_column("nonexistent").is_none());
        assert!(!schema.is_empty());
        assert!(Schema::new().is_empty());
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let schema = Schema::from_columns(vec![Column::new("Id", "integer")]);

        assert!(schema.find_column("Id").is_some());
        assert!(schema.find_column("id").is_none());
    }

    #[test]
    fn nullability_display() {
        assert_eq!(Nullability::Yes.to_string(), "NULL");
        assert_eq!(Nullability::No.to_string(), "NOT NULL");
        assert_eq!(Nullability::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn column_builder() {
        let col = Column::new("id", "bigint").with_nullability(Nullability::No);
        assert_eq!(col.name, "id");
        assert_eq!(col.data_type, "bigint");
        assert_eq!(col.nullable, Nullability::No);
    }
}
