//! Schema comparison pipeline
//!
//! Orchestrates two catalog adapters into a SchemaDiff: table-level
//! differences first, then column-level differences for every table that
//! exists in at least one database, each compared exactly once.

use crate::set_diff;
use schemadrift_catalog::{DatabaseAdapter, FetchError};
use schemadrift_core::{ColumnDiff, Schema, SchemaDiff, Side, TableDiff, TableError};
use std::collections::HashSet;

/// Errors that abort a comparison
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Listing tables failed on one side. Always fatal: without a table
    /// list there is nothing to compare.
    #[error("failed to list tables from {side}: {source}")]
    ListTables { side: Side, source: FetchError },

    /// A per-table column fetch failed while running in strict mode.
    #[error("failed to fetch columns for table '{table}' from {side}: {source}")]
    FetchSchema {
        table: String,
        side: Side,
        source: FetchError,
    },
}

/// Compares the schemas of two databases
///
/// The pipeline is a single linear pass with no retries:
/// list tables on both sides, diff the lists, then walk the deduplicated
/// union of table names diffing column lists. In the default (non-strict)
/// mode a failing column fetch is recorded as a per-table error and the
/// remaining tables are still compared; `strict(true)` turns the first such
/// failure into a hard abort.
pub struct SchemaComparison {
    strict: bool,
}

impl SchemaComparison {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Abort on the first per-table query error instead of recording it
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Run the comparison
    pub async fn compare(
        &self,
        db1: &dyn DatabaseAdapter,
        db2: &dyn DatabaseAdapter,
    ) -> Result<SchemaDiff, CompareError> {
        let tables1 = db1.list_tables().await.map_err(|source| {
            CompareError::ListTables {
                side: Side::Db1,
                source,
            }
        })?;
        let tables2 = db2.list_tables().await.map_err(|source| {
            CompareError::ListTables {
                side: Side::Db2,
                source,
            }
        })?;

        let (only_in_db1, only_in_db2) = set_diff::diff(&tables1, &tables2);
        let mut table_diffs: Vec<TableDiff> = only_in_db1
            .into_iter()
            .map(|t| TableDiff::new(t, Side::Db1))
            .collect();
        table_diffs.extend(
            only_in_db2
                .into_iter()
                .map(|t| TableDiff::new(t, Side::Db2)),
        );

        let set1: HashSet<&str> = tables1.iter().map(|t| t.as_str()).collect();
        let set2: HashSet<&str> = tables2.iter().map(|t| t.as_str()).collect();

        let mut column_diffs = Vec::new();
        let mut errors = Vec::new();

        // Each table appearing in either database is compared exactly once,
        // in first-appearance order.
        for table in table_union(&tables1, &tables2) {
            let schema1 = self
                .fetch_side(db1, Side::Db1, &table, set1.contains(table.as_str()), &mut errors)
                .await?;
            let schema2 = self
                .fetch_side(db2, Side::Db2, &table, set2.contains(table.as_str()), &mut errors)
                .await?;

            // A fetch error on either side leaves nothing to compare for
            // this table; the error entry already records it.
            let (Some(schema1), Some(schema2)) = (schema1, schema2) else {
                continue;
            };

            let (cols_db1, cols_db2) =
                set_diff::diff(&schema1.column_names(), &schema2.column_names());

            if !cols_db1.is_empty() || !cols_db2.is_empty() {
                column_diffs.push(ColumnDiff::new(
                    table,
                    cols_db1.into_iter().map(String::from).collect(),
                    cols_db2.into_iter().map(String::from).collect(),
                ));
            }
        }

        Ok(SchemaDiff {
            table_diffs,
            column_diffs,
            errors,
        })
    }

    /// Fetch one side's column schema for a table
    ///
    /// A table absent from this side contributes an empty column set; no
    /// query is issued against a database that does not have the table.
    async fn fetch_side(
        &self,
        db: &dyn DatabaseAdapter,
        side: Side,
        table: &str,
        exists: bool,
        errors: &mut Vec<TableError>,
    ) -> Result<Option<Schema>, CompareError> {
        if !exists {
            return Ok(Some(Schema::new()));
        }

        match db.fetch_schema(table).await {
            Ok(schema) => Ok(Some(schema)),
            Err(source) if self.strict => Err(CompareError::FetchSchema {
                table: table.to_string(),
                side,
                source,
            }),
            Err(source) => {
                errors.push(TableError::new(table, side, source.to_string()));
                Ok(None)
            }
        }
    }
}

impl Default for SchemaComparison {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicated union of two table lists, first-appearance order
fn table_union(tables1: &[String], tables2: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut union = Vec::new();

    for name in tables1.iter().chain(tables2) {
        if seen.insert(name.as_str()) {
            union.push(name.clone());
        }
    }

    union
}
