//! Mock database adapter for testing
//!
//! This adapter serves predefined tables without connecting to any database.
//! It's useful for:
//! - Unit testing comparison logic
//! - Integration testing CI/CD pipelines
//! - Demos and examples without real credentials
//! - Simulating various error conditions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemadrift_catalog::{MockAdapter, DatabaseAdapter};
//! use schemadrift_core::{Schema, Column};
//!
//! let adapter = MockAdapter::new();
//! adapter.add_table("users", Schema::from_columns(vec![
//!     Column::new("id", "integer"),
//!     Column::new("name", "text"),
//! ])).await;
//!
//! let tables = adapter.list_tables().await?;
//! let schema = adapter.fetch_schema("users").await?;
//! ```
//!
//! ## Simulating Failures
//!
//! ```rust,ignore
//! // Simulate connection failure
//! let adapter = MockAdapter::new().with_connection_failure();
//! assert!(adapter.test_connection().await.is_err());
//!
//! // Simulate network latency
//! let adapter = MockAdapter::new().with_latency(100); // 100ms delay
//! ```

use crate::adapter::{DatabaseAdapter, FetchError};
use schemadrift_core::Schema;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock database adapter for testing
///
/// Tables are kept in insertion order so `list_tables` has a stable,
/// deterministic "native" ordering, like a real catalog query.
pub struct MockAdapter {
    /// Predefined tables in insertion order
    tables: Arc<RwLock<Vec<(String, Schema)>>>,

    /// Errors to return for specific tables
    errors: Arc<RwLock<HashMap<String, FetchError>>>,

    /// Simulate connection failure
    fail_connection: bool,

    /// Simulate query latency (milliseconds)
    latency_ms: u64,

    /// Name to return from name() method
    adapter_name: &'static str,
}

impl MockAdapter {
    /// Create a new mock adapter with no tables
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Vec::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            fail_connection: false,
            latency_ms: 0,
            adapter_name: "Mock",
        }
    }

    /// Add a table with its schema
    ///
    /// Adding a table that already exists replaces its schema in place,
    /// keeping the original position.
    pub async fn add_table(&self, name: impl Into<String>, schema: Schema) {
        let name = name.into();
        let mut tables = self.tables.write().await;
        match tables.iter().position(|(n, _)| *n == name) {
            Some(idx) => tables[idx].1 = schema,
            None => tables.push((name, schema)),
        }
    }

    /// Configure an error to be returned when fetching a specific table
    ///
    /// This allows simulating conditions like permission denied on a single
    /// table while the rest of the comparison proceeds.
    pub async fn add_error_for_table(&self, table: impl Into<String>, error: FetchError) {
        self.errors.write().await.insert(table.into(), error);
    }

    /// Configure to fail all connection tests
    ///
    /// When enabled, `test_connection()` will always return an error.
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }

    /// Configure simulated latency for all operations
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set a custom adapter name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.adapter_name = name;
        self
    }

    /// Get the number of tables stored in the adapter
    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }

    /// Check if a table exists
    pub async fn has_table(&self, name: &str) -> bool {
        self.tables.read().await.iter().any(|(n, _)| n == name)
    }

    /// Clear all stored tables
    pub async fn clear_tables(&self) {
        self.tables.write().await.clear();
    }

    /// Simulate latency if configured
    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockAdapter {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            errors: Arc::clone(&self.errors),
            fail_connection: self.fail_connection,
            latency_ms: self.latency_ms,
            adapter_name: self.adapter_name,
        }
    }
}

#[async_trait::async_trait]
impl DatabaseAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        self.adapter_name
    }

    async fn list_tables(&self) -> Result<Vec<String>, FetchError> {
        self.simulate_latency().await;

        if self.fail_connection {
            return Err(FetchError::NetworkError(
                "Simulated connection failure".to_string(),
            ));
        }

        Ok(self
            .tables
            .read()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn fetch_schema(&self, table: &str) -> Result<Schema, FetchError> {
        self.simulate_latency().await;

        // Check for configured errors first
        if let Some(error) = self.errors.read().await.get(table) {
            return Err(error.clone());
        }

        let tables = self.tables.read().await;
        tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, schema)| schema.clone())
            .ok_or_else(|| FetchError::TableNotFound(table.to_string()))
    }

    async fn test_connection(&self) -> Result<(), FetchError> {
        self.simulate_latency().await;

        if self.fail_connection {
            Err(FetchError::NetworkError(
                "Simulated connection failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Builder for creating MockAdapter with multiple tables
///
/// Provides a fluent API for building a mock adapter with predefined tables.
///
/// # Example
///
/// ```rust,ignore
/// use schemadrift_catalog::MockAdapterBuilder;
/// use schemadrift_core::{Schema, Column};
///
/// let adapter = MockAdapterBuilder::new()
///     .with_table("users", Schema::from_columns(vec![
///         Column::new("id", "integer"),
///         Column::new("name", "text"),
///     ]))
///     .with_table("orders", Schema::from_columns(vec![
///         Column::new("order_id", "integer"),
///         Column::new("user_id", "integer"),
///     ]))
///     .build();
/// ```
pub struct MockAdapterBuilder {
    tables: Vec<(String, Schema)>,
    errors: HashMap<String, FetchError>,
    fail_connection: bool,
    latency_ms: u64,
    adapter_name: &'static str,
}

impl MockAdapterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            errors: HashMap::new(),
            fail_connection: false,
            latency_ms: 0,
            adapter_name: "Mock",
        }
    }

    /// Add a table with its schema
    pub fn with_table(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.tables.push((name.into(), schema));
        self
    }

    /// Add an error for a specific table
    pub fn with_error(mut self, table: impl Into<String>, error: FetchError) -> Self {
        self.errors.insert(table.into(), error);
        self
    }

    /// Configure connection failure
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }

    /// Configure latency
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set adapter name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.adapter_name = name;
        self
    }

    /// Build the MockAdapter
    pub fn build(self) -> MockAdapter {
        MockAdapter {
            tables: Arc::new(RwLock::new(self.tables)),
            errors: Arc::new(RwLock::new(self.errors)),
            fail_connection: self.fail_connection,
            latency_ms: self.latency_ms,
            adapter_name: self.adapter_name,
        }
    }
}

impl Default for MockAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadrift_core::Column;

    #[tokio::test]
    async fn mock_adapter_basic() {
        let adapter = MockAdapter::new();

        adapter
            .add_table(
                "users",
                Schema::from_columns(vec![
                    Column::new("id", "integer"),
                    Column::new("name", "text"),
                ]),
            )
            .await;

        let tables = adapter.list_tables().await.unwrap();
        assert_eq!(tables, vec!["users"]);

        let fetched = adapter.fetch_schema("users").await.unwrap();
        assert_eq!(fetched.columns.len(), 2);
        assert_eq!(fetched.columns[0].name, "id");
        assert_eq!(fetched.columns[1].name, "name");
    }

    #[tokio::test]
    async fn list_tables_preserves_insertion_order() {
        let adapter = MockAdapter::new();

        adapter.add_table("zebra", Schema::new()).await;
        adapter.add_table("alpha", Schema::new()).await;
        adapter.add_table("middle", Schema::new()).await;

        let tables = adapter.list_tables().await.unwrap();
        assert_eq!(tables, vec!["zebra", "alpha", "middle"]);
    }

    #[tokio::test]
    async fn add_table_replaces_in_place() {
        let adapter = MockAdapter::new();

        adapter.add_table("users", Schema::new()).await;
        adapter.add_table("orders", Schema::new()).await;
        adapter
            .add_table(
                "users",
                Schema::from_columns(vec![Column::new("id", "integer")]),
            )
            .await;

        let tables = adapter.list_tables().await.unwrap();
        assert_eq!(tables, vec!["users", "orders"]);
        assert_eq!(adapter.fetch_schema("users").await.unwrap().columns.len(), 1);
    }

    #[tokio::test]
    async fn empty_database_lists_no_tables() {
        let adapter = MockAdapter::new();
        let tables = adapter.list_tables().await.unwrap();
        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn table_not_found() {
        let adapter = MockAdapter::new();

        let result = adapter.fetch_schema("nonexistent").await;
        assert!(matches!(result, Err(FetchError::TableNotFound(_))));
    }

    #[tokio::test]
    async fn connection_failure() {
        let adapter = MockAdapter::new().with_connection_failure();

        let result = adapter.test_connection().await;
        assert!(matches!(result, Err(FetchError::NetworkError(_))));

        let result = adapter.list_tables().await;
        assert!(matches!(result, Err(FetchError::NetworkError(_))));
    }

    #[tokio::test]
    async fn connection_success() {
        let adapter = MockAdapter::new();

        let result = adapter.test_connection().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn custom_error_per_table() {
        let adapter = MockAdapter::new();
        adapter.add_table("restricted", Schema::new()).await;

        adapter
            .add_error_for_table(
                "restricted",
                FetchError::PermissionDenied("Access denied to restricted table".to_string()),
            )
            .await;

        let result = adapter.fetch_schema("restricted").await;
        assert!(matches!(result, Err(FetchError::PermissionDenied(_))));

        // The table still shows up in the listing
        assert_eq!(adapter.list_tables().await.unwrap(), vec!["restricted"]);
    }

    #[tokio::test]
    async fn builder() {
        let adapter = MockAdapterBuilder::new()
            .with_table(
                "users",
                Schema::from_columns(vec![
                    Column::new("id", "integer"),
                    Column::new("email", "text"),
                ]),
            )
            .with_table(
                "orders",
                Schema::from_columns(vec![
                    Column::new("order_id", "integer"),
                    Column::new("total", "numeric"),
                ]),
            )
            .build();

        assert_eq!(adapter.list_tables().await.unwrap(), vec!["users", "orders"]);
        assert_eq!(adapter.fetch_schema("users").await.unwrap().columns.len(), 2);
        assert_eq!(adapter.fetch_schema("orders").await.unwrap().columns.len(), 2);
    }

    #[tokio::test]
    async fn adapter_name() {
        let adapter = MockAdapter::new();
        assert_eq!(adapter.name(), "Mock");

        let adapter = MockAdapter::new().with_name("TestPostgres");
        assert_eq!(adapter.name(), "TestPostgres");
    }

    #[tokio::test]
    async fn table_count_and_clear() {
        let adapter = MockAdapter::new();

        assert_eq!(adapter.table_count().await, 0);

        adapter.add_table("table1", Schema::new()).await;
        adapter.add_table("table2", Schema::new()).await;

        assert_eq!(adapter.table_count().await, 2);
        assert!(adapter.has_table("table1").await);
        assert!(!adapter.has_table("table3").await);

        adapter.clear_tables().await;
        assert_eq!(adapter.table_count().await, 0);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let adapter = MockAdapter::new();
        adapter.add_table("users", Schema::new()).await;

        let cloned = adapter.clone();

        // Both should see the same table (shared state)
        assert!(adapter.has_table("users").await);
        assert!(cloned.has_table("users").await);
    }
}
