//! Database adapter trait for listing tables and fetching their schemas

use schemadrift_core::Schema;

/// Errors that can occur when reading database metadata
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FetchError {
    /// Whether this error means the connection itself is unusable
    ///
    /// Connection-level failures abort the whole comparison; anything else
    /// is scoped to the single query that produced it.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationError(_) | Self::NetworkError(_) | Self::ConfigError(_)
        )
    }
}

/// Trait for adapters bound to a single database
///
/// An adapter owns one connection, scoped to one database and one schema
/// namespace within it. All calls block (await) until the result set has
/// been fully drained.
#[async_trait::async_trait]
pub trait DatabaseAdapter: Send + Sync {
    /// Get the adapter name (e.g., "PostgreSQL")
    fn name(&self) -> &'static str;

    /// List the table names in the adapter's schema namespace
    ///
    /// A database with no tables returns an empty list, not an error.
    async fn list_tables(&self) -> Result<Vec<String>, FetchError>;

    /// Fetch the column schema for a specific table
    ///
    /// Columns come back in the database's native declaration order.
    /// A nonexistent table yields `FetchError::TableNotFound`.
    async fn fetch_schema(&self, table: &str) -> Result<Schema, FetchError>;

    /// Test the connection to the database
    ///
    /// This is useful for validating credentials before starting
    /// a comparison.
    async fn test_connection(&self) -> Result<(), FetchError>;
}
