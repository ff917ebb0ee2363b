//! PostgreSQL adapter using information_schema
//!
//! This adapter lists tables from information_schema.tables and fetches
//! column schemas from information_schema.columns. It works with:
//! - PostgreSQL 9.4+
//! - Amazon Redshift
//! - CockroachDB
//! - Other PostgreSQL-compatible databases
//!
//! ## Authentication
//!
//! The adapter supports multiple authentication methods:
//! 1. Direct password authentication
//! 2. Connection string (PostgreSQL URL format)
//! 3. TLS/SSL connections via native-tls
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Using direct credentials
//! let adapter = PostgresAdapter::connect(
//!     "localhost",
//!     5432,
//!     "mydb",
//!     "username",
//!     "password"
//! ).await?;
//!
//! // Using connection string
//! let adapter = PostgresAdapter::from_connection_string(
//!     "host=localhost port=5432 dbname=mydb user=username password=password"
//! ).await?;
//!
//! // Comparing a non-default namespace
//! let adapter = adapter.with_namespace("analytics");
//! ```
//!
//! Reference: https://www.postgresql.org/docs/current/information-schema.html

use crate::adapter::{DatabaseAdapter, FetchError};
use schemadrift_core::{Nullability, Schema};

#[cfg(feature = "postgres")]
use schemadrift_core::Column;

#[cfg(feature = "postgres")]
use tokio_postgres::{Client, Config as PgConfig, NoTls};

#[cfg(feature = "postgres")]
use postgres_native_tls::MakeTlsConnector;

#[cfg(feature = "postgres")]
use native_tls::TlsConnector;

/// PostgreSQL database adapter
///
/// The adapter is bound to a single database and a single schema namespace
/// (`public` unless overridden); table names it lists and accepts are bare
/// names within that namespace.
pub struct PostgresAdapter {
    /// PostgreSQL client (only available with postgres feature)
    #[cfg(feature = "postgres")]
    client: Client,

    /// Connection host
    host: String,

    /// Connection port
    port: u16,

    /// Database name
    database: String,

    /// Schema namespace queried by list_tables/fetch_schema
    namespace: String,

    /// Placeholder for when feature is disabled
    #[cfg(not(feature = "postgres"))]
    _phantom: std::marker::PhantomData<()>,
}

impl PostgresAdapter {
    /// Create a new PostgreSQL adapter with direct credentials
    ///
    /// This method establishes a connection using host, port, database,
    /// username, and password. For TLS connections, use `connect_with_tls`
    /// instead.
    #[cfg(feature = "postgres")]
    pub async fn connect(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let host = host.into();
        let database = database.into();
        let user = user.into();
        let password = password.into();

        let config = format!(
            "host={} port={} dbname={} user={} password={}",
            host, port, database, user, password
        );

        let (client, connection) = tokio_postgres::connect(&config, NoTls)
            .await
            .map_err(|e| {
                FetchError::AuthenticationError(format!(
                    "Failed to connect to PostgreSQL at {}:{}: {}",
                    host, port, e
                ))
            })?;

        // Spawn connection handler in background
        let host_clone = host.clone();
        let port_clone = port;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!(
                    "PostgreSQL connection error ({}:{}): {}",
                    host_clone, port_clone, e
                );
            }
        });

        Ok(Self {
            client,
            host,
            port,
            database,
            namespace: "public".to_string(),
        })
    }

    /// Create adapter without postgres feature (returns error)
    #[cfg(not(feature = "postgres"))]
    pub async fn connect(
        _host: impl Into<String>,
        _port: u16,
        _database: impl Into<String>,
        _user: impl Into<String>,
        _password: impl Into<String>,
    ) -> Result<Self, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    /// Create a PostgreSQL adapter with TLS support
    ///
    /// Use this for remote databases where data encryption is required.
    #[cfg(feature = "postgres")]
    pub async fn connect_with_tls(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let host = host.into();
        let database = database.into();
        let user = user.into();
        let password = password.into();

        let config = format!(
            "host={} port={} dbname={} user={} password={}",
            host, port, database, user, password
        );

        let connector = TlsConnector::builder().build().map_err(|e| {
            FetchError::ConfigError(format!("Failed to create TLS connector: {}", e))
        })?;

        let tls = MakeTlsConnector::new(connector);

        let (client, connection) = tokio_postgres::connect(&config, tls).await.map_err(|e| {
            FetchError::AuthenticationError(format!(
                "Failed to connect to PostgreSQL at {}:{} with TLS: {}",
                host, port, e
            ))
        })?;

        let host_clone = host.clone();
        let port_clone = port;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!(
                    "PostgreSQL TLS connection error ({}:{}): {}",
                    host_clone, port_clone, e
                );
            }
        });

        Ok(Self {
            client,
            host,
            port,
            database,
            namespace: "public".to_string(),
        })
    }

    /// Create adapter without postgres feature (returns error)
    #[cfg(not(feature = "postgres"))]
    pub async fn connect_with_tls(
        _host: impl Into<String>,
        _port: u16,
        _database: impl Into<String>,
        _user: impl Into<String>,
        _password: impl Into<String>,
    ) -> Result<Self, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    /// Create adapter from a PostgreSQL connection string
    ///
    /// Supports standard PostgreSQL connection string format:
    /// `host=localhost port=5432 dbname=mydb user=postgres password=secret`
    #[cfg(feature = "postgres")]
    pub async fn from_connection_string(conn_str: &str) -> Result<Self, FetchError> {
        let config: PgConfig = conn_str
            .parse()
            .map_err(|e| FetchError::ConfigError(format!("Invalid connection string: {}", e)))?;

        // Extract connection info for error messages
        let host = config
            .get_hosts()
            .first()
            .map(|h| format!("{:?}", h))
            .unwrap_or_else(|| "localhost".to_string());
        let port = config.get_ports().first().copied().unwrap_or(5432);
        let database = config.get_dbname().unwrap_or("postgres").to_string();

        let (client, connection) = tokio_postgres::connect(conn_str, NoTls)
            .await
            .map_err(|e| FetchError::AuthenticationError(format!("Failed to connect: {}", e)))?;

        let host_clone = host.clone();
        let port_clone = port;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!(
                    "PostgreSQL connection error ({}:{}): {}",
                    host_clone, port_clone, e
                );
            }
        });

        Ok(Self {
            client,
            host,
            port,
            database,
            namespace: "public".to_string(),
        })
    }

    /// Create adapter without postgres feature (returns error)
    #[cfg(not(feature = "postgres"))]
    pub async fn from_connection_string(_conn_str: &str) -> Result<Self, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    /// Create adapter from a PostgreSQL connection string with TLS
    #[cfg(feature = "postgres")]
    pub async fn from_connection_string_with_tls(conn_str: &str) -> Result<Self, FetchError> {
        let config: PgConfig = conn_str
            .parse()
            .map_err(|e| FetchError::ConfigError(format!("Invalid connection string: {}", e)))?;

        let host = config
            .get_hosts()
            .first()
            .map(|h| format!("{:?}", h))
            .unwrap_or_else(|| "localhost".to_string());
        let port = config.get_ports().first().copied().unwrap_or(5432);
        let database = config.get_dbname().unwrap_or("postgres").to_string();

        let connector = TlsConnector::builder().build().map_err(|e| {
            FetchError::ConfigError(format!("Failed to create TLS connector: {}", e))
        })?;

        let tls = MakeTlsConnector::new(connector);

        let (client, connection) = tokio_postgres::connect(conn_str, tls).await.map_err(|e| {
            FetchError::AuthenticationError(format!("Failed to connect with TLS: {}", e))
        })?;

        let host_clone = host.clone();
        let port_clone = port;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!(
                    "PostgreSQL TLS connection error ({}:{}): {}",
                    host_clone, port_clone, e
                );
            }
        });

        Ok(Self {
            client,
            host,
            port,
            database,
            namespace: "public".to_string(),
        })
    }

    /// Create adapter without postgres feature (returns error)
    #[cfg(not(feature = "postgres"))]
    pub async fn from_connection_string_with_tls(_conn_str: &str) -> Result<Self, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    /// Set the schema namespace to read (default: "public")
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Decode information_schema's is_nullable column
    pub fn map_nullability(is_nullable: &str) -> Nullability {
        match is_nullable.to_uppercase().as_str() {
            "YES" => Nullability::Yes,
            "NO" => Nullability::No,
            _ => Nullability::Unknown,
        }
    }

    /// Get the connection host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the connection port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the schema namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[cfg(feature = "postgres")]
    fn map_query_error(e: tokio_postgres::Error, context: &str) -> FetchError {
        let err_str = e.to_string();
        if err_str.contains("does not exist") {
            FetchError::TableNotFound(context.to_string())
        } else if err_str.contains("permission denied") {
            FetchError::PermissionDenied(format!("Cannot access {}: {}", context, err_str))
        } else {
            FetchError::QueryError(err_str)
        }
    }
}

#[async_trait::async_trait]
impl DatabaseAdapter for PostgresAdapter {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    #[cfg(feature = "postgres")]
    async fn list_tables(&self) -> Result<Vec<String>, FetchError> {
        let query = r#"
            SELECT table_name
            FROM information_schema.tables
            WHERE table_catalog = $1
              AND table_schema = $2
              AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = self
            .client
            .query(query, &[&self.database, &self.namespace])
            .await
            .map_err(|e| Self::map_query_error(e, &self.database))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get(0)
                .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
            tables.push(name);
        }

        // No tables is a valid (empty) schema, not an error
        Ok(tables)
    }

    #[cfg(not(feature = "postgres"))]
    async fn list_tables(&self) -> Result<Vec<String>, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    #[cfg(feature = "postgres")]
    async fn fetch_schema(&self, table: &str) -> Result<Schema, FetchError> {
        // Parameterized metadata query; result is fully drained into rows
        // and released on every path, including decode failure below.
        let query = r#"
            SELECT
                column_name,
                data_type,
                is_nullable,
                ordinal_position,
                column_default,
                character_maximum_length
            FROM information_schema.columns
            WHERE table_catalog = $1
              AND table_schema = $2
              AND table_name = $3
            ORDER BY ordinal_position
        "#;

        let rows = self
            .client
            .query(query, &[&self.database, &self.namespace, &table])
            .await
            .map_err(|e| Self::map_query_error(e, table))?;

        let mut columns = Vec::with_capacity(rows.len());

        for row in rows {
            // Only the name participates in comparison; type and
            // nullability are decoded for display, the rest discarded.
            let col_name: String = row
                .try_get(0)
                .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
            let data_type: String = row
                .try_get(1)
                .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
            let is_nullable: String = row
                .try_get(2)
                .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

            columns.push(
                Column::new(col_name, data_type)
                    .with_nullability(Self::map_nullability(&is_nullable)),
            );
        }

        if columns.is_empty() {
            return Err(FetchError::TableNotFound(format!(
                "Table {}.{}.{} not found or has no columns",
                self.database, self.namespace, table
            )));
        }

        Ok(Schema::from_columns(columns))
    }

    #[cfg(not(feature = "postgres"))]
    async fn fetch_schema(&self, _table: &str) -> Result<Schema, FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }

    #[cfg(feature = "postgres")]
    async fn test_connection(&self) -> Result<(), FetchError> {
        // Simple query to test connection
        self.client
            .query("SELECT 1", &[])
            .await
            .map_err(|e| FetchError::QueryError(format!("Connection test failed: {}", e)))?;
        Ok(())
    }

    #[cfg(not(feature = "postgres"))]
    async fn test_connection(&self) -> Result<(), FetchError> {
        Err(FetchError::ConfigError(
            "PostgreSQL support not compiled. Rebuild with: cargo build --features postgres"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullability_decode() {
        assert_eq!(PostgresAdapter::map_nullability("YES"), Nullability::Yes);
        assert_eq!(PostgresAdapter::map_nullability("yes"), Nullability::Yes);
        assert_eq!(PostgresAdapter::map_nullability("NO"), Nullability::No);
        assert_eq!(PostgresAdapter::map_nullability("no"), Nullability::No);
        assert_eq!(
            PostgresAdapter::map_nullability("maybe"),
            Nullability::Unknown
        );
        assert_eq!(PostgresAdapter::map_nullability(""), Nullability::Unknown);
    }
}
