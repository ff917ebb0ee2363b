//! Database catalog adapters for schema diffing
//!
//! This module provides adapters that list the tables of a database and
//! fetch per-table column schemas from its INFORMATION_SCHEMA views.
//!
//! ## Features
//!
//! Enable engine support via Cargo features:
//! - `postgres` - PostgreSQL/Redshift support
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemadrift_catalog::{DatabaseAdapter, PostgresAdapter};
//!
//! let adapter = PostgresAdapter::connect("localhost", 5432, "app", "me", "secret").await?;
//! let tables = adapter.list_tables().await?;
//! let schema = adapter.fetch_schema(&tables[0]).await?;
//! ```

pub mod adapter;
pub mod mock;
pub mod postgres;

pub use adapter::{DatabaseAdapter, FetchError};
pub use mock::{MockAdapter, MockAdapterBuilder};
pub use postgres::PostgresAdapter;
