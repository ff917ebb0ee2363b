//! SchemaDrift Core
//!
//! Core domain model with stable, versioned types.
//! The report schema is part of the public API - extend it, never break it.

pub mod config;
pub mod diff;
pub mod report;
pub mod schema;

pub use config::{Config, ConfigError, DatabaseConfig};
pub use diff::{ColumnDiff, SchemaDiff, Side, TableDiff, TableError};
pub use report::{Report, ReportSummary, ReportVersion};
pub use schema::{Column, Nullability, Schema};
