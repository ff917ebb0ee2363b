//! Report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use crate::diff::SchemaDiff;
use serde::{Deserialize, Serialize};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Tables present only in database 1
    pub tables_only_in_db1: usize,

    /// Tables present only in database 2
    pub tables_only_in_db2: usize,

    /// Tables with column asymmetries
    pub tables_with_column_diffs: usize,

    /// Per-table errors recorded during the run
    pub errors: usize,
}

/// Diff report (report.json v1)
///
/// This is the stable output format.
/// All fields are versioned and backward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// Full comparison result
    pub diff: SchemaDiff,
}

impl Report {
    /// Create a report from a comparison result
    pub fn from_diff(diff: SchemaDiff) -> Self {
        use crate::diff::Side;

        let summary = ReportSummary {
            tables_only_in_db1: diff
                .table_diffs
                .iter()
                .filter(|d| d.only_in == Side::Db1)
                .count(),
            tables_only_in_db2: diff
                .table_diffs
                .iter()
                .filter(|d| d.only_in == Side::Db2)
                .count(),
            tables_with_column_diffs: diff.column_diffs.len(),
            errors: diff.errors.len(),
        };

        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary,
            diff,
        }
    }

    /// Check if the report carries any per-table errors
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Check if the compared schemas were identical
    pub fn is_clean(&self) -> bool {
        self.diff.is_empty() && !self.has_errors()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ColumnDiff, Side, TableDiff, TableError};

    #[test]
    fn empty_report() {
        let report = Report::from_diff(SchemaDiff::empty());
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.summary, ReportSummary::default());
        assert!(report.is_clean());
        assert!(!report.has_errors());
    }

    #[test]
    fn report_summary_counts() {
        let diff = SchemaDiff {
            table_diffs: vec![
                TableDiff::new("orders", Side::Db1),
                TableDiff::new("products", Side::Db2),
                TableDiff::new("invoices", Side::Db2),
            ],
            column_diffs: vec![ColumnDiff::new(
                "users",
                vec!["email".to_string()],
                vec![],
            )],
            errors: vec![TableError::new("audit", Side::Db2, "permission denied")],
        };

        let report = Report::from_diff(diff);
        assert_eq!(report.summary.tables_only_in_db1, 1);
        assert_eq!(report.summary.tables_only_in_db2, 2);
        assert_eq!(report.summary.tables_with_column_diffs, 1);
        assert_eq!(report.summary.errors, 1);
        assert!(report.has_errors());
        assert!(!report.is_clean());
    }

    #[test]
    fn report_serialization() {
        let report = Report::from_diff(SchemaDiff::empty());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"diff\""));
    }

    #[test]
    fn version_display() {
        assert_eq!(ReportVersion::CURRENT.to_string(), "1.0");
    }
}
