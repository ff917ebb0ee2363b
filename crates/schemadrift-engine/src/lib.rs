//! SchemaDrift Engine
//!
//! Comparison pipeline: the pure set differencer and the orchestration that
//! turns two database catalogs into a SchemaDiff.

pub mod comparison;
pub mod set_diff;

pub use comparison::{CompareError, SchemaComparison};
pub use set_diff::diff;
