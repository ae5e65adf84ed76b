//! # tabval validator
//!
//! Validation engine for tabular data. This crate evaluates a
//! [`tabval_core::RuleSet`] against a [`Table`] and reports every violation:
//!
//! - Type checks, with numeric coercion for untyped columns
//! - Length, range, allowed code and pattern checks
//! - Missing values in required columns
//! - Columns absent from the table
//!
//! Checks run over the distinct values of a column and are expanded back to
//! rows only for failing values.
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{DeclaredType, RuleBuilder, RuleSet};
//! use tabval_validator::{DataTable, ReportBuilder, StorageType};
//!
//! let rules = RuleSet::from_rules([
//!     RuleBuilder::new("code", DeclaredType::String).allowed_codes(["A", "B"]),
//!     RuleBuilder::new("region", DeclaredType::String),
//! ])
//! .unwrap();
//!
//! let table = DataTable::new()
//!     .with_column("code", StorageType::Text, vec!["A".into(), "C".into(), "C".into()])
//!     .unwrap();
//!
//! let report = ReportBuilder::new(&rules).build(&table).unwrap();
//!
//! if report.is_clean() {
//!     println!("Validation passed!");
//! } else {
//!     println!("{}", report.to_json_pretty().unwrap());
//! }
//! assert_eq!(report.len(), 3);
//! ```

mod arrow;
pub mod checks;
mod context;
mod engine;
mod error;
mod table;

pub use arrow::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use table::*;
