//! # tabval core
//!
//! Rule model and report types for validating tabular data.
//!
//! This crate provides the building blocks for declaring what a table's columns
//! must look like and for describing what was found wrong with it.
//!
//! ## Key Concepts
//!
//! - **Rule**: validation configuration of one column (type, length, range,
//!   required, allowed codes, pattern)
//! - **RuleSet**: the rules of a table, keyed by column name
//! - **ViolationRecord**: one violation, located by row and column
//! - **Report**: every violation of one validation run, in a fixed order
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{DeclaredType, RuleBuilder, RuleSet};
//!
//! let rules = RuleSet::from_rules([
//!     RuleBuilder::new("age", DeclaredType::Integer)
//!         .max_length(2)
//!         .required(true),
//!     RuleBuilder::new("code", DeclaredType::String).allowed_codes(["A", "B"]),
//! ])
//! .expect("valid rules");
//!
//! assert_eq!(rules.len(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod rule;
pub mod rule_set;
pub mod value;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use rule::*;
pub use rule_set::*;
pub use value::*;
