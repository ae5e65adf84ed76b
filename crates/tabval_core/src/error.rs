//! Error types for rule sets.
//!
//! Every error in this module is a configuration error: it is raised while a
//! rule set is being built and always before any table data is read. Data
//! quality findings are never errors, they are records in a [`crate::Report`].

use thiserror::Error;

/// Result type for rule set operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Configuration error raised while building or editing a rule set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A rule already exists for the column
    #[error("rule for {0} already exists")]
    DuplicateRule(String),

    /// No rule exists for the column
    #[error("rule for {0} does not exist")]
    RuleNotFound(String),

    /// Rule parameters are inconsistent with each other
    #[error("invalid rule for column '{column}': {message}")]
    InvalidRuleConfig {
        /// Column the rule applies to
        column: String,
        /// Description of the inconsistency
        message: String,
    },
}

impl SchemaError {
    /// Creates a new duplicate rule error.
    pub fn duplicate(column: impl Into<String>) -> Self {
        Self::DuplicateRule(column.into())
    }

    /// Creates a new rule not found error.
    pub fn not_found(column: impl Into<String>) -> Self {
        Self::RuleNotFound(column.into())
    }

    /// Creates a new invalid rule configuration error.
    pub fn invalid(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRuleConfig {
            column: column.into(),
            message: message.into(),
        }
    }
}
