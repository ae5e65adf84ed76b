//! Options for a validation run.

use std::collections::HashMap;

/// Options for building a report.
///
/// The default validates every row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationContext {
    /// Validate only the first N rows of each column
    pub sample_size: Option<usize>,

    /// Additional labels for the run, included in logs
    pub metadata: HashMap<String, String>,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits validation to the first `size` rows.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Adds metadata to the context.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
