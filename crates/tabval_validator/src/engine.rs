//! Main validation engine.
//!
//! This module provides the [`ReportBuilder`] that evaluates a rule set
//! against a table and collects every violation into a [`Report`].

use crate::checks::{
    CheckKind, check_codes, check_length, check_pattern, check_range, check_type,
    distinct_values, missing_rows,
};
use crate::{StorageType, Table, TableError, ValidationContext};
use std::collections::HashSet;
use std::time::Instant;
use tabval_core::{CellValue, Report, Rule, RuleSet, ViolationRecord};
use tracing::{debug, info, warn};

/// Evaluates a rule set against tables.
///
/// Each call to [`ReportBuilder::build`] recomputes the full report; nothing is
/// cached between calls, so building twice on an unchanged table yields
/// identical reports.
///
/// # Example
///
/// ```rust
/// use tabval_core::{CellValue, DeclaredType, RowRef, RuleBuilder, RuleSet};
/// use tabval_validator::{DataTable, ReportBuilder, StorageType};
///
/// let rules = RuleSet::from_rules([RuleBuilder::new("age", DeclaredType::Integer)
///     .max_length(2)
///     .required(true)])
/// .unwrap();
///
/// let table = DataTable::new()
///     .with_column("age", StorageType::Untyped, vec![17.into(), "17a".into(), CellValue::Null])
///     .unwrap();
///
/// let report = ReportBuilder::new(&rules).build(&table).unwrap();
///
/// for record in &report {
///     println!("{}", record);
/// }
/// assert_eq!(report.len(), 3);
/// assert_eq!(report.records()[2].row_index, RowRef::Row(3));
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    rules: &'a RuleSet,
    context: ValidationContext,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a report builder for a rule set.
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            context: ValidationContext::default(),
        }
    }

    /// Sets the validation options.
    pub fn with_context(mut self, context: ValidationContext) -> Self {
        self.context = context;
        self
    }

    /// Validates a table and returns every violation found.
    ///
    /// Columns are reported in rule set order. A column absent from the table
    /// yields one column-level record and no other checks. Present columns run
    /// the type, length, range, codes and pattern checks over their distinct
    /// values, then the missing check when the rule requires values.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the table fails to provide a column that it
    /// reports as present. No partial report is returned.
    pub fn build(&self, table: &dyn Table) -> Result<Report, TableError> {
        let start = Instant::now();
        info!(
            "Validating {} column rule(s) against {} row(s)",
            self.rules.len(),
            table.num_rows()
        );
        if !self.context.metadata.is_empty() {
            debug!("Validation metadata: {:?}", self.context.metadata);
        }

        let mut records = Vec::new();
        for rule in self.rules {
            if !table.has_column(rule.column()) {
                warn!("Column '{}' is missing from the table", rule.column());
                records.push(ViolationRecord::column_missing(rule));
                continue;
            }
            self.check_column(rule, table, &mut records)?;
        }

        info!(
            "Validation finished with {} violation(s) in {} ms",
            records.len(),
            start.elapsed().as_millis()
        );
        Ok(Report::new(records))
    }

    /// Runs every configured check of one present column.
    fn check_column(
        &self,
        rule: &Rule,
        table: &dyn Table,
        records: &mut Vec<ViolationRecord>,
    ) -> Result<(), TableError> {
        let column = rule.column();
        let storage = table.declared_storage_type(column)?;
        let mut cells = table.column_values(column)?;
        if let Some(sample_size) = self.context.sample_size {
            cells.truncate(sample_size);
        }

        let distinct = distinct_values(&cells);
        debug!(
            "Column '{}': {} row(s), {} distinct value(s), storage {:?}",
            column,
            cells.len(),
            distinct.len(),
            storage
        );

        for kind in CheckKind::VALUE_CHECKS {
            let Some((invalid, message)) = run_value_check(kind, rule, &distinct, storage) else {
                continue;
            };
            if invalid.is_empty() {
                continue;
            }

            // Expand failing values back to every row holding them, in row order.
            let invalid: HashSet<&CellValue> = invalid.into_iter().collect();
            let before = records.len();
            records.extend(
                cells
                    .iter()
                    .filter(|(_, value)| invalid.contains(value))
                    .map(|(row, value)| ViolationRecord::row(*row, column, value, message)),
            );
            debug!(
                "Column '{}': {} check failed for {} value(s), {} row(s)",
                column,
                kind.name(),
                invalid.len(),
                records.len() - before
            );
        }

        if let Some(required) = rule.required() {
            let missing = missing_rows(&cells);
            if !missing.is_empty() {
                debug!("Column '{}': {} missing value(s)", column, missing.len());
            }
            records.extend(missing.into_iter().map(|row| {
                ViolationRecord::row(row, column, &CellValue::Null, required.message())
            }));
        }

        Ok(())
    }
}

/// Runs one value check if the rule configures it, returning the failing
/// values together with the check's message.
fn run_value_check<'r, 'v>(
    kind: CheckKind,
    rule: &'r Rule,
    values: &[&'v CellValue],
    storage: StorageType,
) -> Option<(Vec<&'v CellValue>, &'r str)> {
    match kind {
        CheckKind::Type => {
            let declared = rule.declared_type();
            Some((
                check_type(values, *declared.param(), storage),
                declared.message(),
            ))
        }
        CheckKind::Length => rule
            .max_length()
            .map(|c| (check_length(values, *c.param()), c.message())),
        CheckKind::Range => rule
            .range()
            .map(|c| (check_range(values, c.param(), storage), c.message())),
        CheckKind::Codes => rule
            .allowed_codes()
            .map(|c| (check_codes(values, c.param()), c.message())),
        CheckKind::Pattern => rule
            .pattern()
            .map(|c| (check_pattern(values, c.param()), c.message())),
        CheckKind::Missing => None,
    }
}
