//! Rule sets keyed by column name.

use crate::{Result, Rule, RuleBuilder, SchemaError};
use tracing::debug;

/// Collection of column rules, at most one per column.
///
/// Rules keep their creation order, which is also the column order of every
/// report built from the set. Updating a rule keeps its position.
///
/// The set has no interior synchronization: editing it while a report is
/// being built is prevented by the shared borrow the builder holds.
///
/// # Example
///
/// ```rust
/// use tabval_core::{DeclaredType, RuleBuilder, RuleSet, SchemaError};
///
/// let mut rules = RuleSet::new();
/// rules.create(RuleBuilder::new("age", DeclaredType::Integer).required(true))?;
///
/// let duplicate = rules.create(RuleBuilder::new("age", DeclaredType::Float));
/// assert_eq!(duplicate, Err(SchemaError::DuplicateRule("age".to_string())));
/// # Ok::<(), SchemaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set from several rules, in order.
    ///
    /// Stops at the first configuration error; no partially built set is
    /// returned.
    pub fn from_rules<I>(builders: I) -> Result<Self>
    where
        I: IntoIterator<Item = RuleBuilder>,
    {
        let mut set = Self::new();
        for builder in builders {
            set.create(builder)?;
        }
        Ok(set)
    }

    /// Adds a rule for a column that has none yet.
    ///
    /// # Errors
    ///
    /// [`SchemaError::DuplicateRule`] if the column already has a rule, or
    /// [`SchemaError::InvalidRuleConfig`] if the rule parameters are invalid.
    pub fn create(&mut self, builder: RuleBuilder) -> Result<()> {
        if self.contains(builder.column()) {
            return Err(SchemaError::duplicate(builder.column()));
        }
        let rule = builder.build()?;
        debug!("Created rule for column '{}'", rule.column());
        self.rules.push(rule);
        Ok(())
    }

    /// Replaces the rule of a column that already has one.
    ///
    /// The existing rule is left untouched when the new one is invalid.
    ///
    /// # Errors
    ///
    /// [`SchemaError::RuleNotFound`] if the column has no rule, or
    /// [`SchemaError::InvalidRuleConfig`] if the rule parameters are invalid.
    pub fn update(&mut self, builder: RuleBuilder) -> Result<()> {
        let index = self
            .position(builder.column())
            .ok_or_else(|| SchemaError::not_found(builder.column()))?;
        let rule = builder.build()?;
        debug!("Updated rule for column '{}'", rule.column());
        self.rules[index] = rule;
        Ok(())
    }

    /// Removes the rule of a column and returns it.
    ///
    /// # Errors
    ///
    /// [`SchemaError::RuleNotFound`] if the column has no rule.
    pub fn delete(&mut self, column: &str) -> Result<Rule> {
        let index = self
            .position(column)
            .ok_or_else(|| SchemaError::not_found(column))?;
        debug!("Deleted rule for column '{}'", column);
        Ok(self.rules.remove(index))
    }

    /// Returns the rule of a column.
    ///
    /// # Errors
    ///
    /// [`SchemaError::RuleNotFound`] if the column has no rule.
    pub fn get(&self, column: &str) -> Result<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.column() == column)
            .ok_or_else(|| SchemaError::not_found(column))
    }

    /// Returns true if the column has a rule.
    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Iterates over the rules in creation order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Iterates over the column names in creation order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::column)
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.column() == column)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
