//! Field-value mappings for insert operations.

use crate::filter::Value;

/// Ordered field-to-value mapping supplied to
/// [`create_one`](crate::Repository::create_one).
///
/// Carries no schema knowledge of its own: required fields, types, and
/// defaults are enforced by the store's constraints at execution time, and a
/// mapping that violates them surfaces as a constraint error. An empty
/// mapping inserts a row from column defaults alone.
#[derive(Debug, Clone, Default)]
pub struct Values {
    fields: Vec<(&'static str, Value)>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column for the insert. Chainable.
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(&'static str, Value)> {
        self.fields.iter()
    }
}
