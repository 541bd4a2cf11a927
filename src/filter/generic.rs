//! Generic filtering framework
//!
//! A small trait-based predicate layer over domain records. Concrete filters
//! live in sibling modules; this module only provides the trait and combinators.

use std::fmt::Debug;

/// A predicate over values of type `T`
pub trait Filter<T>: Debug {
    /// Whether the input passes the filter
    fn matches(&self, input: &T) -> bool;

    /// Short human readable description, used in debug logging
    fn describe(&self) -> String;

    /// Keep only the inputs that pass
    fn apply<'a>(&self, inputs: &[&'a T]) -> Vec<&'a T> {
        inputs.iter().copied().filter(|i| self.matches(i)).collect()
    }
}

/// A filter that combines multiple filters with a logical AND
#[derive(Debug)]
pub struct AndFilter<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T> Default for AndFilter<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<T> AndFilter<T> {
    /// Create a new AND filter. An empty filter list passes everything.
    #[must_use]
    pub fn new(filters: Vec<Box<dyn Filter<T>>>) -> Self {
        Self { filters }
    }

    /// Add another filter to the conjunction
    #[must_use]
    pub fn and(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl<T: Debug> Filter<T> for AndFilter<T> {
    fn matches(&self, input: &T) -> bool {
        self.filters.iter().all(|f| f.matches(input))
    }

    fn describe(&self) -> String {
        if self.filters.is_empty() {
            return "all".to_string();
        }
        self.filters
            .iter()
            .map(|f| f.describe())
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
