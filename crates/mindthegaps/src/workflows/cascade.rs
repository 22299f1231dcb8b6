//! Ordered rule sequences shared by both pipelines.
//!
//! A rule inspects a context and either produces a value or passes. The two
//! combinators differ only in what happens after a rule produces something:
//! [`FirstMatch`] stops, [`CollectAll`] keeps going.

pub(crate) type Rule<C, T> = fn(&C) -> Option<T>;

/// Priority cascade: the earliest rule that fires decides.
pub(crate) struct FirstMatch<'r, C, T> {
    rules: &'r [Rule<C, T>],
}

impl<'r, C, T> FirstMatch<'r, C, T> {
    pub(crate) const fn new(rules: &'r [Rule<C, T>]) -> Self {
        Self { rules }
    }

    pub(crate) fn evaluate(&self, context: &C) -> Option<T> {
        self.rules.iter().find_map(|rule| rule(context))
    }
}

/// Non-short-circuiting sweep: every rule runs, results keep rule order.
pub(crate) struct CollectAll<'r, C, T> {
    rules: &'r [Rule<C, T>],
}

impl<'r, C, T> CollectAll<'r, C, T> {
    pub(crate) const fn new(rules: &'r [Rule<C, T>]) -> Self {
        Self { rules }
    }

    pub(crate) fn evaluate(&self, context: &C) -> Vec<T> {
        self.rules.iter().filter_map(|rule| rule(context)).collect()
    }
}
