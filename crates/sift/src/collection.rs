//! A chainable collection of items.

use std::cmp::Ordering;
use std::fmt;

use sift_pipe::{member, run_with, Arg, ChainError, Chainable, Member, Members, ParseOptions};
use tracing::debug;

use crate::query::Query;
use crate::record::Record;

/// An ordered collection whose operations can be chained in code or driven
/// by a pipe expression.
///
/// The baseline operations ([`filter`](Self::filter), [`sort`](Self::sort),
/// [`pipe`](Self::pipe), [`count`](Self::count), [`items`](Self::items)) are
/// inherent methods and can never be called from an expression. Everything
/// an expression may call is registered by name.
///
/// ```
/// use sift::Collection;
///
/// let mut numbers = Collection::new(vec![5, 1, 4, 2, 3]).with_member("odd", |c, _args| {
///     Ok(c.filter(|n| n % 2 == 1))
/// });
///
/// numbers.pipe("odd()").unwrap().sort(|a, b| a.cmp(b));
/// assert_eq!(numbers.items(), &[1, 3, 5]);
/// assert!(numbers.pipe("count()").is_err());
/// ```
pub struct Collection<T> {
    items: Vec<T>,
    members: Members<Collection<T>>,
    options: ParseOptions,
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Collection {
            items,
            members: Members::new(),
            options: ParseOptions::default(),
        }
    }

    /// Keeps only the items for which `predicate` returns `true`.
    pub fn filter<P>(&mut self, mut predicate: P) -> &mut Self
    where
        P: FnMut(&T) -> bool,
    {
        self.items.retain(|item| predicate(item));
        self
    }

    /// Stable-sorts the items with `compare`.
    pub fn sort<C>(&mut self, compare: C) -> &mut Self
    where
        C: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self
    }

    /// Runs a pipe expression against this collection.
    ///
    /// Steps run in order and the first failure stops the run. Steps that
    /// already ran keep their effect.
    pub fn pipe(&mut self, expression: &str) -> Result<&mut Self, ChainError> {
        let options = self.options;
        let this = run_with(self, expression, &options)?;
        debug!(items = this.items.len(), "pipe applied to collection");
        Ok(this)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mutable access to the backing vector, for members that reshape the
    /// collection (truncate, reverse, drain).
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Registers a member callable from pipe expressions.
    ///
    /// Reserved names can be registered but are still rejected at dispatch.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut Collection<T>, &[Arg]) -> anyhow::Result<&'a mut Collection<T>>
            + Send
            + Sync
            + 'static,
    {
        self.members.insert(name, member(f));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_member<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: for<'a> Fn(&'a mut Collection<T>, &[Arg]) -> anyhow::Result<&'a mut Collection<T>>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, f);
        self
    }

    /// Sets the parse limits used by [`pipe`](Self::pipe).
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn members(&self) -> &Members<Collection<T>> {
        &self.members
    }
}

impl<T: Record> Collection<T> {
    /// Keeps only the items matching `query`'s clauses, then sorts them by
    /// its orderings.
    pub fn retain_where(&mut self, query: &Query) -> &mut Self {
        query.apply(&mut self.items);
        self
    }
}

impl<T> Chainable for Collection<T> {
    fn resolve(&self, name: &str) -> Option<Member<Self>> {
        self.members.get(name)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection::new(Vec::new())
    }
}

impl<T: Clone> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Collection {
            items: self.items.clone(),
            members: self.members.clone(),
            options: self.options,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("members", &self.members.names())
            .field("options", &self.options)
            .finish()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Collection::new(items)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}

impl<'c, T> IntoIterator for &'c Collection<T> {
    type Item = &'c T;
    type IntoIter = std::slice::Iter<'c, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
