//! Clause groups and orderings applied to records.

use crate::clause::Clause;
use crate::ordering::{compare_by_orderings, OrderBy};
use crate::record::Record;

/// A set of clauses plus the orderings to sort survivors by.
///
/// An item matches when every `and` clause matches, at least one `or`
/// clause matches (if there are any), and no `not` clause matches. Missing
/// fields never match a clause, so a `not` clause keeps items that lack the
/// field.
///
/// ```
/// use serde_json::json;
/// use sift::{Clause, Collection, Op, OrderBy, Query};
///
/// let mut stock = Collection::new(vec![
///     json!({"sku": "A-1", "qty": 12}),
///     json!({"sku": "B-7", "qty": 0}),
///     json!({"sku": "A-9", "qty": 4}),
/// ]);
///
/// let query = Query::new()
///     .and(Clause::new("qty", Op::Gt, 0i64))
///     .order_by(OrderBy::asc("qty"));
///
/// stock.retain_where(&query);
/// assert_eq!(stock.items()[0]["sku"], "A-9");
/// assert_eq!(stock.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    all: Vec<Clause>,
    any: Vec<Clause>,
    none: Vec<Clause>,
    orderings: Vec<OrderBy>,
}

impl Query {
    /// Creates an empty query, which matches every item and keeps its order.
    pub fn new() -> Self {
        Query::default()
    }

    /// Requires `clause` to match.
    pub fn and(mut self, clause: Clause) -> Self {
        self.all.push(clause);
        self
    }

    /// Adds `clause` to the group of which at least one must match.
    pub fn or(mut self, clause: Clause) -> Self {
        self.any.push(clause);
        self
    }

    /// Requires `clause` not to match.
    pub fn not(mut self, clause: Clause) -> Self {
        self.none.push(clause);
        self
    }

    /// Adds a sort key. Earlier keys take precedence.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.orderings.push(order);
        self
    }

    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns `true` if the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty() && self.none.is_empty()
    }

    /// Tests one record against the clause groups.
    pub fn matches<R: Record>(&self, item: &R) -> bool {
        let hit = |clause: &Clause| clause.matches(&item.field(&clause.field));

        self.all.iter().all(hit)
            && (self.any.is_empty() || self.any.iter().any(hit))
            && !self.none.iter().any(hit)
    }

    /// Returns the matching records, sorted by the orderings.
    pub fn filter<'a, R: Record>(&self, items: &'a [R]) -> Vec<&'a R> {
        let mut hits: Vec<&'a R> = items.iter().filter(|item| self.matches(*item)).collect();
        hits.sort_by(|a, b| compare_by_orderings(*a, *b, &self.orderings, &R::accessor));
        hits
    }

    /// Stable-sorts records in place by the orderings.
    pub fn sort<R: Record>(&self, items: &mut [R]) {
        if !self.orderings.is_empty() {
            items.sort_by(|a, b| compare_by_orderings(a, b, &self.orderings, &R::accessor));
        }
    }

    /// Drops non-matching records, then sorts the rest.
    pub fn apply<R: Record>(&self, items: &mut Vec<R>) {
        if !self.is_empty() {
            items.retain(|item| self.matches(item));
        }
        self.sort(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;
    use serde_json::{json, Value};

    fn tasks() -> Vec<Value> {
        vec![
            json!({"name": "Write docs", "priority": 3, "done": false}),
            json!({"name": "Fix bug", "priority": 5, "done": true}),
            json!({"name": "Review PR", "priority": 4}),
            json!({"name": "Deploy", "priority": 5, "done": false}),
        ]
    }

    fn names<'a>(items: impl IntoIterator<Item = &'a Value>) -> Vec<&'a str> {
        items
            .into_iter()
            .filter_map(|item| item["name"].as_str())
            .collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let mut items = tasks();
        Query::new().apply(&mut items);
        assert_eq!(items, tasks());
        assert!(Query::new().is_empty());
    }

    #[test]
    fn groups_combine() {
        let query = Query::new()
            .and(Clause::new("priority", Op::Gte, 4i64))
            .or(Clause::new("name", Op::Contains, "bug"))
            .or(Clause::new("name", Op::StartsWith, "Rev"))
            .not(Clause::new("done", Op::Is, true));
        let items = tasks();
        assert_eq!(names(query.filter(&items)), vec!["Review PR"]);
    }

    #[test]
    fn not_keeps_missing_fields() {
        let query = Query::new().not(Clause::new("done", Op::Eq, false));
        let items = tasks();
        assert_eq!(names(query.filter(&items)), vec!["Fix bug", "Review PR"]);
    }

    #[test]
    fn filter_sorts_with_tie_breaker() {
        let query = Query::new()
            .order_by(OrderBy::desc("priority"))
            .order_by(OrderBy::asc("name"));
        let items = tasks();
        assert_eq!(
            names(query.filter(&items)),
            vec!["Deploy", "Fix bug", "Review PR", "Write docs"]
        );
    }

    #[test]
    fn apply_retains_then_sorts() {
        let mut items = tasks();
        Query::new()
            .and(Clause::new("priority", Op::Lt, 5i64))
            .order_by(OrderBy::desc("priority"))
            .apply(&mut items);
        assert_eq!(names(&items), vec!["Review PR", "Write docs"]);
    }
}
