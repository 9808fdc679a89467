//! Sift - chainable filtering and sorting for in-memory collections.
//!
//! A [`Collection`] wraps a `Vec` of items. Its operations can be chained in
//! code, or driven by a pipe expression that names registered members:
//!
//! ```text
//! adult(18) | male()
//! ```
//!
//! Expressions are parsed and dispatched by [`sift_pipe`]; this crate adds
//! the collection target, a field-query vocabulary ([`Query`], [`Clause`],
//! [`Op`]) and a ready-made set of pipe members built on it.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sift::{Collection, Record};
//!
//! let mut people = Collection::new(vec![
//!     json!({"age": 30, "gender": "male"}),
//!     json!({"age": 15, "gender": "male"}),
//!     json!({"age": 40, "gender": "female"}),
//! ])
//! .with_member("adult", |c, args| {
//!     let min = args.first().and_then(|a| a.as_number()).map_or(18.0, |n| n.to_f64());
//!     Ok(c.filter(|p| p.field("age").as_number().is_some_and(|age| age.to_f64() >= min)))
//! })
//! .with_member("male", |c, _args| {
//!     Ok(c.filter(|p| p.field("gender").as_str() == Some("male")))
//! });
//!
//! people.pipe("adult(18) | male()").unwrap();
//! assert_eq!(people.items(), &[json!({"age": 30, "gender": "male"})]);
//! ```
//!
//! # Query Members
//!
//! [`Collection::with_query_members`] registers `where`, `where_not`,
//! `sort_by`, `limit`, `offset` and `reverse` for any [`Record`] type:
//!
//! ```rust
//! use serde_json::json;
//! use sift::Collection;
//!
//! let mut tasks = Collection::new(vec![
//!     json!({"title": "docs", "priority": 3}),
//!     json!({"title": "bug", "priority": 5}),
//!     json!({"title": "deploy", "priority": 4}),
//! ])
//! .with_query_members();
//!
//! tasks.pipe("where(priority, >, 3) | sort_by(priority, desc)").unwrap();
//! assert_eq!(tasks.count(), 2);
//! assert_eq!(tasks.items()[0]["title"], "bug");
//! ```
//!
//! # Query Semantics
//!
//! Queries combine three clause groups with fixed logic:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, OR no OR clauses exist)
//!       ∧ (no NOT clause matches)
//! ```
//!
//! # Field Types and Operators
//!
//! | Type | Operators |
//! |------|-----------|
//! | String | `Eq`, `Ne`, `StartsWith`, `EndsWith`, `Contains`, `Regex`, `In`, ordering |
//! | Number | `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte`, `In` |
//! | Timestamp | `Eq`, `Ne`, `Before`, `After`, `Gt`, `Gte`, `Lt`, `Lte` |
//! | Bool | `Eq`, `Ne`, `Is` |
//!
//! A string field also compares against a timestamp when it holds a date
//! literal.

mod clause;
mod collection;
mod error;
mod members;
mod op;
mod ordering;
mod query;
mod record;
mod value;

pub use clause::{Clause, ClauseValue};
pub use collection::Collection;
pub use error::{Result, SiftError};
pub use op::Op;
pub use ordering::{compare_by_orderings, compare_values, Dir, OrderBy};
pub use query::Query;
pub use record::Record;
pub use value::{FieldValue, Timestamp};

pub use sift_pipe::{
    apply, execute, is_reserved, member, parse_pipe_expression, parse_pipe_expression_with, run,
    run_with, Arg, Call, ChainError, Chainable, Member, Members, Number, Outcome, ParseError,
    ParseOptions, RESERVED_METHODS,
};
