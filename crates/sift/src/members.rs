//! Query members that pipe expressions can call on a collection of records.
//!
//! | member                      | effect                                   |
//! |-----------------------------|------------------------------------------|
//! | `where(field, op, value)`   | keep items where the clause matches      |
//! | `where(field, value)`       | shorthand for `where(field, eq, value)`  |
//! | `where_not(field, op, value)` | drop items where the clause matches    |
//! | `sort_by(field, dir?)`      | stable sort, `asc` by default            |
//! | `limit(n)`                  | keep the first `n` items                 |
//! | `offset(n)`                 | drop the first `n` items                 |
//! | `reverse()`                 | reverse the order                        |

use sift_pipe::Arg;

use crate::clause::Clause;
use crate::collection::Collection;
use crate::error::{Result, SiftError};
use crate::op::Op;
use crate::ordering::{Dir, OrderBy};
use crate::query::Query;
use crate::record::Record;

impl<T: Record + 'static> Collection<T> {
    /// Registers the query members listed in this module's table.
    ///
    /// ```
    /// use serde_json::json;
    /// use sift::Collection;
    ///
    /// let mut people = Collection::new(vec![
    ///     json!({"name": "Ann", "age": 30}),
    ///     json!({"name": "Bob", "age": 15}),
    ///     json!({"name": "Cy", "age": 40}),
    /// ])
    /// .with_query_members();
    ///
    /// people.pipe("where(age, >=, 18) | sort_by(age, desc) | limit(1)").unwrap();
    /// assert_eq!(people.items()[0]["name"], "Cy");
    /// ```
    pub fn with_query_members(mut self) -> Self {
        self.register("where", |c, args| {
            let clause = clause_from_args("where", args)?;
            Ok(c.retain_where(&Query::new().and(clause)))
        });
        self.register("where_not", |c, args| {
            let clause = clause_from_args("where_not", args)?;
            Ok(c.retain_where(&Query::new().not(clause)))
        });
        self.register("sort_by", |c, args| {
            let order = order_from_args(args)?;
            Ok(c.retain_where(&Query::new().order_by(order)))
        });
        self.register("limit", |c, args| {
            let n = count_arg("limit", args)?;
            c.items_mut().truncate(n);
            Ok(c)
        });
        self.register("offset", |c, args| {
            let n = count_arg("offset", args)?;
            let items = c.items_mut();
            let n = n.min(items.len());
            items.drain(..n);
            Ok(c)
        });
        self.register("reverse", |c, args| {
            expect_count("reverse", args, 0, 0, "0")?;
            c.items_mut().reverse();
            Ok(c)
        });
        self
    }
}

fn expect_count(
    member: &'static str,
    args: &[Arg],
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<()> {
    if args.len() < min || args.len() > max {
        return Err(SiftError::ArgumentCount {
            member,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn text_arg<'a>(member: &'static str, args: &'a [Arg], position: usize) -> Result<&'a str> {
    let arg = &args[position];
    arg.as_str().ok_or(SiftError::ArgumentType {
        member,
        position: position + 1,
        expected: "text",
        got: arg.kind(),
    })
}

fn clause_from_args(member: &'static str, args: &[Arg]) -> Result<Clause> {
    expect_count(member, args, 2, 3, "2 or 3")?;
    let field = text_arg(member, args, 0)?;
    if args.len() == 2 {
        return Clause::from_arg(field, Op::Eq, &args[1]);
    }
    let op: Op = text_arg(member, args, 1)?.parse()?;
    Clause::from_arg(field, op, &args[2])
}

fn order_from_args(args: &[Arg]) -> Result<OrderBy> {
    expect_count("sort_by", args, 1, 2, "1 or 2")?;
    let field = text_arg("sort_by", args, 0)?;
    let dir = match args.get(1) {
        Some(_) => text_arg("sort_by", args, 1)?.parse()?,
        None => Dir::Asc,
    };
    Ok(OrderBy::new(field, dir))
}

fn count_arg(member: &'static str, args: &[Arg]) -> Result<usize> {
    expect_count(member, args, 1, 1, "1")?;
    let arg = &args[0];
    arg.as_number()
        .and_then(|n| n.as_u64())
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(SiftError::ArgumentType {
            member,
            position: 1,
            expected: "a non-negative whole number",
            got: arg.kind(),
        })
}
