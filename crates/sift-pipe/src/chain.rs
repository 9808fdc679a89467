//! Chain dispatcher.
//!
//! The dispatcher runs parsed [`Call`]s against a [`Chainable`] target, in
//! order, and stops at the first step that does not apply.
//!
//! # Per-step outcome
//!
//! ```text
//! Reserved    name is in RESERVED_METHODS          -> stop
//! Unresolved  target.resolve(name) is None         -> stop
//! Failed      the member returned an error         -> stop
//! BrokenChain the member returned another instance -> stop
//! Applied     continue with the same target
//! ```
//!
//! There is no rollback. Steps before the failing one keep their effect on
//! the target.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::arg::Arg;
use crate::call::Call;
use crate::error::ChainError;
use crate::options::ParseOptions;
use crate::parse::parse_pipe_expression_with;

/// Names of a target's baseline operations: the filter primitive, the sort
/// primitive, the pipe entry point, and the item-count and item-list
/// accessors. They can never be called from a pipe expression, even when a
/// target registers a member with the same name.
pub const RESERVED_METHODS: &[&str] = &["filter", "sort", "pipe", "count", "items"];

/// Returns `true` if `name` is in [`RESERVED_METHODS`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_METHODS.contains(&name)
}

/// A callable member of a chainable target.
///
/// A member receives the target and the positional arguments of the step,
/// mutates the target, and returns the same target.
pub type Member<T> = Arc<dyn for<'a> Fn(&'a mut T, &[Arg]) -> anyhow::Result<&'a mut T> + Send + Sync>;

/// Wraps a closure or function as a [`Member`].
///
/// ```
/// use sift_pipe::{member, Member};
///
/// struct Counter(u32);
///
/// let bump: Member<Counter> = member(|c: &mut Counter, _args| {
///     c.0 += 1;
///     Ok(c)
/// });
/// ```
pub fn member<T, F>(f: F) -> Member<T>
where
    F: for<'a> Fn(&'a mut T, &[Arg]) -> anyhow::Result<&'a mut T> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A target whose operations can be looked up by name.
///
/// This is the only thing the dispatcher knows about a target. Absence of a
/// name is an ordinary `None`.
pub trait Chainable: Sized {
    /// Looks up the member called `name`.
    fn resolve(&self, name: &str) -> Option<Member<Self>>;
}

/// A name-to-member table a target can embed to implement [`Chainable`].
pub struct Members<T> {
    table: HashMap<String, Member<T>>,
}

impl<T> Members<T> {
    pub fn new() -> Self {
        Members {
            table: HashMap::new(),
        }
    }

    /// Adds or replaces the member called `name`.
    pub fn insert(&mut self, name: impl Into<String>, member: Member<T>) -> Option<Member<T>> {
        self.table.insert(name.into(), member)
    }

    pub fn get(&self, name: &str) -> Option<Member<T>> {
        self.table.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Member<T>> {
        self.table.remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<T> Default for Members<T> {
    fn default() -> Self {
        Members::new()
    }
}

impl<T> Clone for Members<T> {
    fn clone(&self) -> Self {
        Members {
            table: self.table.clone(),
        }
    }
}

impl<T> fmt::Debug for Members<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Members")
            .field("names", &self.names())
            .finish()
    }
}

/// Outcome of applying one call to a target.
#[derive(Debug)]
pub enum Outcome {
    /// The member ran and returned the target.
    Applied,
    /// The name is reserved.
    Reserved,
    /// The target has no member with this name.
    Unresolved,
    /// The member returned a different instance.
    BrokenChain,
    /// The member returned an error.
    Failed(anyhow::Error),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    fn into_error(self, name: &str) -> Option<ChainError> {
        let name = name.to_string();
        match self {
            Outcome::Applied => None,
            Outcome::Reserved => Some(ChainError::Reserved(name)),
            Outcome::Unresolved => Some(ChainError::Unknown(name)),
            Outcome::BrokenChain => Some(ChainError::BrokenChain(name)),
            Outcome::Failed(cause) => Some(ChainError::Member { name, cause }),
        }
    }
}

/// Applies a single call to `target`.
///
/// Identity is checked by address, so targets should not be zero-sized.
pub fn apply<T: Chainable>(target: &mut T, call: &Call) -> Outcome {
    if is_reserved(&call.name) {
        return Outcome::Reserved;
    }

    let Some(member) = target.resolve(&call.name) else {
        return Outcome::Unresolved;
    };

    let returned: *const T = match member(&mut *target, &call.args) {
        Ok(returned) => returned as *const T,
        Err(cause) => return Outcome::Failed(cause),
    };

    if std::ptr::eq(returned, &*target) {
        Outcome::Applied
    } else {
        Outcome::BrokenChain
    }
}

/// Runs `calls` against `target` in order and returns the target.
///
/// ```
/// use sift_pipe::{execute, member, parse_pipe_expression, Chainable, Member};
///
/// struct Total(i64);
///
/// impl Chainable for Total {
///     fn resolve(&self, name: &str) -> Option<Member<Self>> {
///         match name {
///             "add" => Some(member(|t: &mut Total, args| {
///                 t.0 += args[0].as_number().map(|n| n.to_f64() as i64).unwrap_or(0);
///                 Ok(t)
///             })),
///             _ => None,
///         }
///     }
/// }
///
/// let calls = parse_pipe_expression("add(2) | add(40)").unwrap();
/// let mut total = Total(0);
/// execute(&mut total, &calls).unwrap();
/// assert_eq!(total.0, 42);
/// ```
pub fn execute<'t, T: Chainable>(target: &'t mut T, calls: &[Call]) -> Result<&'t mut T, ChainError> {
    for (index, call) in calls.iter().enumerate() {
        if let Some(err) = apply(target, call).into_error(&call.name) {
            debug!(method = %call.name, step = index, error = %err, "pipe step rejected");
            return Err(err);
        }
        debug!(method = %call.name, step = index, "applied pipe step");
    }
    debug!(steps = calls.len(), "pipe expression complete");
    Ok(target)
}

/// Parses `expression` and runs it against `target`.
pub fn run<'t, T: Chainable>(target: &'t mut T, expression: &str) -> Result<&'t mut T, ChainError> {
    run_with(target, expression, &ParseOptions::default())
}

/// Parses `expression` under `options` and runs it against `target`.
pub fn run_with<'t, T: Chainable>(
    target: &'t mut T,
    expression: &str,
    options: &ParseOptions,
) -> Result<&'t mut T, ChainError> {
    let calls = parse_pipe_expression_with(expression, options)?;
    execute(target, &calls)
}
