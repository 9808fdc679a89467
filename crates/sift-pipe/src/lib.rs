//! Pipe expressions: parse `name(args) | name(args)` strings and run them
//! against a chainable target.
//!
//! A pipe expression encodes a sequence of chained method calls as a single
//! string:
//!
//! ```text
//! adult(18) | male() | sort_by("age", desc)
//! ```
//!
//! Parsing turns the string into [`Call`] descriptors, each carrying typed
//! [`Arg`] values. The dispatcher ([`execute`]) looks each name up on a
//! [`Chainable`] target, rejects [`RESERVED_METHODS`], invokes the member,
//! and checks that the member returned the very same target.
//!
//! # Quick Start
//!
//! ```rust
//! use sift_pipe::{member, run, Chainable, Member, Members};
//!
//! #[derive(Default)]
//! struct Ages {
//!     items: Vec<u32>,
//!     members: Members<Ages>,
//! }
//!
//! impl Chainable for Ages {
//!     fn resolve(&self, name: &str) -> Option<Member<Self>> {
//!         self.members.get(name)
//!     }
//! }
//!
//! let mut ages = Ages { items: vec![12, 30, 45], ..Default::default() };
//! ages.members.insert("adult", member(|a: &mut Ages, args| {
//!     let min = args.first().and_then(|arg| arg.as_number()).map_or(18.0, |n| n.to_f64());
//!     a.items.retain(|age| f64::from(*age) >= min);
//!     Ok(a)
//! }));
//!
//! run(&mut ages, "adult(18)").unwrap();
//! assert_eq!(ages.items, vec![30, 45]);
//! ```
//!
//! # Grammar
//!
//! ```text
//! Expression   := Step ("|" Step)*
//! Step         := Identifier "(" ArgList? ")" | Identifier
//! ArgList      := Value ("," Value)*
//! Value        := "true" | "false" | Number | QuotedString
//!               | DateLiteral | "[" ArgList? "]" | "{" PairList? "}"
//!               | BareString
//! PairList     := Pair ("," Pair)*
//! Pair         := (Identifier | QuotedString) ":" Value
//! ```
//!
//! Whitespace around tokens, `|`, `,` and `:` is insignificant.

mod arg;
mod call;
mod chain;
mod error;
mod options;
mod parse;
mod split;

pub use arg::{Arg, Number};
pub use call::Call;
pub use chain::{
    apply, execute, is_reserved, member, run, run_with, Chainable, Member, Members, Outcome,
    RESERVED_METHODS,
};
pub use error::{ChainError, ParseError, Result};
pub use options::ParseOptions;
pub use parse::{
    is_identifier, parse_array, parse_date_literal, parse_method_call, parse_object,
    parse_pipe_expression, parse_pipe_expression_with, parse_single_argument,
};
pub use split::split_arguments;
