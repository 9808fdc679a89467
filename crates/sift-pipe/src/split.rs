//! Top-level splitting of argument lists.
//!
//! Splitting is a single left-to-right scan. Brackets, braces and parentheses
//! nest; quoted strings and backslash escapes are opaque. A separator only
//! ends a token at nesting depth zero outside any string. The same scan
//! checks that a step is balanced and picks the quote a string renders with.

/// Splits a comma-separated argument list into trimmed top-level tokens.
///
/// Blank tokens are dropped, so empty input yields an empty vector.
///
/// ```
/// use sift_pipe::split_arguments;
///
/// assert_eq!(
///     split_arguments(r#"[1,2],{a:1},"x""#),
///     vec!["[1,2]", "{a:1}", r#""x""#],
/// );
/// ```
pub fn split_arguments(input: &str) -> Vec<String> {
    split_top_level(input, ',')
}

/// Splits `input` on `separator` wherever it appears outside nesting and
/// outside quoted strings.
pub(crate) fn split_top_level(input: &str, separator: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut scanner = Scanner::default();

    for ch in input.chars() {
        if scanner.feed(ch) && ch == separator {
            push_token(&mut tokens, &current);
            current.clear();
        } else {
            current.push(ch);
        }
    }

    push_token(&mut tokens, &current);
    tokens
}

/// Returns `true` if every bracket in `input` closes, no string is left
/// open and the input does not end on a dangling backslash.
pub(crate) fn is_balanced(input: &str) -> bool {
    let mut scanner = Scanner::default();
    for ch in input.chars() {
        scanner.feed(ch);
    }
    scanner.is_settled()
}

/// Returns `true` if `content` wrapped in `quote` reads back as one string
/// that closes on the final quote.
pub(crate) fn stays_quoted(content: &str, quote: char) -> bool {
    let mut scanner = Scanner {
        quote: Some(quote),
        ..Scanner::default()
    };
    content.chars().all(|ch| {
        scanner.feed(ch);
        scanner.quote.is_some()
    }) && !scanner.escaped
}

/// Returns `true` if `content` wrapped in `quote` is balanced and has no
/// top-level `,` or `|`, so it reads back as one argument token.
pub(crate) fn reads_back_quoted(content: &str, quote: char) -> bool {
    let mut scanner = Scanner::default();
    let wrapped = std::iter::once(quote)
        .chain(content.chars())
        .chain(std::iter::once(quote));
    for ch in wrapped {
        if scanner.feed(ch) && matches!(ch, ',' | '|') {
            return false;
        }
    }
    scanner.is_settled()
}

#[derive(Debug, Default)]
struct Scanner {
    depth: isize,
    quote: Option<char>,
    escaped: bool,
}

impl Scanner {
    /// Advances over `ch`. Returns `true` when `ch` is outside any string,
    /// not escaped, not a bracket and at depth zero.
    fn feed(&mut self, ch: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }

        match ch {
            '\\' => {
                self.escaped = true;
                false
            }
            '"' | '\'' => {
                match self.quote {
                    None => self.quote = Some(ch),
                    Some(open) if open == ch => self.quote = None,
                    Some(_) => {}
                }
                false
            }
            _ if self.quote.is_some() => false,
            '[' | '{' | '(' => {
                self.depth += 1;
                false
            }
            ']' | '}' | ')' => {
                self.depth -= 1;
                false
            }
            _ => self.depth == 0,
        }
    }

    fn is_settled(&self) -> bool {
        self.depth == 0 && self.quote.is_none() && !self.escaped
    }
}

fn push_token(tokens: &mut Vec<String>, raw: &str) {
    let token = raw.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
}
