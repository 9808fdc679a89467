//! Call descriptors produced by parsing one pipe step.

use std::fmt;

use serde::Serialize;

use crate::arg::Arg;

/// One parsed `name(args)` step.
///
/// Calls are produced in expression order and consumed in that order by
/// [`execute`](crate::execute).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    /// Method name, an identifier.
    pub name: String,
    /// Positional arguments.
    pub args: Vec<Arg>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Call {
            name: name.into(),
            args,
        }
    }

    /// Returns the argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::Number;

    #[test]
    fn display() {
        let call = Call::new("adult", vec![Arg::Number(Number::I64(18))]);
        assert_eq!(call.to_string(), "adult(18)");
        assert_eq!(Call::new("male", vec![]).to_string(), "male()");
        assert_eq!(
            Call::new("tagged", vec![Arg::from("a"), Arg::Bool(true)]).to_string(),
            "tagged(\"a\", true)"
        );
    }

    #[test]
    fn arg_lookup() {
        let call = Call::new("x", vec![Arg::Bool(true)]);
        assert_eq!(call.arg(0), Some(&Arg::Bool(true)));
        assert_eq!(call.arg(1), None);
    }
}
