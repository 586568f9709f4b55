//! Positional argument binding.
//!
//! One greedy left-to-right pass: every non-variadic parameter takes one token
//! from the front, and a trailing variadic parameter absorbs what is left.
//! There is no backtracking, so an optional slot is always filled before the
//! variadic tail sees any token.

use std::collections::HashMap;

use crate::error::{ArgumentRange, ParseError};
use crate::signature::Signature;

/// The value bound to one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Single(String),
    List(Vec<String>),
    Absent,
}

/// Parameter name to bound value, produced fresh for every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArguments {
    values: HashMap<String, ArgValue>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// The value of a non-variadic parameter, `None` when absent or undeclared.
    pub fn single(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// The values of a variadic parameter; empty when undeclared.
    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(ArgValue::List(values)) => values,
            _ => &[],
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        matches!(
            self.values.get(name),
            Some(ArgValue::Single(_)) | Some(ArgValue::List(_))
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Signature {
    /// Accepted token counts for this signature.
    pub fn range(&self) -> ArgumentRange {
        let min = self.required_count();
        let max = if self.variadic().is_some() {
            None
        } else {
            Some(self.params().len())
        };
        ArgumentRange { min, max }
    }

    /// Bind positional tokens to the parameters of this signature.
    pub fn bind(&self, tokens: &[String]) -> Result<BoundArguments, ParseError> {
        let expected = self.range();
        if !expected.contains(tokens.len()) {
            return Err(ParseError::ArgumentCount {
                expected,
                got: tokens.len(),
            });
        }

        let mut values = HashMap::with_capacity(self.params().len());
        let mut remaining = tokens.iter();

        for param in self.params() {
            let value = if param.variadic {
                ArgValue::List(remaining.by_ref().cloned().collect())
            } else {
                match remaining.next() {
                    Some(token) => ArgValue::Single(token.clone()),
                    None => ArgValue::Absent,
                }
            };
            values.insert(param.name.clone(), value);
        }

        tracing::trace!(bound = values.len(), tokens = tokens.len(), "bound positional arguments");
        Ok(BoundArguments { values })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn bind(signature: &str, items: &[&str]) -> Result<BoundArguments, ParseError> {
        Signature::parse(signature).unwrap().bind(&tokens(items))
    }

    #[test]
    fn test_count_policy_without_variadic() {
        // k = 2 required, m = 2 optional
        let sig = "<a> <b> [<c>] [<d>]";
        for count in 0..=6 {
            let items: Vec<&str> = (0..count).map(|_| "x").collect();
            let result = bind(sig, &items);
            assert_eq!(result.is_ok(), (2..=4).contains(&count), "count {count}");
        }
    }

    #[test]
    fn test_count_error_reports_range() {
        let err = bind("<a> [<b>]", &["1", "2", "3"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::ArgumentCount {
                expected: ArgumentRange { min: 1, max: Some(2) },
                got: 3
            }
        );
    }

    #[test]
    fn test_unfilled_optional_is_absent() {
        let args = bind("<a> [<b>]", &["x"]).unwrap();
        assert_eq!(args.single("a"), Some("x"));
        assert_eq!(args.get("b"), Some(&ArgValue::Absent));
        assert!(!args.is_present("b"));
    }

    #[test]
    fn test_variadic_tail() {
        assert!(bind("<a> [<b>] ...", &[]).is_err());

        let args = bind("<a> [<b>] ...", &["x"]).unwrap();
        assert_eq!(args.single("a"), Some("x"));
        assert_eq!(args.get("b"), Some(&ArgValue::List(vec![])));

        let args = bind("<a> [<b>] ...", &["x", "y", "z"]).unwrap();
        assert_eq!(args.single("a"), Some("x"));
        assert_eq!(args.list("b"), ["y".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_optional_variadic_binds_empty_list() {
        let args = bind("[<files>] ...", &[]).unwrap();
        assert_eq!(args.get("files"), Some(&ArgValue::List(Vec::new())));
        assert!(args.is_present("files"));
    }

    #[test]
    fn test_required_variadic_needs_one_token() {
        let err = bind("<files> ...", &[]).unwrap_err();
        assert_eq!(
            err,
            ParseError::ArgumentCount {
                expected: ArgumentRange { min: 1, max: None },
                got: 0
            }
        );
        let args = bind("<files> ...", &["a", "b"]).unwrap();
        assert_eq!(args.list("files").len(), 2);
    }

    #[test]
    fn test_optional_slot_filled_before_variadic() {
        let args = bind("<a> [<b>] [<rest>] ...", &["1", "2", "3", "4"]).unwrap();
        assert_eq!(args.single("a"), Some("1"));
        assert_eq!(args.single("b"), Some("2"));
        assert_eq!(args.list("rest"), ["3".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_empty_signature_rejects_tokens() {
        assert!(bind("", &[]).unwrap().is_empty());
        assert!(bind("", &["stray"]).is_err());
    }
}
