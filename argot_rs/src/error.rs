//! Error taxonomy for the engine.
//!
//! Two families live here. Developer errors ([`MalformedSignature`],
//! [`DefinitionError`]) describe a broken command declaration and should abort
//! setup. User-input errors ([`ParseError`]) describe a bad command line and are
//! rendered together with the usage of the resolved command.

use std::fmt;

use thiserror::Error;

/// Why a signature string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFault {
    #[error("required parameter <{name}> follows an optional parameter")]
    RequiredAfterOptional { name: String },

    #[error("more than one variadic marker")]
    MultipleVariadic,

    #[error("variadic marker must be the final token")]
    VariadicNotTrailing,

    #[error("variadic marker has no parameter to apply to")]
    DanglingVariadic,

    #[error("unbalanced or misplaced delimiters in '{token}'")]
    Unbalanced { token: String },

    #[error("empty parameter name in '{token}'")]
    EmptyName { token: String },

    #[error("parameter <{name}> is declared twice")]
    DuplicateParameter { name: String },
}

/// A developer-authored signature string that does not follow the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed signature `{signature}`: {fault}")]
pub struct MalformedSignature {
    pub signature: String,
    pub fault: SignatureFault,
}

/// Errors in the declared command tree. These are programming mistakes, not
/// bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error(transparent)]
    MalformedSignature(#[from] MalformedSignature),

    #[error("invalid option name '{name}' (expected -x or --name)")]
    InvalidOptionName { name: String },

    #[error("option '{name}' is declared more than once for '{scope}'")]
    DuplicateOption { name: String, scope: String },

    #[error("'{name}' is declared more than once in '{group}'")]
    DuplicateChild { name: String, group: String },

    #[error("default command '{name}' is not a command of '{group}'")]
    UnknownDefault { name: String, group: String },

    #[error("option group of '{command}' refers to undeclared option '{name}'")]
    UnknownGroupOption { name: String, command: String },

    #[error("option group of '{command}' names option '{name}' more than once")]
    RepeatedGroupOption { name: String, command: String },
}

/// The accepted number of positional tokens for a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentRange {
    pub min: usize,
    /// `None` when a variadic parameter absorbs any number of tokens.
    pub max: Option<usize>,
}

impl ArgumentRange {
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl fmt::Display for ArgumentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "exactly {}", max),
            Some(max) => write!(f, "{} to {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// How many options of an [`OptionGroup`](crate::options::OptionGroup) may be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restriction {
    AtMostOne,
    ExactlyOne,
    AtLeastOne,
}

impl Restriction {
    /// Whether `count` options being present satisfies the restriction.
    pub fn allows(self, count: usize) -> bool {
        match self {
            Restriction::AtMostOne => count <= 1,
            Restriction::ExactlyOne => count == 1,
            Restriction::AtLeastOne => count >= 1,
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Restriction::AtMostOne => "at most one",
            Restriction::ExactlyOne => "exactly one",
            Restriction::AtLeastOne => "at least one",
        };
        f.write_str(text)
    }
}

/// A command line that does not fit the resolved command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount { expected: ArgumentRange, got: usize },

    #[error("option '{name}' requires a value")]
    MissingOptionValue { name: String },

    #[error("invalid value '{raw}' for option '{name}' (expected {expected})")]
    InvalidOptionValue {
        name: String,
        raw: String,
        expected: String,
    },

    #[error("unrecognized option '{token}'")]
    UnrecognizedOption { token: String },

    #[error("{restriction} of {} must be given", .names.join(", "))]
    OptionGroupViolation {
        restriction: Restriction,
        names: Vec<String>,
    },
}

/// Returned by the help command when the requested command or group does not
/// exist. The message carries the contextual help of the deepest group reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{token}'{}\n\n{help}", suggestion_suffix(.suggestion))]
pub struct UnknownCommand {
    pub token: String,
    pub suggestion: Option<String>,
    pub help: String,
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean '{}'?", name),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_range_display() {
        let exact = ArgumentRange { min: 2, max: Some(2) };
        let span = ArgumentRange { min: 1, max: Some(3) };
        let open = ArgumentRange { min: 1, max: None };
        assert_eq!(exact.to_string(), "exactly 2");
        assert_eq!(span.to_string(), "1 to 3");
        assert_eq!(open.to_string(), "at least 1");
    }

    #[test]
    fn test_argument_range_contains() {
        let span = ArgumentRange { min: 1, max: Some(3) };
        assert!(!span.contains(0));
        assert!(span.contains(1));
        assert!(span.contains(3));
        assert!(!span.contains(4));
        assert!(ArgumentRange { min: 0, max: None }.contains(100));
    }

    #[test]
    fn test_restriction_allows() {
        assert!(Restriction::AtMostOne.allows(0));
        assert!(!Restriction::AtMostOne.allows(2));
        assert!(Restriction::ExactlyOne.allows(1));
        assert!(!Restriction::ExactlyOne.allows(0));
        assert!(!Restriction::AtLeastOne.allows(0));
    }

    #[test]
    fn test_parse_error_messages_name_the_token() {
        let err = ParseError::InvalidOptionValue {
            name: "--shape".into(),
            raw: "hexagon".into(),
            expected: "<circle|square>".into(),
        };
        assert!(err.to_string().contains("'hexagon'"));

        let err = ParseError::OptionGroupViolation {
            restriction: Restriction::ExactlyOne,
            names: vec!["--up".into(), "--down".into()],
        };
        assert_eq!(err.to_string(), "exactly one of --up, --down must be given");
    }

    #[test]
    fn test_unknown_command_message() {
        let err = UnknownCommand {
            token: "migrat".into(),
            suggestion: Some("migrate".into()),
            help: "Usage: app db <command>".into(),
        };
        let text = err.to_string();
        assert!(text.starts_with("unknown command 'migrat'. Did you mean 'migrate'?"));
        assert!(text.ends_with("Usage: app db <command>"));
    }
}
