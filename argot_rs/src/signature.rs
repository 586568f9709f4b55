//! Signature mini-language.
//!
//! A command declares its positional parameters as a string:
//!
//! ```text
//! <person> [<greeting>] ...
//! ```
//!
//! `<name>` is required, `[<name>]` is optional, and a trailing standalone
//! `...` makes the preceding parameter variadic.

use std::fmt;

use crate::error::{MalformedSignature, SignatureFault};

/// One positional parameter of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub required: bool,
    pub variadic: bool,
}

impl ParameterDescriptor {
    /// The parameter as written in a signature, without the variadic marker.
    pub fn token(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[<{}>]", self.name)
        }
    }
}

/// A parsed signature: ordered parameters, required ones first, at most one
/// variadic parameter in last position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<ParameterDescriptor>,
}

impl Signature {
    /// Parse a signature string.
    pub fn parse(signature: &str) -> Result<Self, MalformedSignature> {
        let fail = |fault| MalformedSignature {
            signature: signature.to_string(),
            fault,
        };

        let tokens: Vec<&str> = signature.split_whitespace().collect();
        let mut params: Vec<ParameterDescriptor> = Vec::new();
        let mut variadic_seen = false;

        for token in &tokens {
            if *token == "..." {
                if variadic_seen {
                    return Err(fail(SignatureFault::MultipleVariadic));
                }
                let Some(last) = params.last_mut() else {
                    return Err(fail(SignatureFault::DanglingVariadic));
                };
                last.variadic = true;
                variadic_seen = true;
                continue;
            }

            if variadic_seen {
                return Err(fail(SignatureFault::VariadicNotTrailing));
            }

            let (name, required) = parse_parameter(token).map_err(fail)?;

            if required && params.iter().any(|p| !p.required) {
                return Err(fail(SignatureFault::RequiredAfterOptional {
                    name: name.to_string(),
                }));
            }
            if params.iter().any(|p| p.name == name) {
                return Err(fail(SignatureFault::DuplicateParameter {
                    name: name.to_string(),
                }));
            }

            params.push(ParameterDescriptor {
                name: name.to_string(),
                required,
                variadic: false,
            });
        }

        Ok(Self { params })
    }

    /// Build a signature from parameters already known to be well formed.
    pub(crate) fn from_params(params: Vec<ParameterDescriptor>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.required).count()
    }

    /// The trailing variadic parameter, if any.
    pub fn variadic(&self) -> Option<&ParameterDescriptor> {
        self.params.last().filter(|p| p.variadic)
    }
}

/// Canonical form: single spaces, `...` after the variadic parameter.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(self.params.len() + 1);
        for param in &self.params {
            parts.push(param.token());
            if param.variadic {
                parts.push("...".to_string());
            }
        }
        f.write_str(&parts.join(" "))
    }
}

/// Split one parameter token into its name and whether it is required.
fn parse_parameter(token: &str) -> Result<(&str, bool), SignatureFault> {
    let unbalanced = || SignatureFault::Unbalanced {
        token: token.to_string(),
    };

    let (inner, required) = if let Some(rest) = token.strip_prefix('[') {
        let inner = rest.strip_suffix(']').ok_or_else(unbalanced)?;
        (inner, false)
    } else {
        (token, true)
    };

    let name = inner
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(unbalanced)?;

    if name.is_empty() {
        return Err(SignatureFault::EmptyName {
            token: token.to_string(),
        });
    }
    if name.contains(['<', '>', '[', ']']) {
        return Err(unbalanced());
    }

    Ok((name, required))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(signature: &str) -> SignatureFault {
        Signature::parse(signature).unwrap_err().fault
    }

    #[test]
    fn test_parse_required_optional_variadic() {
        let sig = Signature::parse("<person> [<greeting>] ...").unwrap();
        let params = sig.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "person");
        assert!(params[0].required);
        assert!(!params[0].variadic);
        assert_eq!(params[1].name, "greeting");
        assert!(!params[1].required);
        assert!(params[1].variadic);
        assert_eq!(sig.required_count(), 1);
        assert_eq!(sig.variadic().map(|p| p.name.as_str()), Some("greeting"));
    }

    #[test]
    fn test_parse_empty_signature() {
        let sig = Signature::parse("   ").unwrap();
        assert!(sig.is_empty());
        assert_eq!(sig.to_string(), "");
    }

    #[test]
    fn test_required_after_optional_is_malformed() {
        assert_eq!(
            fault("[<a>] <b>"),
            SignatureFault::RequiredAfterOptional { name: "b".into() }
        );
    }

    #[test]
    fn test_variadic_marker_rules() {
        assert_eq!(fault("<a> ... ..."), SignatureFault::MultipleVariadic);
        assert_eq!(fault("<a> ... <b>"), SignatureFault::VariadicNotTrailing);
        assert_eq!(fault("..."), SignatureFault::DanglingVariadic);
    }

    #[test]
    fn test_unbalanced_delimiters() {
        assert!(matches!(fault("<a"), SignatureFault::Unbalanced { .. }));
        assert!(matches!(fault("a>"), SignatureFault::Unbalanced { .. }));
        assert!(matches!(fault("[<a>"), SignatureFault::Unbalanced { .. }));
        assert!(matches!(fault("<a>]"), SignatureFault::Unbalanced { .. }));
        assert!(matches!(fault("<<a>>"), SignatureFault::Unbalanced { .. }));
        assert!(matches!(fault("plain"), SignatureFault::Unbalanced { .. }));
    }

    #[test]
    fn test_empty_and_duplicate_names() {
        assert!(matches!(fault("<>"), SignatureFault::EmptyName { .. }));
        assert_eq!(
            fault("<a> [<a>]"),
            SignatureFault::DuplicateParameter { name: "a".into() }
        );
    }

    #[test]
    fn test_display_round_trips_with_normalized_whitespace() {
        for (input, canonical) in [
            ("<person> [<greeting>] ...", "<person> [<greeting>] ..."),
            ("  <a>   <b>  ", "<a> <b>"),
            ("<files> ...", "<files> ..."),
            ("[<x>]\t[<y>]", "[<x>] [<y>]"),
        ] {
            let sig = Signature::parse(input).unwrap();
            assert_eq!(sig.to_string(), canonical);
            assert_eq!(Signature::parse(&sig.to_string()).unwrap(), sig);
        }
    }

    #[test]
    fn test_error_message_names_signature() {
        let err = Signature::parse("[<a>] <b>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed signature `[<a>] <b>`: required parameter <b> follows an optional parameter"
        );
    }
}
