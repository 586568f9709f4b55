//! Option recognition for one resolved command.
//!
//! The registry sees every option visible to the command: the shared options
//! of each group along its path (root first) followed by the command's own.
//! Parsing walks the raw tokens once, strips what it recognizes, and hands the
//! rest to the positional binder in original order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::command::Command;
use crate::error::{DefinitionError, ParseError};
use crate::router::GroupPath;

use super::bound::BoundOptions;
use super::descriptor::{OptionDescriptor, OptionGroup, OptionKind};

/// Result of one option pass.
#[derive(Debug, Clone, Default)]
pub struct OptionParse {
    pub options: BoundOptions,
    /// Non-option tokens in their original relative order.
    pub positional: Vec<String>,
    /// Tokens that looked like options but matched nothing (lenient mode only).
    pub unrecognized: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct OptionRegistry<'a> {
    descriptors: Vec<&'a Arc<OptionDescriptor>>,
    by_name: HashMap<&'a str, usize>,
    groups: &'a [OptionGroup],
}

/// What to do with one recognized name inside a token.
enum Action<'a> {
    Switch(&'a OptionDescriptor),
    Value {
        descriptor: &'a OptionDescriptor,
        name: String,
        inline: Option<String>,
    },
}

impl<'a> OptionRegistry<'a> {
    /// Build a registry from descriptors, visiting them in order. The same
    /// `Arc` seen twice is kept once; two descriptors sharing a name are an error.
    pub fn new<I>(descriptors: I, scope: &str) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = &'a Arc<OptionDescriptor>>,
    {
        let mut registry = Self {
            descriptors: Vec::new(),
            by_name: HashMap::new(),
            groups: &[],
        };

        for descriptor in descriptors {
            if registry
                .descriptors
                .iter()
                .any(|known| Arc::ptr_eq(known, descriptor))
            {
                continue;
            }
            let index = registry.descriptors.len();
            for name in descriptor.names() {
                if registry.by_name.insert(name.as_str(), index).is_some() {
                    return Err(DefinitionError::DuplicateOption {
                        name: name.clone(),
                        scope: scope.to_string(),
                    });
                }
            }
            registry.descriptors.push(descriptor);
        }

        Ok(registry)
    }

    /// Registry for `command` reached through `path`.
    pub fn for_command(path: &GroupPath<'a>, command: &'a Command) -> Result<Self, DefinitionError> {
        let scope = path.qualified_name_with(command.name());
        let shared = path.shared_options();
        let mut registry = Self::new(shared.into_iter().chain(command.options()), &scope)?;

        for group in command.option_groups() {
            let mut members = HashSet::new();
            for name in &group.names {
                let Some(descriptor) = registry.lookup(name) else {
                    return Err(DefinitionError::UnknownGroupOption {
                        name: name.clone(),
                        command: scope,
                    });
                };
                // `-f` and `--fill` are one member, not two.
                if !members.insert(descriptor.identity()) {
                    return Err(DefinitionError::RepeatedGroupOption {
                        name: name.clone(),
                        command: scope,
                    });
                }
            }
        }
        registry.groups = command.option_groups();
        Ok(registry)
    }

    pub fn lookup(&self, name: &str) -> Option<&'a OptionDescriptor> {
        self.by_name.get(name).map(|&index| {
            let descriptor: &'a Arc<OptionDescriptor> = self.descriptors[index];
            &**descriptor
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Visible descriptors, shared ones first.
    pub fn descriptors(&self) -> impl Iterator<Item = &'a OptionDescriptor> + '_ {
        self.descriptors.iter().map(|&descriptor| &**descriptor)
    }

    fn aliases(&self) -> HashMap<String, String> {
        let mut aliases = HashMap::new();
        for descriptor in &self.descriptors {
            for name in descriptor.names() {
                aliases.insert(name.clone(), descriptor.identity().to_string());
            }
        }
        aliases
    }

    /// Strip and convert option tokens.
    pub fn parse(
        &self,
        tokens: &[String],
        fail_on_unrecognized: bool,
    ) -> Result<OptionParse, ParseError> {
        let mut result = OptionParse {
            options: BoundOptions::with_aliases(self.aliases()),
            ..OptionParse::default()
        };
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            index += 1;

            if token == "--" {
                tracing::trace!("option terminator, {} positional token(s) follow", tokens.len() - index);
                result.positional.extend(tokens[index..].iter().cloned());
                break;
            }

            if !looks_like_option(token) || (is_numeric(token) && !self.contains(token)) {
                result.positional.push(token.clone());
                continue;
            }

            match self.recognize(token) {
                Ok(actions) => {
                    for action in actions {
                        self.apply(action, tokens, &mut index, &mut result.options)?;
                    }
                }
                Err(offending) => {
                    if fail_on_unrecognized {
                        return Err(ParseError::UnrecognizedOption { token: offending });
                    }
                    tracing::trace!(token = %token, "passing unrecognized option through");
                    result.unrecognized.push(token.clone());
                    result.positional.push(token.clone());
                }
            }
        }

        self.check_groups(&result.options)?;
        Ok(result)
    }

    /// Resolve one dash token into actions without applying any of them, so
    /// an unknown character in a cascade leaves no partial effect. The error
    /// carries the offending option name.
    fn recognize(&self, token: &str) -> Result<Vec<Action<'a>>, String> {
        if token.starts_with("--") {
            if let Some(descriptor) = self.lookup(token) {
                return Ok(vec![self.action(descriptor, token, None)]);
            }
            if let Some((name, value)) = token.split_once('=')
                && let Some(descriptor) = self.lookup(name)
                && descriptor.takes_value()
            {
                return Ok(vec![self.action(descriptor, name, Some(value.to_string()))]);
            }
            return Err(token.to_string());
        }

        if token.chars().count() == 2 {
            return match self.lookup(token) {
                Some(descriptor) => Ok(vec![self.action(descriptor, token, None)]),
                None => Err(token.to_string()),
            };
        }

        // Cascade: `-am` is `-a -m`; a key ends the cascade and takes the
        // rest of the token (`-mHello`) or the next token as its value.
        let body: Vec<char> = token.chars().skip(1).collect();
        let mut actions = Vec::new();
        for (position, c) in body.iter().enumerate() {
            let name = format!("-{}", c);
            let Some(descriptor) = self.lookup(&name) else {
                return Err(name);
            };
            if descriptor.takes_value() {
                let rest: String = body[position + 1..].iter().collect();
                let inline = (!rest.is_empty()).then_some(rest);
                actions.push(self.action(descriptor, &name, inline));
                break;
            }
            actions.push(Action::Switch(descriptor));
        }
        Ok(actions)
    }

    fn action(&self, descriptor: &'a OptionDescriptor, name: &str, inline: Option<String>) -> Action<'a> {
        if descriptor.takes_value() {
            Action::Value {
                descriptor,
                name: name.to_string(),
                inline,
            }
        } else {
            Action::Switch(descriptor)
        }
    }

    fn apply(
        &self,
        action: Action<'a>,
        tokens: &[String],
        index: &mut usize,
        options: &mut BoundOptions,
    ) -> Result<(), ParseError> {
        match action {
            Action::Switch(descriptor) => {
                match descriptor.kind() {
                    OptionKind::Counter => options.increment(descriptor.identity()),
                    _ => options.set_flag(descriptor.identity()),
                }
                Ok(())
            }
            Action::Value {
                descriptor,
                name,
                inline,
            } => {
                let raw = match inline {
                    Some(raw) => raw,
                    None => {
                        let Some(next) = tokens.get(*index) else {
                            return Err(ParseError::MissingOptionValue { name });
                        };
                        *index += 1;
                        next.clone()
                    }
                };

                let Some(ty) = descriptor.value_type() else {
                    return Ok(());
                };
                let Some(value) = ty.convert(&raw) else {
                    return Err(ParseError::InvalidOptionValue {
                        name,
                        raw,
                        expected: ty.signature().to_string(),
                    });
                };

                tracing::trace!(option = %descriptor.identity(), raw = %raw, "bound option value");
                match descriptor.kind() {
                    OptionKind::VariadicKey(_) => options.push_value(descriptor.identity(), value),
                    _ => options.set_value(descriptor.identity(), value),
                }
                Ok(())
            }
        }
    }

    fn check_groups(&self, options: &BoundOptions) -> Result<(), ParseError> {
        for group in self.groups {
            let given: HashSet<&str> = group
                .names
                .iter()
                .filter(|n| options.is_set(n))
                .filter_map(|n| self.lookup(n).map(OptionDescriptor::identity))
                .collect();
            let given = given.len();
            if !group.restriction.allows(given) {
                return Err(ParseError::OptionGroupViolation {
                    restriction: group.restriction,
                    names: group.names.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One or two leading dashes followed by something; a lone `-` is positional.
fn looks_like_option(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1
}

/// `-5`, `-0.25`, `-1e5`: negative numbers stay positional unless declared.
/// The sign must be followed by a digit or a point, which keeps `-inf` and
/// `-nan` as options.
fn is_numeric(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.') && token.parse::<f64>().is_ok()
}

// ============================================================================
// Tests
// ============================================================================
