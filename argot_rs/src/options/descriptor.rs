//! Declared options: flags, counters, keys and variadic keys.

use std::sync::Arc;

use crate::error::{DefinitionError, Restriction};
use crate::value::{ConvertibleValue, Value};

/// Value type of a keyed option: its usage placeholder and its converter.
#[derive(Debug, Clone)]
pub struct ValueType {
    signature: String,
    convert: fn(&str) -> Option<Value>,
}

impl ValueType {
    pub fn of<T: ConvertibleValue>() -> Self {
        Self {
            signature: T::signature(),
            convert: |raw| T::convert(raw).map(T::into_value),
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn convert(&self, raw: &str) -> Option<Value> {
        (self.convert)(raw)
    }
}

#[derive(Debug, Clone)]
pub enum OptionKind {
    /// Boolean switch; repeating it changes nothing.
    Flag,
    /// Counts how often it is given (`-vvv`).
    Counter,
    /// Takes one value; the last occurrence wins.
    Key(ValueType),
    /// Takes one value per occurrence and keeps all of them in order.
    VariadicKey(ValueType),
}

/// One declared option.
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    names: Vec<String>,
    description: String,
    kind: OptionKind,
}

impl OptionDescriptor {
    pub fn new(
        names: &[&str],
        description: &str,
        kind: OptionKind,
    ) -> Result<Arc<Self>, DefinitionError> {
        if names.is_empty() {
            return Err(DefinitionError::InvalidOptionName {
                name: String::new(),
            });
        }
        for name in names {
            if !is_valid_name(name) {
                return Err(DefinitionError::InvalidOptionName {
                    name: name.to_string(),
                });
            }
        }
        Ok(Arc::new(Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            description: description.to_string(),
            kind,
        }))
    }

    pub fn flag(names: &[&str], description: &str) -> Result<Arc<Self>, DefinitionError> {
        Self::new(names, description, OptionKind::Flag)
    }

    pub fn counter(names: &[&str], description: &str) -> Result<Arc<Self>, DefinitionError> {
        Self::new(names, description, OptionKind::Counter)
    }

    pub fn key<T: ConvertibleValue>(
        names: &[&str],
        description: &str,
    ) -> Result<Arc<Self>, DefinitionError> {
        Self::new(names, description, OptionKind::Key(ValueType::of::<T>()))
    }

    pub fn variadic_key<T: ConvertibleValue>(
        names: &[&str],
        description: &str,
    ) -> Result<Arc<Self>, DefinitionError> {
        Self::new(
            names,
            description,
            OptionKind::VariadicKey(ValueType::of::<T>()),
        )
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// The identity under which the bound value is stored: the longest name,
    /// first declared on ties.
    pub fn identity(&self) -> &str {
        self.names
            .iter()
            .fold(&self.names[0], |best, name| {
                if name.len() > best.len() { name } else { best }
            })
    }

    pub fn value_type(&self) -> Option<&ValueType> {
        match &self.kind {
            OptionKind::Key(ty) | OptionKind::VariadicKey(ty) => Some(ty),
            OptionKind::Flag | OptionKind::Counter => None,
        }
    }

    pub fn takes_value(&self) -> bool {
        self.value_type().is_some()
    }

    /// How the option reads in usage output: `-m, --message <string>`.
    pub fn usage_identifier(&self) -> String {
        let names = self.names.join(", ");
        match self.value_type() {
            Some(ty) => format!("{} {}", names, ty.signature()),
            None => names,
        }
    }
}

/// `-x` with one character, or `--name` with at least two.
fn is_valid_name(name: &str) -> bool {
    if let Some(long) = name.strip_prefix("--") {
        return long.chars().count() >= 2
            && !long.starts_with('-')
            && !long.contains(['=', ' ']);
    }
    if let Some(short) = name.strip_prefix('-') {
        let mut chars = short.chars();
        return matches!((chars.next(), chars.next()), (Some(c), None) if c != '-' && !c.is_whitespace());
    }
    false
}

/// A restriction over several options of one command, checked after parsing.
#[derive(Debug, Clone)]
pub struct OptionGroup {
    pub restriction: Restriction,
    pub names: Vec<String>,
}

impl OptionGroup {
    pub fn new(restriction: Restriction, names: &[&str]) -> Self {
        Self {
            restriction,
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn at_most_one(names: &[&str]) -> Self {
        Self::new(Restriction::AtMostOne, names)
    }

    pub fn exactly_one(names: &[&str]) -> Self {
        Self::new(Restriction::ExactlyOne, names)
    }

    pub fn at_least_one(names: &[&str]) -> Self {
        Self::new(Restriction::AtLeastOne, names)
    }
}

// ============================================================================
// Tests
// ============================================================================
