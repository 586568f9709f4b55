//! Option values recognized during one parse pass.

use std::collections::HashMap;

use crate::value::{ConvertibleValue, Value};

/// State of one option after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionState {
    Flag(bool),
    Count(usize),
    Value(Value),
    Values(Vec<Value>),
}

/// Bound options of one invocation.
///
/// Every declared name resolves to its descriptor's identity, so
/// `flag("-l")` and `flag("--loudly")` read the same entry. Only the
/// registry writes into it; callers get a read-only view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundOptions {
    entries: HashMap<String, OptionState>,
    aliases: HashMap<String, String>,
}

impl BoundOptions {
    pub(crate) fn with_aliases(aliases: HashMap<String, String>) -> Self {
        Self {
            entries: HashMap::new(),
            aliases,
        }
    }

    fn identity<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub(crate) fn set_flag(&mut self, identity: &str) {
        self.entries
            .insert(identity.to_string(), OptionState::Flag(true));
    }

    pub(crate) fn increment(&mut self, identity: &str) {
        let entry = self
            .entries
            .entry(identity.to_string())
            .or_insert(OptionState::Count(0));
        if let OptionState::Count(count) = entry {
            *count += 1;
        }
    }

    pub(crate) fn set_value(&mut self, identity: &str, value: Value) {
        self.entries
            .insert(identity.to_string(), OptionState::Value(value));
    }

    pub(crate) fn push_value(&mut self, identity: &str, value: Value) {
        let entry = self
            .entries
            .entry(identity.to_string())
            .or_insert_with(|| OptionState::Values(Vec::new()));
        if let OptionState::Values(values) = entry {
            values.push(value);
        }
    }

    /// Raw state of an option, `None` when it was not given.
    pub fn state(&self, name: &str) -> Option<&OptionState> {
        self.entries.get(self.identity(name))
    }

    /// Whether the option appeared at least once.
    pub fn is_set(&self, name: &str) -> bool {
        self.state(name).is_some()
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.state(name), Some(OptionState::Flag(true)))
    }

    pub fn count(&self, name: &str) -> usize {
        match self.state(name) {
            Some(OptionState::Count(count)) => *count,
            Some(OptionState::Flag(true)) => 1,
            _ => 0,
        }
    }

    /// Typed value of a key; `None` when not given or stored as another type.
    pub fn value<T: ConvertibleValue>(&self, name: &str) -> Option<T> {
        match self.state(name) {
            Some(OptionState::Value(value)) => T::from_value(value),
            Some(OptionState::Values(values)) => values.last().and_then(T::from_value),
            _ => None,
        }
    }

    /// Typed values of a variadic key in the order given.
    pub fn values<T: ConvertibleValue>(&self, name: &str) -> Vec<T> {
        match self.state(name) {
            Some(OptionState::Values(values)) => values.iter().filter_map(T::from_value).collect(),
            Some(OptionState::Value(value)) => T::from_value(value).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Number of distinct options that were given.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bound() -> BoundOptions {
        let aliases = HashMap::from([
            ("-l".to_string(), "--loudly".to_string()),
            ("--loudly".to_string(), "--loudly".to_string()),
            ("-m".to_string(), "--message".to_string()),
            ("--message".to_string(), "--message".to_string()),
        ]);
        BoundOptions::with_aliases(aliases)
    }

    #[test]
    fn test_flag_is_idempotent_and_aliased() {
        let mut opts = bound();
        opts.set_flag("--loudly");
        opts.set_flag("--loudly");
        assert!(opts.flag("-l"));
        assert!(opts.flag("--loudly"));
        assert_eq!(opts.len(), 1);
    }

    #[test]
    fn test_key_last_wins() {
        let mut opts = bound();
        opts.set_value("--message", Value::Text("first".into()));
        opts.set_value("--message", Value::Text("second".into()));
        assert_eq!(opts.value::<String>("-m").as_deref(), Some("second"));
        assert_eq!(opts.value::<u32>("-m"), None);
    }

    #[test]
    fn test_counter_and_collection() {
        let mut opts = BoundOptions::default();
        opts.increment("-v");
        opts.increment("-v");
        assert_eq!(opts.count("-v"), 2);
        opts.push_value("--tag", Value::Text("a".into()));
        opts.push_value("--tag", Value::Text("b".into()));
        assert_eq!(opts.values::<String>("--tag"), vec!["a", "b"]);
        assert_eq!(opts.count("--missing"), 0);
        assert!(!opts.is_set("--missing"));
    }
}
