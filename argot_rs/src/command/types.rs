//! The canonical command value.

use std::sync::Arc;

use crate::app::Invocation;
use crate::error::MalformedSignature;
use crate::options::{OptionDescriptor, OptionGroup};
use crate::signature::Signature;

/// Entry point run once a command line is bound.
pub type Handler = fn(&Invocation<'_>) -> anyhow::Result<()>;

/// One command: its names, signature, options and entry point.
///
/// The signature is parsed when the command is created, so a malformed
/// signature surfaces during setup and never per invocation.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    shortcuts: Vec<String>,
    description: String,
    signature: Signature,
    param_descriptions: Vec<(String, String)>,
    options: Vec<Arc<OptionDescriptor>>,
    option_groups: Vec<OptionGroup>,
    fail_on_unrecognized: Option<bool>,
    handler: Option<Handler>,
}

impl Command {
    pub fn new(name: &str, signature: &str) -> Result<Self, MalformedSignature> {
        Ok(Self::with_signature(name, Signature::parse(signature)?))
    }

    /// Create a command from an already parsed signature.
    pub fn with_signature(name: &str, signature: Signature) -> Self {
        Self {
            name: name.to_string(),
            shortcuts: Vec::new(),
            description: String::new(),
            signature,
            param_descriptions: Vec::new(),
            options: Vec::new(),
            option_groups: Vec::new(),
            fail_on_unrecognized: None,
            handler: None,
        }
    }

    pub fn about(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Add an alternative name the router accepts for this command.
    pub fn shortcut(mut self, shortcut: &str) -> Self {
        self.shortcuts.push(shortcut.to_string());
        self
    }

    /// Describe a positional parameter for the `Parameters:` usage section.
    pub fn describe(mut self, param: &str, description: &str) -> Self {
        self.param_descriptions
            .push((param.to_string(), description.to_string()));
        self
    }

    pub fn option(mut self, option: Arc<OptionDescriptor>) -> Self {
        self.options.push(option);
        self
    }

    pub fn option_group(mut self, group: OptionGroup) -> Self {
        self.option_groups.push(group);
        self
    }

    /// Override the application-wide unrecognized-option policy.
    pub fn fail_on_unrecognized(mut self, fail: bool) -> Self {
        self.fail_on_unrecognized = Some(fail);
        self
    }

    pub fn handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shortcuts(&self) -> &[String] {
        &self.shortcuts
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn param_description(&self, param: &str) -> Option<&str> {
        self.param_descriptions
            .iter()
            .find(|(name, _)| name == param)
            .map(|(_, text)| text.as_str())
    }

    pub fn has_param_descriptions(&self) -> bool {
        !self.param_descriptions.is_empty()
    }

    pub fn options(&self) -> &[Arc<OptionDescriptor>] {
        &self.options
    }

    pub fn option_groups(&self) -> &[OptionGroup] {
        &self.option_groups
    }

    /// The command's own policy, `None` when it follows the application default.
    pub fn strictness(&self) -> Option<bool> {
        self.fail_on_unrecognized
    }

    pub fn entry_point(&self) -> Option<Handler> {
        self.handler
    }

    /// Whether `token` is this command's name or one of its shortcuts.
    pub fn answers_to(&self, token: &str) -> bool {
        self.name == token || self.shortcuts.iter().any(|s| s == token)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_answers_to_name_and_shortcuts() {
        let cmd = Command::new("migrate", "<direction>")
            .unwrap()
            .shortcut("m")
            .shortcut("mig");
        assert!(cmd.answers_to("migrate"));
        assert!(cmd.answers_to("m"));
        assert!(cmd.answers_to("mig"));
        assert!(!cmd.answers_to("migrat"));
    }

    #[test]
    fn test_malformed_signature_fails_at_construction() {
        let err = Command::new("broken", "[<a>] <b>").unwrap_err();
        assert_eq!(err.signature, "[<a>] <b>");
    }

    #[test]
    fn test_param_descriptions() {
        let cmd = Command::new("greet", "<person>")
            .unwrap()
            .describe("person", "Who to greet");
        assert_eq!(cmd.param_description("person"), Some("Who to greet"));
        assert_eq!(cmd.param_description("other"), None);
        assert!(cmd.has_param_descriptions());
    }
}
