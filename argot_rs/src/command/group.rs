//! Command groups: named nodes that hold commands, nested groups and shared
//! options visible to every descendant command.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::DefinitionError;
use crate::options::OptionDescriptor;

use super::types::Command;

/// A child of a group.
#[derive(Debug, Clone)]
pub enum Node {
    Command(Command),
    Group(Group),
}

#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    description: String,
    children: Vec<Node>,
    shared_options: Vec<Arc<OptionDescriptor>>,
    default_command: Option<String>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            children: Vec::new(),
            shared_options: Vec::new(),
            default_command: None,
        }
    }

    pub fn about(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.children.push(Node::Command(command));
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        self.children.push(Node::Group(group));
        self
    }

    /// Declare an option every descendant command accepts.
    pub fn shared_option(mut self, option: Arc<OptionDescriptor>) -> Self {
        self.shared_options.push(option);
        self
    }

    /// Run the named child command when routing stops at this group.
    pub fn default_command(mut self, name: &str) -> Self {
        self.default_command = Some(name.to_string());
        self
    }

    pub(crate) fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub(crate) fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub(crate) fn add_shared_option(&mut self, option: Arc<OptionDescriptor>) {
        self.shared_options.push(option);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.children.iter().filter_map(|node| match node {
            Node::Command(command) => Some(command),
            Node::Group(_) => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.children.iter().filter_map(|node| match node {
            Node::Group(group) => Some(group),
            Node::Command(_) => None,
        })
    }

    pub fn shared_options(&self) -> &[Arc<OptionDescriptor>] {
        &self.shared_options
    }

    /// Child group with exactly this name.
    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups().find(|group| group.name == name)
    }

    /// Child command answering to this name or shortcut.
    pub fn find_command(&self, token: &str) -> Option<&Command> {
        self.commands().find(|command| command.answers_to(token))
    }

    /// The configured default child command, if it exists.
    pub fn default_child(&self) -> Option<&Command> {
        let name = self.default_command.as_deref()?;
        self.commands().find(|command| command.name() == name)
    }

    /// Every name and shortcut a token can match at this level.
    pub fn child_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for node in &self.children {
            match node {
                Node::Group(group) => names.push(group.name()),
                Node::Command(command) => {
                    names.push(command.name());
                    names.extend(command.shortcuts().iter().map(String::as_str));
                }
            }
        }
        names
    }

    /// Check this group and its descendants for name clashes and a missing
    /// default command.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let mut seen = HashSet::new();
        for name in self.child_names() {
            if !seen.insert(name) {
                return Err(DefinitionError::DuplicateChild {
                    name: name.to_string(),
                    group: self.name.clone(),
                });
            }
        }

        if let Some(name) = &self.default_command
            && self.default_child().is_none()
        {
            return Err(DefinitionError::UnknownDefault {
                name: name.clone(),
                group: self.name.clone(),
            });
        }

        for group in self.groups() {
            group.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
