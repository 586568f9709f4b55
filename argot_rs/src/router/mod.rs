//! Command routing.
//!
//! The router walks the raw tokens from the root group: a token naming a
//! child group descends into it, a token naming a child command (or one of its
//! shortcuts) selects it. Anything else stops the walk and the current group's
//! default command is chosen instead, so routing never fails: showing help is
//! the terminal state for an input that names nothing.
//!
//! ```text
//! app db m up         -> migrate, path [app, db], residual [up]
//! app db unknown      -> help,    path [app, db], residual [unknown]
//! app db -h           -> help,    path [app, db], residual []
//! ```

mod helpers;
mod path;

pub(crate) use helpers::suggest_similar;
pub use path::GroupPath;

use crate::command::{Command, Group};

/// How a route was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// A child command matched by name or shortcut.
    Matched,
    /// The help or version command reached from any depth, by name or by
    /// the `-h`/`--help`/`-v`/`--version` forms.
    Shortcut,
    /// Nothing matched; the default command of the deepest group reached.
    Fallback,
}

/// The routing outcome: a command, the groups leading to it and the tokens
/// left for option parsing and binding.
#[derive(Debug, Clone)]
pub struct Route<'a, 't> {
    pub command: &'a Command,
    pub path: GroupPath<'a>,
    pub residual: &'t [String],
    pub kind: RouteKind,
}

#[derive(Debug, Clone)]
pub struct Router<'a> {
    root: &'a Group,
    default: &'a Command,
    help: Option<&'a Command>,
    version: Option<&'a Command>,
    flag_shortcuts: bool,
}

impl<'a> Router<'a> {
    /// `default` runs when routing matches nothing and the deepest group
    /// reached has no default of its own.
    pub fn new(root: &'a Group, default: &'a Command) -> Self {
        Self {
            root,
            default,
            help: None,
            version: None,
            flag_shortcuts: true,
        }
    }

    /// Reachable by name, `-h` and `--help` at any depth.
    pub fn with_help(mut self, help: &'a Command) -> Self {
        self.help = Some(help);
        self
    }

    /// Reachable by name, `-v` and `--version` at any depth.
    pub fn with_version(mut self, version: &'a Command) -> Self {
        self.version = Some(version);
        self
    }

    /// Disable the `-h`/`--help`/`-v`/`--version` forms; names still route.
    pub fn flag_shortcuts(mut self, enabled: bool) -> Self {
        self.flag_shortcuts = enabled;
        self
    }

    pub fn route<'t>(&self, tokens: &'t [String]) -> Route<'a, 't> {
        let mut path = GroupPath::root(self.root);
        let mut index = 0;

        while let Some(token) = tokens.get(index) {
            let group = path.current();

            if let Some(child) = group.find_group(token) {
                tracing::trace!(group = %child.name(), "descending");
                path = path.appending(child);
                index += 1;
                continue;
            }

            if let Some(command) = group.find_command(token) {
                return Route {
                    command,
                    path,
                    residual: &tokens[index + 1..],
                    kind: RouteKind::Matched,
                };
            }

            if let Some(command) = self.shortcut(token) {
                return Route {
                    command,
                    path,
                    residual: &tokens[index + 1..],
                    kind: RouteKind::Shortcut,
                };
            }

            break;
        }

        let command = path.current().default_child().unwrap_or(self.default);
        tracing::debug!(
            command = %command.name(),
            path = %path.qualified_name(),
            unconsumed = tokens.len() - index,
            "no route matched, using default command"
        );
        Route {
            command,
            path,
            residual: &tokens[index..],
            kind: RouteKind::Fallback,
        }
    }

    fn shortcut(&self, token: &str) -> Option<&'a Command> {
        let flags = self.flag_shortcuts;
        if let Some(help) = self.help
            && (help.answers_to(token) || (flags && (token == "-h" || token == "--help")))
        {
            return Some(help);
        }
        if let Some(version) = self.version
            && (version.answers_to(token) || (flags && (token == "-v" || token == "--version")))
        {
            return Some(version);
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
