//! The application: root of the command tree and the entry point for raw
//! command lines.
//!
//! Parsing runs in four steps: route the tokens to a command, collect the
//! options visible to it, strip and convert option tokens, bind what is left
//! to the command's signature.

use std::ptr;
use std::sync::Arc;

use thiserror::Error;

use crate::binder::BoundArguments;
use crate::command::{Command, Group, Node};
use crate::config::EngineConfig;
use crate::error::{DefinitionError, ParseError, UnknownCommand};
use crate::help;
use crate::options::{BoundOptions, OptionDescriptor, OptionRegistry};
use crate::router::{GroupPath, RouteKind, Router};
use crate::usage;

pub const EXIT_SUCCESS: i32 = 0;
/// Bad command line or a failing handler.
pub const EXIT_FAILURE: i32 = 1;
/// Broken command declarations found while parsing (`EX_SOFTWARE`).
pub const EXIT_DEFINITION: i32 = 70;

/// A command line that could not be turned into an [`Invocation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    /// `error: <reason>`, followed by usage for user-input errors.
    pub message: String,
    pub exit_code: i32,
}

impl Failure {
    fn definition(err: DefinitionError) -> Self {
        Self {
            message: format!("error: {}", err),
            exit_code: EXIT_DEFINITION,
        }
    }

    fn usage(err: &ParseError, path: &GroupPath<'_>, command: &Command) -> Self {
        Self {
            message: format!(
                "error: {}\n\n{}",
                err,
                usage::command_usage(path, command).trim_end()
            ),
            exit_code: EXIT_FAILURE,
        }
    }
}

/// A fully bound command line, handed to the command's handler.
#[derive(Debug)]
pub struct Invocation<'a> {
    pub app: &'a App,
    pub command: &'a Command,
    pub path: GroupPath<'a>,
    pub arguments: BoundArguments,
    pub options: BoundOptions,
    /// Unknown option tokens kept by a lenient command.
    pub unrecognized: Vec<String>,
    pub kind: RouteKind,
}

impl Invocation<'_> {
    /// `app group command`
    pub fn qualified_name(&self) -> String {
        self.path.qualified_name_with(self.command.name())
    }

    pub fn usage(&self) -> String {
        usage::command_usage(&self.path, self.command)
    }
}

#[derive(Debug, Clone)]
pub struct App {
    root: Group,
    version: Option<String>,
    help: Command,
    version_command: Option<Command>,
    config: EngineConfig,
}

impl App {
    pub fn new(name: &str) -> Self {
        Self {
            root: Group::new(name),
            version: None,
            help: help::help_command(),
            version_command: None,
            config: EngineConfig::default(),
        }
    }

    /// Set the version and install the `version` command.
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        if self.version_command.is_none() {
            self.version_command = Some(help::version_command());
        }
        self
    }

    pub fn about(mut self, description: &str) -> Self {
        self.root.set_description(description);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.root.push(Node::Command(command));
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        self.root.push(Node::Group(group));
        self
    }

    /// Declare an option every command accepts.
    pub fn shared_option(mut self, option: Arc<OptionDescriptor>) -> Self {
        self.root.add_shared_option(option);
        self
    }

    /// Replace the built-in help command. It also becomes the default command.
    pub fn help_command(mut self, command: Command) -> Self {
        self.help = command;
        self
    }

    /// Replace the built-in version command.
    pub fn version_command(mut self, command: Command) -> Self {
        self.version_command = Some(command);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// `<app> <version>`
    pub fn version_line(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.name(), version),
            None => self.name().to_string(),
        }
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    /// The installed help and version commands.
    pub fn builtins(&self) -> Vec<&Command> {
        let mut builtins = vec![&self.help];
        builtins.extend(self.version_command.as_ref());
        builtins
    }

    /// Built-in command answering to `token`.
    pub fn builtin(&self, token: &str) -> Option<&Command> {
        self.builtins()
            .into_iter()
            .find(|command| command.answers_to(token))
    }

    fn is_builtin(&self, command: &Command) -> bool {
        self.builtins()
            .into_iter()
            .any(|builtin| ptr::eq(builtin, command))
    }

    pub fn router(&self) -> Router<'_> {
        let mut router = Router::new(&self.root, &self.help)
            .with_help(&self.help)
            .flag_shortcuts(self.config.help_shortcuts);
        if let Some(version) = &self.version_command {
            router = router.with_version(version);
        }
        router
    }

    /// Listing of the deepest group of `path`.
    pub fn group_help(&self, path: &GroupPath<'_>) -> String {
        usage::group_usage(path, &self.builtins())
    }

    /// Help text for `request` resolved from the root, as `help` would print it.
    pub fn help_for(&self, request: &[String]) -> Result<String, UnknownCommand> {
        help::resolve(self, &GroupPath::root(&self.root), request)
    }

    /// Check the whole command tree for declaration mistakes.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        self.root.validate()?;

        let taken = self.root.child_names();
        for builtin in self.builtins() {
            let names = std::iter::once(builtin.name())
                .chain(builtin.shortcuts().iter().map(String::as_str));
            for name in names {
                if taken.contains(&name) {
                    return Err(DefinitionError::DuplicateChild {
                        name: name.to_string(),
                        group: self.name().to_string(),
                    });
                }
            }
        }

        self.validate_scope(&GroupPath::root(&self.root))
    }

    fn validate_scope<'a>(&'a self, path: &GroupPath<'a>) -> Result<(), DefinitionError> {
        let group = path.current();
        OptionRegistry::new(path.shared_options(), &path.qualified_name())?;

        for command in group.commands().chain(self.builtins()) {
            OptionRegistry::for_command(path, command)?;
        }
        for child in group.groups() {
            self.validate_scope(&path.appending(child))?;
        }
        Ok(())
    }

    /// Route, parse and bind a command line (program name already stripped).
    pub fn parse(&self, tokens: &[String]) -> Result<Invocation<'_>, Failure> {
        let route = self.router().route(tokens);
        tracing::debug!(
            command = %route.command.name(),
            path = %route.path.qualified_name(),
            kind = ?route.kind,
            "routed"
        );

        let registry =
            OptionRegistry::for_command(&route.path, route.command).map_err(Failure::definition)?;

        if self.wants_help(route.command, &registry, route.residual) {
            tracing::debug!(command = %route.command.name(), "help requested, re-dispatching");
            let help_registry =
                OptionRegistry::for_command(&route.path, &self.help).map_err(Failure::definition)?;
            let request = [route.command.name().to_string()];
            return self.bind(
                &self.help,
                route.path,
                &help_registry,
                &request,
                RouteKind::Shortcut,
            );
        }

        self.bind(
            route.command,
            route.path,
            &registry,
            route.residual,
            route.kind,
        )
    }

    /// Parse and run the resolved command's handler, returning the exit code.
    pub fn run(&self, tokens: &[String]) -> i32 {
        let invocation = match self.parse(tokens) {
            Ok(invocation) => invocation,
            Err(failure) => {
                eprintln!("{}", failure.message);
                return failure.exit_code;
            }
        };

        let Some(handler) = invocation.command.entry_point() else {
            eprintln!(
                "error: command '{}' has no handler",
                invocation.qualified_name()
            );
            return EXIT_DEFINITION;
        };

        match handler(&invocation) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("error: {e:#}");
                EXIT_FAILURE
            }
        }
    }

    /// A user command given an unclaimed `-h`/`--help` before `--`.
    fn wants_help(&self, command: &Command, registry: &OptionRegistry<'_>, residual: &[String]) -> bool {
        if !self.config.help_shortcuts || self.is_builtin(command) {
            return false;
        }
        let is_help = |token: &String| token == "-h" || token == "--help";
        match registry.parse(residual, false) {
            Ok(parsed) => parsed.unrecognized.iter().any(is_help),
            Err(_) => residual
                .iter()
                .take_while(|token| *token != "--")
                .any(|token| is_help(token) && !registry.contains(token)),
        }
    }

    fn bind<'a>(
        &'a self,
        command: &'a Command,
        path: GroupPath<'a>,
        registry: &OptionRegistry<'a>,
        tokens: &[String],
        kind: RouteKind,
    ) -> Result<Invocation<'a>, Failure> {
        let strict = command
            .strictness()
            .unwrap_or(self.config.fail_on_unrecognized);

        let parsed = match registry.parse(tokens, strict) {
            Ok(parsed) => parsed,
            Err(err) => return Err(Failure::usage(&err, &path, command)),
        };
        let arguments = match command.signature().bind(&parsed.positional) {
            Ok(arguments) => arguments,
            Err(err) => return Err(Failure::usage(&err, &path, command)),
        };

        Ok(Invocation {
            app: self,
            command,
            path,
            arguments,
            options: parsed.options,
            unrecognized: parsed.unrecognized,
            kind,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
