//! Built-in `help` and `version` commands.
//!
//! Both are plain [`Command`] values. The application installs them unless
//! replaced, and the router reaches them from any depth.

use crate::app::{App, Invocation};
use crate::command::Command;
use crate::error::UnknownCommand;
use crate::router::{GroupPath, suggest_similar};
use crate::signature::{ParameterDescriptor, Signature};
use crate::usage;

/// `help [<command>] ...`, lenient about options it does not know.
pub fn help_command() -> Command {
    let signature = Signature::from_params(vec![ParameterDescriptor {
        name: "command".to_string(),
        required: false,
        variadic: true,
    }]);
    Command::with_signature("help", signature)
        .about("Show help for a command or group")
        .fail_on_unrecognized(false)
        .handler(run_help)
}

/// `version`, printing `<app> <version>`.
pub fn version_command() -> Command {
    Command::with_signature("version", Signature::default())
        .about("Show version information")
        .handler(run_version)
}

/// Help text for `request`, resolved from `path`.
///
/// Group names descend; a command name or shortcut renders that command's
/// usage and ends the walk. When the request is used up, the deepest group
/// reached is listed.
pub fn resolve<'a>(
    app: &'a App,
    path: &GroupPath<'a>,
    request: &[String],
) -> Result<String, UnknownCommand> {
    let mut path = path.clone();

    for token in request {
        let group = path.current();

        if let Some(child) = group.find_group(token) {
            path = path.appending(child);
            continue;
        }

        if let Some(command) = group.find_command(token).or_else(|| app.builtin(token)) {
            return Ok(usage::command_usage(&path, command));
        }

        let config = app.engine_config();
        let suggestion = if config.suggestions {
            suggest_similar(group, token, config.suggestion_distance)
        } else {
            None
        };
        return Err(UnknownCommand {
            token: token.clone(),
            suggestion,
            help: app.group_help(&path).trim_end().to_string(),
        });
    }

    Ok(app.group_help(&path))
}

/// Help text for an invocation of a help command.
pub fn render(invocation: &Invocation<'_>) -> Result<String, UnknownCommand> {
    resolve(
        invocation.app,
        &invocation.path,
        invocation.arguments.list("command"),
    )
}

fn run_help(invocation: &Invocation<'_>) -> anyhow::Result<()> {
    print!("{}", render(invocation)?);
    Ok(())
}

fn run_version(invocation: &Invocation<'_>) -> anyhow::Result<()> {
    println!("{}", invocation.app.version_line());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
