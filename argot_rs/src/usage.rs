//! Usage text for commands and groups.
//!
//! Every listing pads its identifiers to the widest one across all of its
//! sections, so parameters, commands and options line up in one column.

use std::sync::Arc;

use crate::command::Command;
use crate::options::OptionDescriptor;
use crate::router::GroupPath;

/// One listing row: identifier and description.
type Row<'a> = (String, &'a str);

/// Usage of `command` reached through `path`.
pub fn command_usage(path: &GroupPath<'_>, command: &Command) -> String {
    let options = visible_options(path, command.options());
    let signature = command.signature();

    let mut line = format!("Usage: {}", path.qualified_name_with(command.name()));
    if !signature.is_empty() {
        line.push(' ');
        line.push_str(&signature.to_string());
    }
    if !options.is_empty() {
        line.push_str(" [options]");
    }

    let parameters: Vec<Row<'_>> = if command.has_param_descriptions() {
        signature
            .params()
            .iter()
            .map(|param| {
                let mut id = param.token();
                if param.variadic {
                    id.push_str(" ...");
                }
                (id, command.param_description(&param.name).unwrap_or(""))
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut out = String::new();
    out.push_str(&line);
    out.push('\n');
    push_description(&mut out, command.description());

    let option_rows = option_rows(&options);
    let width = column_width([&parameters, &option_rows]);
    push_section(&mut out, "Parameters:", &parameters, width);
    push_section(&mut out, "Options:", &option_rows, width);
    out
}

/// Listing of the deepest group of `path`. `globals` are commands reachable
/// from anywhere, listed only at the root.
pub fn group_usage(path: &GroupPath<'_>, globals: &[&Command]) -> String {
    let group = path.current();
    let options = visible_options(path, &[]);

    let mut line = format!("Usage: {} <command>", path.qualified_name());
    if !options.is_empty() {
        line.push_str(" [options]");
    }

    let groups: Vec<Row<'_>> = group
        .groups()
        .map(|child| (child.name().to_string(), child.description()))
        .collect();

    let mut commands: Vec<Row<'_>> = group.commands().map(command_row).collect();
    if path.depth() == 1 {
        commands.extend(
            globals
                .iter()
                .filter(|global| group.find_command(global.name()).is_none())
                .map(|global| command_row(global)),
        );
    }

    let mut out = String::new();
    out.push_str(&line);
    out.push('\n');
    push_description(&mut out, group.description());

    let option_rows = option_rows(&options);
    let width = column_width([&groups, &commands, &option_rows]);
    push_section(&mut out, "Groups:", &groups, width);
    push_section(&mut out, "Commands:", &commands, width);
    push_section(&mut out, "Options:", &option_rows, width);
    out
}

/// Shared options along the path followed by `own`, each instance once.
fn visible_options<'a>(
    path: &GroupPath<'a>,
    own: &'a [Arc<OptionDescriptor>],
) -> Vec<&'a Arc<OptionDescriptor>> {
    let mut seen: Vec<&'a Arc<OptionDescriptor>> = Vec::new();
    for option in path.shared_options().into_iter().chain(own) {
        if !seen.iter().any(|known| Arc::ptr_eq(known, option)) {
            seen.push(option);
        }
    }
    seen
}

fn command_row(command: &Command) -> Row<'_> {
    let mut id = command.name().to_string();
    for shortcut in command.shortcuts() {
        id.push_str(", ");
        id.push_str(shortcut);
    }
    (id, command.description())
}

fn option_rows<'a>(options: &[&'a Arc<OptionDescriptor>]) -> Vec<Row<'a>> {
    options
        .iter()
        .map(|option| (option.usage_identifier(), option.description()))
        .collect()
}

fn column_width<const N: usize>(sections: [&Vec<Row<'_>>; N]) -> usize {
    sections
        .iter()
        .flat_map(|rows| rows.iter())
        .map(|(id, _)| id.chars().count())
        .max()
        .unwrap_or(0)
}

fn push_description(out: &mut String, description: &str) {
    if description.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(description);
    out.push('\n');
}

fn push_section(out: &mut String, title: &str, rows: &[Row<'_>], width: usize) {
    if rows.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    for (id, description) in rows {
        let row = format!("  {:<width$}  {}", id, description, width = width);
        out.push_str(row.trim_end());
        out.push('\n');
    }
}

// ============================================================================
// Tests
// ============================================================================
