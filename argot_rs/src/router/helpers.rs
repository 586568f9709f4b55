//! Helper functions for routing.
//!
//! Command suggestion via Levenshtein distance.

use strsim::levenshtein;

use crate::command::Group;

/// Suggest the child of `group` closest to `input`.
/// Returns `None` unless some name is within `max_distance` edits.
pub(crate) fn suggest_similar(group: &Group, input: &str, max_distance: usize) -> Option<String> {
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(&str, usize)> = None;

    for name in group.child_names() {
        let distance = levenshtein(&input_lower, name);
        if distance > max_distance {
            continue;
        }
        match best_match {
            Some((_, best_dist)) if distance >= best_dist => {}
            _ => best_match = Some((name, distance)),
        }
    }

    best_match.map(|(name, _)| name.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    fn group() -> Group {
        Group::new("db")
            .command(Command::new("migrate", "").unwrap().shortcut("m"))
            .command(Command::new("status", "").unwrap())
            .group(Group::new("schema"))
    }

    #[test]
    fn test_suggest_similar() {
        let group = group();
        assert_eq!(suggest_similar(&group, "migrat", 2).as_deref(), Some("migrate"));
        assert_eq!(suggest_similar(&group, "STATSU", 2).as_deref(), Some("status"));
        assert_eq!(suggest_similar(&group, "shema", 2).as_deref(), Some("schema"));
        assert_eq!(suggest_similar(&group, "completely-different", 2), None);
        assert_eq!(suggest_similar(&group, "migrat", 0), None);
    }
}
