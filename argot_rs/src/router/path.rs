//! Group paths from the application root down to a command's parent.

use std::rc::Rc;
use std::sync::Arc;

use crate::command::Group;
use crate::options::OptionDescriptor;

#[derive(Debug)]
struct Segment<'a> {
    group: &'a Group,
    parent: Option<Rc<Segment<'a>>>,
}

/// An immutable path of groups. Appending shares the existing prefix and
/// returns a new path; the original is left untouched.
#[derive(Debug, Clone)]
pub struct GroupPath<'a> {
    tail: Rc<Segment<'a>>,
    depth: usize,
}

impl<'a> GroupPath<'a> {
    pub fn root(group: &'a Group) -> Self {
        Self {
            tail: Rc::new(Segment {
                group,
                parent: None,
            }),
            depth: 1,
        }
    }

    pub fn appending(&self, group: &'a Group) -> Self {
        Self {
            tail: Rc::new(Segment {
                group,
                parent: Some(Rc::clone(&self.tail)),
            }),
            depth: self.depth + 1,
        }
    }

    /// The deepest group of the path.
    pub fn current(&self) -> &'a Group {
        self.tail.group
    }

    /// Number of groups, the root included.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Groups from the root to the deepest one.
    pub fn groups(&self) -> Vec<&'a Group> {
        let mut groups = Vec::with_capacity(self.depth);
        let mut segment = Some(&self.tail);
        while let Some(current) = segment {
            groups.push(current.group);
            segment = current.parent.as_ref();
        }
        groups.reverse();
        groups
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.groups().into_iter().map(Group::name).collect()
    }

    /// Group names below the root, as a user would type them.
    pub fn relative_names(&self) -> Vec<&'a str> {
        self.names().into_iter().skip(1).collect()
    }

    /// `app group subgroup`
    pub fn qualified_name(&self) -> String {
        self.names().join(" ")
    }

    /// `app group subgroup command`
    pub fn qualified_name_with(&self, command: &str) -> String {
        format!("{} {}", self.qualified_name(), command)
    }

    /// Shared options of every group along the path, root first.
    pub fn shared_options(&self) -> Vec<&'a Arc<OptionDescriptor>> {
        self.groups()
            .into_iter()
            .flat_map(|group| group.shared_options().iter())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appending_shares_prefix() {
        let inner = Group::new("schema");
        let db = Group::new("db").group(inner.clone());
        let root = Group::new("app").group(db.clone());

        let base = GroupPath::root(&root);
        let with_db = base.appending(&db);
        let with_schema = with_db.appending(&inner);

        assert_eq!(base.names(), vec!["app"]);
        assert_eq!(with_db.names(), vec!["app", "db"]);
        assert_eq!(with_schema.qualified_name(), "app db schema");
        assert_eq!(with_schema.relative_names(), vec!["db", "schema"]);
        assert_eq!(with_schema.depth(), 3);
        assert!(Rc::ptr_eq(
            with_schema.tail.parent.as_ref().unwrap(),
            &with_db.tail
        ));
    }

    #[test]
    fn test_shared_options_root_first() {
        let quiet = OptionDescriptor::flag(&["-q", "--quiet"], "Quiet").unwrap();
        let dry = OptionDescriptor::flag(&["--dry-run"], "Dry run").unwrap();
        let db = Group::new("db").shared_option(dry);
        let root = Group::new("app").shared_option(quiet);

        let path = GroupPath::root(&root).appending(&db);
        let names: Vec<&str> = path
            .shared_options()
            .into_iter()
            .map(|opt| opt.identity())
            .collect();
        assert_eq!(names, vec!["--quiet", "--dry-run"]);
        assert_eq!(path.qualified_name_with("migrate"), "app db migrate");
    }
}
