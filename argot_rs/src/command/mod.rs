//! Command tree definitions.
//!
//! - `types`: the [`Command`] value (name, shortcuts, signature, options, entry point)
//! - `group`: [`Group`] nodes with nested children and shared options

mod group;
mod types;

pub use group::{Group, Node};
pub use types::{Command, Handler};
