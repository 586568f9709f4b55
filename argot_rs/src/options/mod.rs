//! Option declaration and parsing.
//!
//! - `descriptor`: flags, counters, keys, variadic keys and option groups
//! - `registry`: token recognition, cascading and typed conversion
//! - `bound`: the per-invocation option values

mod bound;
mod descriptor;
mod registry;

pub use bound::{BoundOptions, OptionState};
pub use descriptor::{OptionDescriptor, OptionGroup, OptionKind, ValueType};
pub use registry::{OptionParse, OptionRegistry};
