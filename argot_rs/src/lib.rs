//! # argot
//!
//! **Signature-driven argument processing** for command-line tools with
//! grouped commands.
//!
//! A command declares its positional parameters as a compact signature
//! string and its options as typed descriptors. At runtime the engine routes
//! the raw tokens to a command, strips and converts option tokens, binds the
//! rest to the signature and hands the result to the command's handler. Bad
//! input comes back as an error with the command's usage attached.
//!
//! ## Features
//!
//! - **Signatures** - `<person> [<greeting>] ...` with required, optional and variadic parameters
//! - **Options** - flags, counters, typed keys and variadic keys, with `-abc` cascading
//! - **Groups** - nested command groups with shared options and default commands
//! - **Help** - aligned usage text, `-h`/`--help` anywhere, "did you mean" suggestions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argot::{App, Command, Invocation, OptionDescriptor};
//!
//! fn greet(inv: &Invocation<'_>) -> anyhow::Result<()> {
//!     let person = inv.arguments.single("person").unwrap_or("world");
//!     let times = inv.options.value::<u32>("--times").unwrap_or(1);
//!     for _ in 0..times {
//!         println!("Hello, {}!", person);
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let app = App::new("hello").version("1.0.0").command(
//!         Command::new("greet", "<person>")?
//!             .about("Greet someone")
//!             .option(OptionDescriptor::key::<u32>(&["-n", "--times"], "Repeat")?)
//!             .handler(greet),
//!     );
//!     app.validate()?;
//!
//!     let args: Vec<String> = std::env::args().skip(1).collect();
//!     std::process::exit(app.run(&args));
//! }
//! ```

// ============================================================================
// Declarations
// ============================================================================

/// Signature mini-language: `<required> [<optional>] ...`.
pub mod signature;

/// Option descriptors, option groups and the option parser.
pub mod options;

/// Typed conversion of raw tokens, including restricted choices.
pub mod value;

/// Commands and command groups.
pub mod command;

// ============================================================================
// Runtime
// ============================================================================

/// Positional binding of leftover tokens to a signature.
pub mod binder;

/// Token-driven command routing through nested groups.
pub mod router;

/// Usage text rendering.
pub mod usage;

/// Built-in help and version commands.
pub mod help;

/// Application entry point.
pub mod app;

// ============================================================================
// Ambient
// ============================================================================

pub mod config;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::{App, EXIT_DEFINITION, EXIT_FAILURE, EXIT_SUCCESS, Failure, Invocation};
pub use binder::{ArgValue, BoundArguments};
pub use command::{Command, Group, Handler, Node};
pub use config::EngineConfig;
pub use error::{
    ArgumentRange, DefinitionError, MalformedSignature, ParseError, Restriction, SignatureFault,
    UnknownCommand,
};
pub use options::{BoundOptions, OptionDescriptor, OptionGroup, OptionKind, OptionState, ValueType};
pub use router::{GroupPath, Route, RouteKind, Router};
pub use signature::{ParameterDescriptor, Signature};
pub use value::{ConvertibleValue, RestrictedChoice, Value};
