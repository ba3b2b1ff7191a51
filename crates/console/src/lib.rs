//! Command dispatch core for the Web3 terminal.
//!
//! A raw input line flows through four small components:
//!
//! - [`tokenize`] splits the line into a command name and raw arguments.
//! - [`CommandRegistry`] is the immutable table of named handlers, built once
//!   through [`RegistryBuilder`] which rejects duplicate names.
//! - [`Resolver`] answers "does this command exist" and produces prefix
//!   suggestions for auto-completion.
//! - [`Dispatcher`] invokes the resolved [`CommandHandler`] and normalizes
//!   whatever happens (success, usage text, failure, panic) into one string.
//!
//! Handlers receive an explicit session value `S` instead of sharing global
//! mutable state. [`Console`] pairs a dispatcher with its session and takes
//! `&mut self` per line, so only one dispatch can be in flight.

pub mod console;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod registry;
pub mod resolver;
pub mod tokenizer;

pub use console::Console;
pub use dispatcher::{unknown_command_message, Dispatcher, HELP_COLUMN_WIDTH};
pub use error::{CommandError, ConsoleError, OperationExt};
pub use handler::{CommandHandler, CommandResult, SyncHandler};
pub use registry::{CommandEntry, CommandKind, CommandRegistry, RegistryBuilder, HELP_COMMAND};
pub use resolver::Resolver;
pub use tokenizer::{tokenize, ParsedInput};

/// Result type for registry construction.
pub type Result<T> = std::result::Result<T, ConsoleError>;
