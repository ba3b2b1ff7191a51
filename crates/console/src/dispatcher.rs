//! Resolve, invoke and normalize one input line.

use crate::handler::CommandHandler;
use crate::registry::{CommandKind, CommandRegistry, HELP_COMMAND};
use crate::tokenizer::{tokenize, ParsedInput};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Column width command names are padded to in the help listing.
pub const HELP_COLUMN_WIDTH: usize = 12;

const HELP_FOOTER: &str = "[tab] for auto-completion.\n\
[ctrl+l] to clear terminal.\n\
Type 'help <command>' for more info about a specific command.\n";

/// The message shown for a name that is not registered.
pub fn unknown_command_message(command: &str) -> String {
    format!("unknown command: {command}. Type '{HELP_COMMAND}' for available commands.")
}

/// Single entry point from the terminal into the command set.
///
/// `dispatch` is total: every line yields exactly one string and no handler
/// failure or panic escapes it.
pub struct Dispatcher<S> {
    registry: Arc<CommandRegistry<S>>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: Send> Dispatcher<S> {
    pub fn new(registry: CommandRegistry<S>) -> Self {
        Self::with_shared(Arc::new(registry))
    }

    pub fn with_shared(registry: Arc<CommandRegistry<S>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry<S>> {
        &self.registry
    }

    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.registry.suggest(prefix)
    }

    pub fn list_all(&self) -> Vec<(&str, &str)> {
        self.registry.list_all()
    }

    /// Tokenizes `line`, resolves the command and returns the display text.
    pub async fn dispatch(&self, session: &mut S, line: &str) -> String {
        let ParsedInput { command, args } = tokenize(line);
        if command.is_empty() {
            return String::new();
        }

        let Some(entry) = self.registry.lookup(&command) else {
            debug!(command = %command, "unknown command");
            return unknown_command_message(&command);
        };

        debug!(command = %command, args = args.len(), "dispatching command");
        match entry.kind() {
            CommandKind::Help => self.render_help(&args),
            CommandKind::Handler(handler) => {
                Self::invoke(&command, handler.as_ref(), session, &args).await
            }
        }
    }

    async fn invoke(
        command: &str,
        handler: &dyn CommandHandler<S>,
        session: &mut S,
        args: &[String],
    ) -> String {
        let outcome = AssertUnwindSafe(handler.call(session, args))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                warn!(command = %command, error = %err, "command failed");
                err.render(command)
            }
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(command = %command, reason = %reason, "command handler panicked");
                format!("Error executing {command}: handler panicked ({reason})")
            }
        }
    }

    /// Renders the listing, or the description of each named command when
    /// arguments are given.
    fn render_help(&self, args: &[String]) -> String {
        if args.is_empty() {
            return self.render_listing();
        }

        let mut lines = Vec::with_capacity(args.len());
        for name in args {
            match self.registry.describe(name) {
                Some(description) => lines.push(format_help_line(name, description)),
                None => lines.push(unknown_command_message(name)),
            }
        }
        lines.join("\n")
    }

    fn render_listing(&self) -> String {
        let mut output = String::from("Available commands:\n");
        for (name, description) in self.registry.list_all() {
            output.push_str(&format_help_line(name, description));
            output.push('\n');
        }
        output.push('\n');
        output.push_str(HELP_FOOTER);
        output
    }
}

fn format_help_line(name: &str, description: &str) -> String {
    format!("  {name:<width$} - {description}", width = HELP_COLUMN_WIDTH)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
