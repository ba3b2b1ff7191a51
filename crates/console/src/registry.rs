//! Command registry.
//!
//! The registry is assembled once through [`RegistryBuilder`] and frozen by
//! [`RegistryBuilder::build`]. A frozen [`CommandRegistry`] has no mutating
//! methods, so it can be shared between tasks without locking.

use crate::error::ConsoleError;
use crate::handler::{CommandHandler, CommandResult, SyncHandler};
use crate::resolver::Resolver;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Name of the built-in help command. It is always registered first.
pub const HELP_COMMAND: &str = "help";

const HELP_DESCRIPTION: &str = "Show help menu";

/// What runs when a registered name is dispatched.
pub enum CommandKind<S> {
    /// The built-in listing, rendered by the dispatcher from live registry
    /// contents.
    Help,
    /// An external handler.
    Handler(Arc<dyn CommandHandler<S>>),
}

impl<S> Clone for CommandKind<S> {
    fn clone(&self) -> Self {
        match self {
            CommandKind::Help => CommandKind::Help,
            CommandKind::Handler(handler) => CommandKind::Handler(Arc::clone(handler)),
        }
    }
}

/// A registered command: its name, description and behaviour.
pub struct CommandEntry<S> {
    name: String,
    description: String,
    kind: CommandKind<S>,
}

impl<S> CommandEntry<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &CommandKind<S> {
        &self.kind
    }

    /// Returns the handler, or `None` for the built-in help.
    pub fn handler(&self) -> Option<&Arc<dyn CommandHandler<S>>> {
        match &self.kind {
            CommandKind::Handler(handler) => Some(handler),
            CommandKind::Help => None,
        }
    }
}

impl<S> fmt::Debug for CommandEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("builtin", &matches!(self.kind, CommandKind::Help))
            .finish()
    }
}

/// Collects registrations before the registry is frozen.
///
/// Every `register*` call consumes and returns the builder so a collision
/// aborts the whole chain through `?`.
pub struct RegistryBuilder<S> {
    entries: IndexMap<String, CommandEntry<S>>,
}

impl<S: Send + 'static> RegistryBuilder<S> {
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(
            HELP_COMMAND.to_string(),
            CommandEntry {
                name: HELP_COMMAND.to_string(),
                description: HELP_DESCRIPTION.to_string(),
                kind: CommandKind::Help,
            },
        );
        Self { entries }
    }

    /// Registers `handler` under `name`.
    ///
    /// Fails with [`ConsoleError::DuplicateCommand`] if the name is taken,
    /// [`ConsoleError::ReservedCommand`] for `help`, and
    /// [`ConsoleError::InvalidName`] for names that cannot be typed as one token.
    pub fn register<H>(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: H,
    ) -> Result<Self, ConsoleError>
    where
        H: CommandHandler<S> + 'static,
    {
        self.register_arc(name, description, Arc::new(handler))
    }

    /// Registers an already shared handler. Useful when one handler serves
    /// several names.
    pub fn register_arc(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler<S>>,
    ) -> Result<Self, ConsoleError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConsoleError::InvalidName(name));
        }
        if name == HELP_COMMAND {
            return Err(ConsoleError::ReservedCommand(name));
        }
        if self.entries.contains_key(&name) {
            return Err(ConsoleError::DuplicateCommand(name));
        }

        self.entries.insert(
            name.clone(),
            CommandEntry {
                name,
                description: description.into(),
                kind: CommandKind::Handler(handler),
            },
        );
        Ok(self)
    }

    /// Registers a synchronous closure.
    pub fn register_fn<F>(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        f: F,
    ) -> Result<Self, ConsoleError>
    where
        F: Fn(&mut S, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        self.register(name, description, SyncHandler::new(f))
    }

    /// Freezes the registry.
    pub fn build(self) -> CommandRegistry<S> {
        tracing::debug!(commands = self.entries.len(), "command registry frozen");
        CommandRegistry {
            entries: self.entries,
        }
    }
}

impl<S> fmt::Debug for RegistryBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}

impl<S: Send + 'static> Default for RegistryBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable table of command name to handler and description.
pub struct CommandRegistry<S> {
    entries: IndexMap<String, CommandEntry<S>>,
}

impl<S> CommandRegistry<S> {
    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry<S>> {
        self.entries.get(name)
    }

    pub fn describe(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(CommandEntry::description)
    }

    /// All `(name, description)` pairs in declaration order.
    pub fn list_all(&self) -> Vec<(&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.name(), entry.description()))
            .collect()
    }

    /// Command names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolver(&self) -> Resolver<'_, S> {
        Resolver::new(self)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolver().exists(name)
    }

    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.resolver().suggest(prefix)
    }
}

impl<S> fmt::Debug for CommandRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}
