//! The uniform invocation contract every command implements.

use crate::error::CommandError;
use async_trait::async_trait;

/// Result of a single handler invocation. `Ok` carries the exact display
/// text, including usage strings for missing arguments.
pub type CommandResult = Result<String, CommandError>;

/// A named command's behaviour.
///
/// `S` is the session context owned by the console. Handlers that keep state
/// between invocations (a connected wallet account, for instance) read and
/// write it through `session` rather than through globals.
#[async_trait]
pub trait CommandHandler<S>: Send + Sync {
    async fn call(&self, session: &mut S, args: &[String]) -> CommandResult;
}

/// Adapts a synchronous closure into a [`CommandHandler`].
pub struct SyncHandler<F>(F);

impl<F> SyncHandler<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<S, F> CommandHandler<S> for SyncHandler<F>
where
    S: Send,
    F: Fn(&mut S, &[String]) -> CommandResult + Send + Sync,
{
    async fn call(&self, session: &mut S, args: &[String]) -> CommandResult {
        (self.0)(session, args)
    }
}
