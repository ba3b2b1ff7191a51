//! A dispatcher paired with the session it serves.

use crate::dispatcher::Dispatcher;
use crate::registry::CommandRegistry;

/// One terminal session.
///
/// [`Console::dispatch`] borrows the console mutably, so a new line cannot be
/// dispatched until the previous one has produced its output. Outputs are
/// therefore always in submission order.
pub struct Console<S> {
    dispatcher: Dispatcher<S>,
    session: S,
}

impl<S: Send> Console<S> {
    pub fn new(registry: CommandRegistry<S>, session: S) -> Self {
        Self::with_dispatcher(Dispatcher::new(registry), session)
    }

    pub fn with_dispatcher(dispatcher: Dispatcher<S>, session: S) -> Self {
        Self {
            dispatcher,
            session,
        }
    }

    pub async fn dispatch(&mut self, line: &str) -> String {
        self.dispatcher.dispatch(&mut self.session, line).await
    }

    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.dispatcher.suggest(prefix)
    }

    pub fn list_all(&self) -> Vec<(&str, &str)> {
        self.dispatcher.list_all()
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }
}
