//! Existence checks and auto-completion, backed by the one registry.

use crate::registry::CommandRegistry;

/// Borrowed view over a [`CommandRegistry`] answering name queries.
pub struct Resolver<'a, S> {
    registry: &'a CommandRegistry<S>,
}

impl<'a, S> Resolver<'a, S> {
    pub fn new(registry: &'a CommandRegistry<S>) -> Self {
        Self { registry }
    }

    /// Exact, case-sensitive membership test.
    pub fn exists(&self, name: &str) -> bool {
        self.registry.lookup(name).is_some()
    }

    /// Names starting with `prefix`, compared case-insensitively, in
    /// declaration order.
    ///
    /// A name equal to the prefix (ignoring case) is left out, so a fully
    /// typed command drops out of the list. An empty prefix yields every name.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.registry
            .names()
            .filter(|name| {
                let name = name.to_lowercase();
                name.starts_with(&prefix) && name != prefix
            })
            .map(str::to_string)
            .collect()
    }
}
