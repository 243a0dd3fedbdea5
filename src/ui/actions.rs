use crate::platform::PlatformManager;
use crate::screens::ScreenAction;
use rustc_hash::FxHashMap;

/// A bound UI callback: the panel state, the platform manager, and the cell
/// index the host reported for the triggering widget (0 for plain buttons).
pub type Handler<S> = fn(&mut S, &mut dyn PlatformManager, usize) -> ScreenAction;

/// Explicit action-name to handler table, filled at panel construction.
///
/// This replaces attribute-discovered callbacks: every name a layout can
/// fire is registered up front, and anything else is rejected at dispatch.
pub struct ActionMap<S> {
    handlers: FxHashMap<String, Handler<S>>,
}

impl<S> ActionMap<S> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Bind `name` to `handler`. Binding a name twice is a wiring mistake
    /// and surfaces as an error so panel construction can fail loudly.
    pub fn register(&mut self, name: &str, handler: Handler<S>) -> Result<(), String> {
        if self.handlers.insert(name.to_string(), handler).is_some() {
            return Err(format!("UI action '{name}' is bound twice"));
        }
        Ok(())
    }

    /// Look up the handler for `name`. The returned fn pointer is copied
    /// out so the caller can invoke it against the state owning this map.
    pub fn get(&self, name: &str) -> Option<Handler<S>> {
        self.handlers.get(name).copied()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S> Default for ActionMap<S> {
    fn default() -> Self {
        Self::new()
    }
}
