//! Listener registry and the stock dispatch loop

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::{
    error::{HookError, Result},
    hook::Hook,
    listener::Listener,
    resolver::ListenerResolver,
};

/// Stock [`Dispatcher`](super::Dispatcher) implementation.
///
/// Owns the mapping from event name to ordered listener chain, plus the
/// injected [`ListenerResolver`] that produces handler instances for
/// deferred listeners. One dispatcher instance owns its registry; nothing
/// mutates it from outside.
pub struct HookDispatcher {
    resolver: Arc<dyn ListenerResolver>,
    listeners: HashMap<String, Vec<Listener>>,
}

impl HookDispatcher {
    /// Dispatcher resolving deferred listeners through `resolver`.
    pub fn new(resolver: Arc<dyn ListenerResolver>) -> Self {
        Self {
            resolver,
            listeners: HashMap::new(),
        }
    }

    /// Chain length registered under `name`, 0 when absent.
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, |chain| chain.len())
    }

    /// Number of distinct names with at least one registered listener.
    pub fn registered_hook_count(&self) -> usize {
        self.listeners.len()
    }

    /// Snapshot of the chain that would run for `event`.
    ///
    /// The chain under the event's logical name comes first; when the name
    /// differs from the type identity, the chain under the type identity is
    /// appended after it, so listeners registered either way fire.
    pub fn listeners(&self, event: &dyn Hook) -> Vec<Listener> {
        let name = event.name();
        let mut chain: Vec<Listener> = self.listeners.get(&name).cloned().unwrap_or_default();

        if name != event.kind() {
            if let Some(kind_chain) = self.listeners.get(event.kind()) {
                chain.extend(kind_chain.iter().cloned());
            }
        }

        chain
    }
}

impl super::Dispatcher for HookDispatcher {
    fn listen(&mut self, name: &str, listener: Listener) -> Result<()> {
        if let Listener::Deferred(type_identifier) = &listener {
            if type_identifier.trim().is_empty() {
                return Err(HookError::InvalidListener(
                    "deferred listeners need a non-blank type identifier".to_string(),
                ));
            }
        }

        debug!(hook = %name, "Registering hook listener");
        self.listeners
            .entry(name.to_string())
            .or_default()
            .push(listener);
        Ok(())
    }

    fn has_listeners(&self, name: &str) -> bool {
        self.listeners
            .get(name)
            .map_or(false, |chain| !chain.is_empty())
    }

    fn forget(&mut self, name: &str) {
        debug!(hook = %name, "Forgetting hook listeners");
        self.listeners.remove(name);
    }

    fn dispatch(
        &self,
        event: &dyn Hook,
        context: Option<&str>,
        additional: &[Value],
    ) -> Result<Value> {
        let name = event.name();
        let chain = self.listeners(event);
        let mut payload = event.payload();

        if chain.is_empty() {
            debug!(hook = %name, "No listeners registered for hook");
            return Ok(payload);
        }

        debug!(hook = %name, listeners = chain.len(), "Dispatching hook");

        for listener in &chain {
            let propagating = listener.call(self.resolver.as_ref(), event, context, additional)?;

            // Listeners publish changes through set_payload; re-read so the
            // returned value always reflects the most recent state.
            payload = event.payload();

            if propagating == Some(false) {
                debug!(hook = %name, "Hook propagation stopped by listener");
                break;
            }
        }

        Ok(payload)
    }
}

impl fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("registered_hooks", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
