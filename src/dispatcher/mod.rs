//! Hook dispatcher: listener registration and synchronous dispatch
//!
//! The [`Dispatcher`] trait is the registration and dispatch seam;
//! [`HookDispatcher`] is the stock implementation owning the name-to-chain
//! registry. Dispatch is a plain sequential call on the caller's thread:
//! listeners run in registration order, each may mutate the event's payload
//! or stop propagation, and the payload state left behind is returned to the
//! caller.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//! use hookwire::{Dispatcher, HookDispatcher, Listener, NamedHook, TableResolver};
//!
//! let mut dispatcher = HookDispatcher::new(Arc::new(TableResolver::new()));
//!
//! dispatcher.listen("config.reloaded", Listener::from_fn(|event, _context, _extra| {
//!     let mut payload = event.payload();
//!     payload["seen"] = serde_json::json!(true);
//!     event.set_payload(payload);
//!     None
//! }))?;
//!
//! let event = NamedHook::named("config.reloaded", serde_json::json!({}));
//! let payload = dispatcher.dispatch(&event, None, &[])?;
//! assert_eq!(payload["seen"], serde_json::json!(true));
//! # Ok::<(), hookwire::HookError>(())
//! ```

pub mod registry;

pub use registry::HookDispatcher;

use serde_json::Value;

use crate::{error::Result, hook::Hook, listener::Listener};

/// Trait for registering hook listeners and dispatching hook events.
///
/// # Thread Safety
///
/// Implementations are `Send + Sync` so a concurrent embedding can wrap one
/// in its own synchronization. The trait itself assumes synchronous,
/// single-threaded use and mandates no locking.
pub trait Dispatcher: Send + Sync {
    /// Register `listener` at the end of the chain for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidListener`](crate::HookError::InvalidListener)
    /// for a malformed listener; nothing is registered in that case.
    fn listen(&mut self, name: &str, listener: Listener) -> Result<()>;

    /// Register the same listener once per name, in the given order.
    ///
    /// Listener validity does not depend on the name, so either every
    /// registration happens or none does.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidListener`](crate::HookError::InvalidListener)
    /// for a malformed listener.
    fn listen_many(&mut self, names: &[&str], listener: Listener) -> Result<()> {
        for name in names {
            self.listen(name, listener.clone())?;
        }
        Ok(())
    }

    /// Whether `name` has a non-empty listener chain.
    fn has_listeners(&self, name: &str) -> bool;

    /// Remove the entire chain for `name`. No-op when absent.
    fn forget(&mut self, name: &str);

    /// Run the listener chain for `event` and return the resulting payload.
    ///
    /// Listeners execute in registration order: first the chain under the
    /// event's logical name, then, when the name differs from the type
    /// identity, the chain under the type identity. The payload is re-read
    /// from the event after every listener call, so the returned value
    /// reflects every change published up to the point the chain ended. A
    /// listener returning `Some(false)` stops propagation. With no chain
    /// registered, the event's original payload is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::UnresolvedListener`](crate::HookError::UnresolvedListener)
    /// when a deferred listener's identifier cannot be resolved; payload
    /// changes applied by earlier listeners remain visible on the event.
    fn dispatch(
        &self,
        event: &dyn Hook,
        context: Option<&str>,
        additional: &[Value],
    ) -> Result<Value>;
}
