//! Listener forms and their uniform invocation seam
//!
//! A listener registered with the dispatcher takes one of three forms: a
//! plain closure, a handler-capable object, or a type identifier resolved to
//! a handler at dispatch time. The closed [`Listener`] enum normalizes the
//! three forms at registration; [`Listener::call`] is the single seam they
//! share during dispatch.
//!
//! # Propagation verdicts
//!
//! Every form returns `Option<bool>`. `Some(false)` stops the remaining
//! chain; `Some(true)` and `None` both let it continue. Only the exact
//! `false` verdict short-circuits.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{error::Result, hook::Hook, resolver::ListenerResolver};

/// Capability contract for handler-object listeners.
pub trait HookHandler: Send + Sync {
    /// Handle one dispatched event.
    ///
    /// `context` and `additional` are forwarded verbatim from the dispatch
    /// call site. Return `Some(false)` to stop propagation.
    fn handle(
        &self,
        event: &dyn Hook,
        context: Option<&str>,
        additional: &[Value],
    ) -> Option<bool>;
}

/// Callable signature shared by every listener form.
pub type ListenerFn = dyn Fn(&dyn Hook, Option<&str>, &[Value]) -> Option<bool> + Send + Sync;

/// A registered listener in one of its three accepted forms.
///
/// The enum is closed: anything that is not a closure, a handler object or a
/// type identifier is unrepresentable, so the only malformed listener left
/// for the dispatcher to reject is a deferred form with a blank identifier.
#[derive(Clone)]
pub enum Listener {
    /// Plain closure, invoked directly.
    Direct(Arc<ListenerFn>),
    /// Handler-capable object; `handle` is invoked on it.
    Handler(Arc<dyn HookHandler>),
    /// Type identifier resolved through the dispatcher's resolver on each
    /// invocation. Resolution never happens at registration and the produced
    /// handler is never cached.
    Deferred(String),
}

impl Listener {
    /// Listener from a plain closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Hook, Option<&str>, &[Value]) -> Option<bool> + Send + Sync + 'static,
    {
        Listener::Direct(Arc::new(f))
    }

    /// Listener from a handler-capable object.
    pub fn from_handler(handler: Arc<dyn HookHandler>) -> Self {
        Listener::Handler(handler)
    }

    /// Listener resolved from a type identifier at dispatch time.
    pub fn deferred(type_identifier: impl Into<String>) -> Self {
        Listener::Deferred(type_identifier.into())
    }

    /// Invoke the listener against one event.
    ///
    /// Deferred listeners ask `resolver` for a fresh handler on every call.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::UnresolvedListener`](crate::HookError::UnresolvedListener)
    /// when a deferred identifier cannot be resolved.
    pub fn call(
        &self,
        resolver: &dyn ListenerResolver,
        event: &dyn Hook,
        context: Option<&str>,
        additional: &[Value],
    ) -> Result<Option<bool>> {
        match self {
            Listener::Direct(f) => Ok(f(event, context, additional)),
            Listener::Handler(handler) => Ok(handler.handle(event, context, additional)),
            Listener::Deferred(type_identifier) => {
                let handler = resolver.resolve(type_identifier)?;
                Ok(handler.handle(event, context, additional))
            }
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Direct(_) => f.write_str("Listener::Direct(..)"),
            Listener::Handler(_) => f.write_str("Listener::Handler(..)"),
            Listener::Deferred(id) => write!(f, "Listener::Deferred({:?})", id),
        }
    }
}
