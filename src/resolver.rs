//! Handler resolution for deferred listeners
//!
//! A listener registered as a bare type identifier is turned into a handler
//! instance only when a dispatch reaches it. The factory capability doing
//! that is [`ListenerResolver`], injected into the dispatcher's constructor
//! so the dispatcher itself stays free of global state.
//!
//! Two stock resolvers are provided:
//!
//! * [`TableResolver`]: an explicit name-to-factory table populated by the
//!   embedding application.
//! * [`RegistryResolver`]: link-time discovery. Handlers submit a
//!   [`HandlerRegistration`] with `inventory::submit!` and are collected
//!   automatically from every linked crate.
//!
//! Both produce a fresh handler per resolution; instances are never cached.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{HookError, Result},
    listener::HookHandler,
};

/// Factory capability producing handler instances from type identifiers.
pub trait ListenerResolver: Send + Sync {
    /// Produce a handler for `type_identifier`.
    ///
    /// Called once per dispatch that reaches a deferred listener; the
    /// dispatcher never caches the result.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::UnresolvedListener`] when no handler is known
    /// for the identifier.
    fn resolve(&self, type_identifier: &str) -> Result<Arc<dyn HookHandler>>;
}

type HandlerFactory = Box<dyn Fn() -> Arc<dyn HookHandler> + Send + Sync>;

/// Explicit name-to-factory resolver.
///
/// # Examples
///
/// ```ignore
/// let mut resolver = TableResolver::new();
/// resolver.register("handlers::Audit", || Arc::new(AuditHandler::new()));
///
/// let dispatcher = HookDispatcher::new(Arc::new(resolver));
/// ```
#[derive(Default)]
pub struct TableResolver {
    factories: HashMap<String, HandlerFactory>,
}

impl TableResolver {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under a type identifier.
    ///
    /// The factory runs on every resolution, so each deferred invocation
    /// gets a fresh handler instance. Registering an identifier twice
    /// replaces the earlier factory.
    pub fn register<F>(&mut self, type_identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn HookHandler> + Send + Sync + 'static,
    {
        self.factories
            .insert(type_identifier.into(), Box::new(factory));
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the table holds no factories.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl ListenerResolver for TableResolver {
    fn resolve(&self, type_identifier: &str) -> Result<Arc<dyn HookHandler>> {
        match self.factories.get(type_identifier) {
            Some(factory) => Ok(factory()),
            None => Err(HookError::UnresolvedListener(type_identifier.to_string())),
        }
    }
}

/// Link-time handler registration collected by [`RegistryResolver`].
///
/// Submit one per handler type:
///
/// ```ignore
/// fn make_audit_handler() -> Arc<dyn HookHandler> {
///     Arc::new(AuditHandler::new())
/// }
///
/// inventory::submit! {
///     HandlerRegistration::new("handlers::Audit", make_audit_handler)
/// }
/// ```
pub struct HandlerRegistration {
    /// Type identifier the handler answers to.
    pub type_identifier: &'static str,
    /// Factory producing one fresh handler per resolution.
    pub factory_fn: fn() -> Arc<dyn HookHandler>,
}

impl HandlerRegistration {
    /// Registration entry for `type_identifier`.
    pub const fn new(
        type_identifier: &'static str,
        factory_fn: fn() -> Arc<dyn HookHandler>,
    ) -> Self {
        Self {
            type_identifier,
            factory_fn,
        }
    }
}

inventory::collect!(HandlerRegistration);

/// Resolver backed by handlers discovered at link time.
///
/// Collects every [`HandlerRegistration`] submitted across the linked
/// crates. Resolution scans the submissions in link order, so identifiers
/// should be unique; with duplicates the first one found wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryResolver;

impl RegistryResolver {
    /// Resolver over the link-time submissions.
    pub fn new() -> Self {
        Self
    }

    /// Type identifiers of every handler discovered at link time.
    pub fn discovered() -> Vec<&'static str> {
        inventory::iter::<HandlerRegistration>()
            .map(|registration| registration.type_identifier)
            .collect()
    }
}

impl ListenerResolver for RegistryResolver {
    fn resolve(&self, type_identifier: &str) -> Result<Arc<dyn HookHandler>> {
        inventory::iter::<HandlerRegistration>()
            .find(|registration| registration.type_identifier == type_identifier)
            .map(|registration| (registration.factory_fn)())
            .ok_or_else(|| HookError::UnresolvedListener(type_identifier.to_string()))
    }
}
