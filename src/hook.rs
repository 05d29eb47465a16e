//! The hook capability contract and the stock event type
//!
//! A hook is a named unit of dispatch carrying a mutable payload. The
//! [`Hook`] trait is the capability every event must provide; [`NamedHook`]
//! is the stock implementation covering the common case of an optional
//! logical name over an opaque JSON payload.
//!
//! # Payload semantics
//!
//! Payloads are [`serde_json::Value`]s held in a [`PayloadCell`]. `payload()`
//! hands out an owned snapshot, never a live reference; listeners publish
//! changes by calling `set_payload`, and the dispatcher re-reads the payload
//! after every listener call so the value a dispatch returns reflects the
//! most recent state.

use std::fmt;

use parking_lot::RwLock;
use serde_json::Value;

/// Capability contract for dispatchable events.
///
/// Implementations must guarantee that `name()` never returns an empty
/// string; hook collections reject violating items on insert.
pub trait Hook: Send + Sync {
    /// Stable identifier of the concrete event type.
    ///
    /// Serves as a second lookup key distinct from the logical name:
    /// listeners and collection queries may address an event by either, and
    /// both dispatch chains fire when the two differ.
    fn kind(&self) -> &'static str;

    /// Logical name of the event.
    ///
    /// Defaults to the type identity for events without an explicit name.
    fn name(&self) -> String {
        self.kind().to_string()
    }

    /// Snapshot of the current payload.
    fn payload(&self) -> Value;

    /// Replace the payload.
    fn set_payload(&self, payload: Value);
}

impl fmt::Display for dyn Hook + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Interior-mutable payload slot shared between an event and its listeners.
///
/// Listeners receive a shared borrow of the event during dispatch; the cell
/// is what makes `set_payload(&self)` callable from that position. Embed one
/// in custom event types and delegate the two payload methods to it.
#[derive(Debug, Default)]
pub struct PayloadCell {
    inner: RwLock<Value>,
}

impl PayloadCell {
    /// Cell holding `value`.
    pub fn new(value: Value) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> Value {
        self.inner.read().clone()
    }

    /// Replace the current value.
    pub fn set(&self, value: Value) {
        *self.inner.write() = value;
    }
}

/// Stock event type: an optional explicit logical name over an opaque
/// payload.
///
/// Without an explicit name the event answers to its type identity, exactly
/// like a custom [`Hook`] implementation relying on the `name()` default.
///
/// # Examples
///
/// ```ignore
/// let anonymous = NamedHook::new(json!({"path": "src/main.rs"}));
/// assert_eq!(anonymous.name(), anonymous.kind());
///
/// let named = NamedHook::named("file_saved", json!({"path": "src/main.rs"}));
/// assert_eq!(named.name(), "file_saved");
/// ```
#[derive(Debug, Default)]
pub struct NamedHook {
    name: Option<String>,
    payload: PayloadCell,
}

impl NamedHook {
    /// Event named after its type identity.
    pub fn new(payload: Value) -> Self {
        Self {
            name: None,
            payload: PayloadCell::new(payload),
        }
    }

    /// Event with an explicit logical name.
    pub fn named(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: Some(name.into()),
            payload: PayloadCell::new(payload),
        }
    }
}

impl Hook for NamedHook {
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.kind().to_string())
    }

    fn payload(&self) -> Value {
        self.payload.get()
    }

    fn set_payload(&self, payload: Value) {
        self.payload.set(payload);
    }
}

impl fmt::Display for NamedHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
