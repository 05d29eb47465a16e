//! Synchronous, in-process hook dispatch
//!
//! Hookwire is a named-event dispatch mechanism: producers emit hook events
//! carrying a mutable payload, consumers register listeners against an
//! event's logical name, and listeners run in registration order until the
//! chain ends or one of them stops propagation. The payload state the
//! listeners leave behind is handed back to the dispatching caller.
//!
//! # Architecture
//!
//! 1. **Hook events** ([`hook`]): the [`Hook`] capability contract and the
//!    stock [`NamedHook`] event type.
//! 2. **Hook collection** ([`collection`]): an ordered container addressing
//!    events by position, logical name and type identity.
//! 3. **Listeners** ([`listener`]): the three accepted listener forms behind
//!    the closed [`Listener`] enum.
//! 4. **Resolvers** ([`resolver`]): the factory capability turning type
//!    identifiers into handler instances for deferred listeners.
//! 5. **Dispatcher** ([`dispatcher`]): the listener registry and the
//!    dispatch loop.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use hookwire::{Dispatcher, HookDispatcher, Listener, NamedHook, TableResolver};
//!
//! let mut dispatcher = HookDispatcher::new(Arc::new(TableResolver::new()));
//!
//! // A closure listener mutating the payload.
//! dispatcher.listen("file_saved", Listener::from_fn(|event, _context, _extra| {
//!     let mut payload = event.payload();
//!     payload["formatted"] = serde_json::json!(true);
//!     event.set_payload(payload);
//!     None
//! }))?;
//!
//! let event = NamedHook::named("file_saved", serde_json::json!({"path": "src/main.rs"}));
//! let payload = dispatcher.dispatch(&event, None, &[])?;
//! assert_eq!(payload["formatted"], serde_json::json!(true));
//! # Ok::<(), hookwire::HookError>(())
//! ```
//!
//! # Propagation
//!
//! A listener returning `Some(false)` stops the chain; `Some(true)` and
//! `None` both let it continue. The dispatcher re-reads the event's payload
//! after every listener call, so changes published through `set_payload` are
//! always reflected in the value a dispatch returns.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`], an alias for
//! `std::result::Result<T, HookError>`. Errors are raised at the point of
//! misuse and propagate to the immediate caller; there are no retries.
//!
//! # Thread Safety
//!
//! Dispatch is synchronous and single-threaded by design. All types are
//! `Send + Sync`, so a concurrent embedding can add its own synchronization
//! around registration and dispatch without changing the semantics.

pub mod collection;
pub mod dispatcher;
pub mod error;
pub mod hook;
pub mod listener;
pub mod resolver;

pub use collection::{HookCollection, HookKey};
pub use dispatcher::{Dispatcher, HookDispatcher};
pub use error::{HookError, Result};
pub use hook::{Hook, NamedHook, PayloadCell};
pub use listener::{HookHandler, Listener, ListenerFn};
pub use resolver::{HandlerRegistration, ListenerResolver, RegistryResolver, TableResolver};
