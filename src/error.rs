//! Error types for hook collections and hook dispatch
//!
//! All fallible operations in this crate return [`Result`], an alias for
//! `std::result::Result<T, HookError>`. Errors are raised at the point of
//! misuse and propagate unchanged to the immediate caller; the crate performs
//! no retries and no silent recovery.
//!
//! # Error Handling Patterns
//!
//! ```ignore
//! match collection.find_or_fail("deploy.finished") {
//!     Ok(hook) => println!("found {}", hook.name()),
//!     Err(HookError::HookNotFound(name)) => eprintln!("nothing stored under {}", name),
//!     Err(other) => return Err(other),
//! }
//! ```

use thiserror::Error;

/// Errors raised by hook collections and the hook dispatcher.
#[derive(Debug, Error)]
pub enum HookError {
    /// No stored hook matched the queried name or type identity.
    ///
    /// Raised by the failing lookup variant (`find_or_fail`). Lenient lookups
    /// (`find`, `get`, `search`, `pull`) signal absence with `None` instead
    /// of this error. The string carries the queried name.
    #[error("No hook found matched with name '{0}'")]
    HookNotFound(String),

    /// A value offered to a hook collection does not satisfy the hook
    /// contract.
    ///
    /// Raised on construction, `push`, `add` and `prepend`. The offending
    /// value is never coerced and never retained; the collection is exactly
    /// as it was before the call.
    #[error("Invalid hook: {0}")]
    InvalidHook(String),

    /// A listener offered to the dispatcher is malformed.
    ///
    /// With the accepted listener forms closed over an enum, the only
    /// malformed shape left is a deferred listener with a blank type
    /// identifier. Nothing is registered when this error is returned.
    #[error("Invalid hook listener: {0}")]
    InvalidListener(String),

    /// No handler could be produced for a deferred listener's type
    /// identifier at dispatch time.
    ///
    /// Deferred listeners resolve on every invocation, so this surfaces
    /// mid-dispatch: the failing listener and everything after it do not
    /// run, while payload changes applied by earlier listeners remain
    /// visible on the event. The string carries the identifier.
    #[error("No handler could be resolved for type identifier '{0}'")]
    UnresolvedListener(String),

    /// The requested bulk operation is disabled for hook collections.
    ///
    /// Aggregate, statistical and restructuring operations would have to
    /// coerce heterogeneous event objects, so each is present as an
    /// always-failing method rather than omitted. The string carries the
    /// operation name.
    #[error("Operation '{0}' is not supported for a hook collection")]
    UnsupportedOperation(&'static str),
}

/// Result type for hook operations.
pub type Result<T> = std::result::Result<T, HookError>;
