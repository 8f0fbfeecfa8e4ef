//! The guarded process-wide default client
//!
//! An optional convenience surface: install a client once, then issue calls
//! through [`call`] anywhere in the process without threading the client
//! value around. The reference lives behind an `RwLock`, so replacement
//! (including progressive re-wrapping via [`wrap_default`]) is safe to
//! perform from any thread.
//!
//! Replacement semantics: swapping the default is visible only to calls
//! issued after the swap completes. A caller that captured the previous
//! `Arc` (via [`default_client`]) keeps the behavior it captured - the lock
//! guards the reference, never an in-flight call.

use courier_core::{CallContext, CallError, Client, Request, Response};
use std::sync::{Arc, PoisonError, RwLock};

static DEFAULT_CLIENT: RwLock<Option<Arc<dyn Client>>> = RwLock::new(None);

/// Install `client` as the process-wide default.
pub fn set_default(client: Arc<dyn Client>) {
    let mut slot = DEFAULT_CLIENT
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = Some(client);
}

/// Remove the process-wide default, if any.
pub fn clear_default() {
    let mut slot = DEFAULT_CLIENT
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}

/// The currently installed default client.
///
/// # Errors
///
/// Returns [`CallError::NoDefaultClient`] if none was installed.
pub fn default_client() -> Result<Arc<dyn Client>, CallError> {
    let slot = DEFAULT_CLIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    slot.clone().ok_or(CallError::NoDefaultClient)
}

/// Replace the default client with `wrapper(previous)`.
///
/// The swap happens under the write lock, so concurrent re-wraps from
/// multiple threads serialize instead of losing layers.
///
/// # Errors
///
/// Returns [`CallError::NoDefaultClient`] if no default was installed.
pub fn wrap_default<F>(wrapper: F) -> Result<(), CallError>
where
    F: FnOnce(Arc<dyn Client>) -> Arc<dyn Client>,
{
    let mut slot = DEFAULT_CLIENT
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let previous = slot.take().ok_or(CallError::NoDefaultClient)?;
    *slot = Some(wrapper(previous));
    Ok(())
}

/// Issue one call through the current default client.
///
/// Snapshots the default, releases the lock, then calls through the
/// snapshot - a concurrent replacement never affects a call already in
/// flight.
///
/// # Errors
///
/// [`CallError::NoDefaultClient`] if none is installed, otherwise whatever
/// the chain returns.
pub fn call(ctx: &CallContext, req: &Request) -> Result<Response, CallError> {
    let client = default_client()?;
    client.call(ctx, req)
}
