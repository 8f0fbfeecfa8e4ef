//! The shared "callable client" capability

use crate::context::CallContext;
use crate::error::CallError;
use crate::request::{Request, Response};

/// The one capability every layer of a client chain implements.
///
/// Two kinds of implementation exist:
///
/// - *Terminal clients* perform the actual call (a network transport, or an
///   in-process loopback in tests).
/// - *Decorator clients* hold exactly one inner `Client` and forward every
///   call to it, adding behavior around the forward. Decorators compose: a
///   decorator can wrap another decorator, forming a finite linear chain
///   that ends at exactly one terminal.
///
/// ## Contract for decorators
///
/// - Forward to the inner client exactly once per invocation. No silent
///   suppression, no duplicate sends.
/// - The incoming context may be inspected, or replaced by a context
///   *derived* from it before forwarding. The request is read-only.
/// - The inner result - success or error - is returned unchanged, unless
///   the decorator documents itself as result-transforming.
/// - `call` blocks the caller until the terminal completes, fails, or the
///   context's deadline/cancellation fires. Decorators themselves do no
///   blocking work.
///
/// Implementations hold no per-call mutable state, so one client value may
/// serve concurrent calls from multiple threads.
pub trait Client: Send + Sync {
    /// Issue one invocation described by `req` under `ctx`.
    ///
    /// # Errors
    ///
    /// Whatever the terminal client signals: [`CallError::Transport`],
    /// [`CallError::Remote`], or [`CallError::Cancelled`] /
    /// [`CallError::DeadlineExceeded`] when the context fired first.
    fn call(&self, ctx: &CallContext, req: &Request) -> Result<Response, CallError>;
}
