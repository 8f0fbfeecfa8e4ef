//! In-process terminal client

use courier_core::{CallContext, CallError, Client, Request, Response};

type Handler = dyn Fn(&Request) -> Result<Response, CallError> + Send + Sync;

/// A terminal client that answers in-process instead of over a network.
///
/// Every chain ends at exactly one terminal; in production that is a real
/// transport implementing [`Client`], in demos and tests it is a loopback
/// with a caller-supplied handler. Like any terminal, the loopback checks
/// the context before doing work and aborts with [`CallError::Cancelled`]
/// or [`CallError::DeadlineExceeded`] when the context has fired.
pub struct LoopbackClient {
    handler: Box<Handler>,
}

impl LoopbackClient {
    /// A terminal answering each request through `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> Result<Response, CallError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// A terminal that mirrors the request payload back as the response.
    pub fn echo() -> Self {
        Self::new(|req| Ok(Response::new(req.payload().to_vec())))
    }

    /// A terminal that fails every call with a clone of `err`.
    pub fn failing(err: CallError) -> Self {
        Self::new(move |_| Err(err.clone()))
    }
}

impl Client for LoopbackClient {
    fn call(&self, ctx: &CallContext, req: &Request) -> Result<Response, CallError> {
        ctx.check()?;
        (self.handler)(req)
    }
}
