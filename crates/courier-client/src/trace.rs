//! Trace-id decorator - stamps each call with a fresh trace identifier

use courier_core::{CallContext, CallError, Client, Request, Response};
use std::sync::Arc;

/// Metadata key under which the trace identifier travels.
pub const TRACE_ID_KEY: &str = "X-Trace-Id";

/// A decorator that attaches a fresh trace id to every call.
///
/// Per invocation it derives a child context carrying
/// [`TRACE_ID_KEY`] merged on top of the incoming metadata (existing keys
/// stay visible, an existing trace id is shadowed, never erased) and
/// forwards with the derived context. The caller's own context value is
/// never modified.
///
/// Trace ids are UUIDv7 strings: time-ordered like a timestamp, so
/// correlated calls still sort chronologically, but unique even for calls
/// issued within the same second.
pub struct TraceClient {
    inner: Arc<dyn Client>,
}

impl TraceClient {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn Client>) -> Self {
        Self { inner }
    }

    /// Decorator constructor for [`ClientBuilder::wrap`](crate::ClientBuilder::wrap).
    pub fn wrap(inner: Arc<dyn Client>) -> Arc<dyn Client> {
        Arc::new(Self::new(inner))
    }
}

impl Client for TraceClient {
    fn call(&self, ctx: &CallContext, req: &Request) -> Result<Response, CallError> {
        let ctx = ctx.with_metadata([(TRACE_ID_KEY, uuid::Uuid::now_v7().to_string())]);
        self.inner.call(&ctx, req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackClient;
    use courier_core::Metadata;
    use std::sync::Mutex;

    // Terminal that snapshots the metadata it was called with.
    struct Recorder {
        seen: Arc<Mutex<Option<Metadata>>>,
    }

    impl Client for Recorder {
        fn call(&self, ctx: &CallContext, _req: &Request) -> Result<Response, CallError> {
            *self.seen.lock().unwrap() = ctx.metadata();
            Ok(Response::default())
        }
    }

    #[test]
    fn test_trace_id_attached_and_metadata_preserved() {
        let seen = Arc::new(Mutex::new(None));
        let client = TraceClient::new(Arc::new(Recorder {
            seen: Arc::clone(&seen),
        }));

        let ctx = CallContext::background().with_metadata([("X-User-Id", "john")]);
        let req = Request::new("svc", "M", Vec::new()).unwrap();
        client.call(&ctx, &req).unwrap();

        let md = seen.lock().unwrap().clone().unwrap();
        assert!(md.contains_key(TRACE_ID_KEY));
        assert_eq!(md.get("X-User-Id").map(String::as_str), Some("john"));

        // The caller's context value is untouched
        assert!(!ctx.metadata().unwrap().contains_key(TRACE_ID_KEY));
    }

    #[test]
    fn test_trace_ids_are_unique_per_call() {
        let seen = Arc::new(Mutex::new(None));
        let client = TraceClient::new(Arc::new(Recorder {
            seen: Arc::clone(&seen),
        }));
        let req = Request::new("svc", "M", Vec::new()).unwrap();

        client.call(&CallContext::background(), &req).unwrap();
        let first = seen.lock().unwrap().clone().unwrap()[TRACE_ID_KEY].clone();

        client.call(&CallContext::background(), &req).unwrap();
        let second = seen.lock().unwrap().clone().unwrap()[TRACE_ID_KEY].clone();

        // Two calls in the same second must still get distinct ids
        assert_ne!(first, second);
    }

    #[test]
    fn test_existing_trace_id_is_shadowed() {
        let seen = Arc::new(Mutex::new(None));
        let client = TraceClient::new(Arc::new(Recorder {
            seen: Arc::clone(&seen),
        }));

        let ctx = CallContext::background().with_metadata([(TRACE_ID_KEY, "stale")]);
        let req = Request::new("svc", "M", Vec::new()).unwrap();
        client.call(&ctx, &req).unwrap();

        let md = seen.lock().unwrap().clone().unwrap();
        assert_ne!(md.get(TRACE_ID_KEY).map(String::as_str), Some("stale"));
    }

    #[test]
    fn test_error_passes_through_unchanged() {
        let client = TraceClient::new(Arc::new(LoopbackClient::failing(CallError::Remote(
            "boom".to_string(),
        ))));
        let req = Request::new("svc", "M", Vec::new()).unwrap();

        let err = client.call(&CallContext::background(), &req).unwrap_err();
        assert_eq!(err, CallError::Remote("boom".to_string()));
    }
}
