//! Log decorator - records one line per call before forwarding

use courier_core::{CallContext, CallError, Client, Metadata, Request, Response};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A decorator that emits one human-readable record per call.
///
/// The record carries the merged metadata snapshot, the service name, and
/// the method name, and is written *before* forwarding so it reflects
/// pre-call state. Exactly one line is emitted per invocation; the call's
/// outcome is never altered by logging - a sink failure is reported via
/// `tracing::warn!` and the call proceeds.
pub struct LogClient {
    inner: Arc<dyn Client>,
    sink: Arc<Mutex<dyn Write + Send>>,
}

impl LogClient {
    /// Wrap `inner`, logging to standard output.
    pub fn new(inner: Arc<dyn Client>) -> Self {
        Self::with_sink(inner, Arc::new(Mutex::new(io::stdout())))
    }

    /// Wrap `inner`, logging to the given sink.
    ///
    /// Mainly for tests, which capture the sink in a buffer and assert on
    /// the recorded line.
    pub fn with_sink(inner: Arc<dyn Client>, sink: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { inner, sink }
    }

    /// Decorator constructor for [`ClientBuilder::wrap`](crate::ClientBuilder::wrap).
    pub fn wrap(inner: Arc<dyn Client>) -> Arc<dyn Client> {
        Arc::new(Self::new(inner))
    }
}

fn format_metadata(metadata: Option<Metadata>) -> String {
    let Some(md) = metadata else {
        return "{}".to_string();
    };
    let pairs: Vec<String> = md.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{{{}}}", pairs.join(", "))
}

impl Client for LogClient {
    fn call(&self, ctx: &CallContext, req: &Request) -> Result<Response, CallError> {
        let line = format!(
            "[log] metadata: {} service: {} method: {}",
            format_metadata(ctx.metadata()),
            req.service(),
            req.method()
        );
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(sink, "{}", line) {
            tracing::warn!("log sink write failed: {}", e);
        }
        drop(sink);

        self.inner.call(ctx, req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackClient;

    fn captured() -> (Arc<Mutex<Vec<u8>>>, Arc<Mutex<dyn Write + Send>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink: Arc<Mutex<dyn Write + Send>> = buf.clone();
        (buf, sink)
    }

    #[test]
    fn test_one_line_per_call_before_forwarding() {
        let (buf, sink) = captured();
        let client = LogClient::with_sink(Arc::new(LoopbackClient::echo()), sink);

        let ctx = CallContext::background().with_metadata([("X-User-Id", "john")]);
        let req = Request::new("greeter", "Greeter.Hello", Vec::new()).unwrap();
        client.call(&ctx, &req).unwrap();

        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert_eq!(
            output.trim_end(),
            "[log] metadata: {X-User-Id=john} service: greeter method: Greeter.Hello"
        );
    }

    #[test]
    fn test_metadata_rendered_in_key_order() {
        let (buf, sink) = captured();
        let client = LogClient::with_sink(Arc::new(LoopbackClient::echo()), sink);

        let ctx = CallContext::background()
            .with_metadata([("X-User-Id", "john"), ("X-From-Id", "script")]);
        let req = Request::new("svc", "M", Vec::new()).unwrap();
        client.call(&ctx, &req).unwrap();

        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(output.contains("{X-From-Id=script, X-User-Id=john}"), "{output}");
    }

    #[test]
    fn test_no_metadata_renders_empty_braces() {
        let (buf, sink) = captured();
        let client = LogClient::with_sink(Arc::new(LoopbackClient::echo()), sink);

        let req = Request::new("svc", "M", Vec::new()).unwrap();
        client.call(&CallContext::background(), &req).unwrap();

        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(output.starts_with("[log] metadata: {} "), "{output}");
    }

    #[test]
    fn test_logs_even_when_inner_fails() {
        let (buf, sink) = captured();
        let failing = Arc::new(LoopbackClient::failing(CallError::Transport(
            "down".to_string(),
        )));
        let client = LogClient::with_sink(failing, sink);

        let req = Request::new("svc", "M", Vec::new()).unwrap();
        let err = client.call(&CallContext::background(), &req).unwrap_err();

        // Error passes through unchanged; the line was emitted before the
        // forward and is still present.
        assert_eq!(err, CallError::Transport("down".to_string()));
        let output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
