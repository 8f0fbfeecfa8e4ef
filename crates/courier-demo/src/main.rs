//! Courier demo - a decorated client chain around a loopback transport.
//!
//! Issues two sequential calls against an in-process greeter terminal:
//! the first through a default client re-wrapped with the log decorator,
//! the second through a freshly built trace-around-log chain installed as
//! the new default. Call errors are printed and the program carries on,
//! but the process exits non-zero if any call failed.

use courier_client::{default, ClientBuilder, LogClient, LoopbackClient, TraceClient};
use courier_core::{CallContext, CallError, Client, Request, Response};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let transport: Arc<dyn Client> = Arc::new(LoopbackClient::new(greeter));

    // Wrap the default client
    default::set_default(Arc::clone(&transport));
    default::wrap_default(LogClient::wrap)?;

    let first = call(0);

    // Rebuild the default as a trace-around-log chain: trace added last,
    // so it is outermost and the record for call #2 carries the freshly
    // attached trace id
    let chain = ClientBuilder::new(transport)
        .wrap(LogClient::wrap)
        .wrap(TraceClient::wrap)
        .build();
    default::set_default(chain);

    let second = call(1);

    if !first || !second {
        anyhow::bail!("one or more calls failed");
    }
    Ok(())
}

/// The in-process stand-in for a remote greeter service.
fn greeter(req: &Request) -> Result<Response, CallError> {
    let value: serde_json::Value = serde_json::from_slice(req.payload())
        .map_err(|e| CallError::Remote(format!("malformed payload: {}", e)))?;
    let name = value
        .get("name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("stranger");

    let body = serde_json::json!({ "msg": format!("Hello, {}!", name) });
    let payload = serde_json::to_vec(&body)
        .map_err(|e| CallError::Remote(format!("encoding response: {}", e)))?;
    Ok(Response::new(payload))
}

/// Issue one greeter call through the current default client.
///
/// Prints the outcome and reports success; an error is printed but does
/// not abort the sequence.
fn call(i: usize) -> bool {
    let payload = serde_json::json!({ "name": "John", "call": i });
    let req = match Request::new(
        "greeter",
        "Greeter.Hello",
        payload.to_string().into_bytes(),
    ) {
        Ok(req) => req,
        Err(e) => {
            eprintln!("call {} error: {}", i, e);
            return false;
        }
    };

    let ctx = CallContext::background()
        .with_metadata([("X-User-Id", "john"), ("X-From-Id", "script")]);

    match default::call(&ctx, &req) {
        Ok(rsp) => {
            let body = String::from_utf8_lossy(rsp.payload()).into_owned();
            println!("call {} response: {}", i, body);
            true
        }
        Err(e) => {
            eprintln!("call {} error: {}", i, e);
            false
        }
    }
}
