//! Courier client middleware
//!
//! Decorator clients and the machinery to compose them around a terminal
//! transport: the chain builder, the log and trace-id decorators, an
//! in-process loopback terminal, and the guarded process-wide default
//! client.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use courier_client::{ClientBuilder, LogClient, LoopbackClient, TraceClient};
//! use courier_core::{CallContext, Client, Request};
//!
//! let transport: Arc<dyn Client> = Arc::new(LoopbackClient::echo());
//!
//! // Log is added last, so it is outermost and records the metadata
//! // before the trace decorator has attached a trace id.
//! let client = ClientBuilder::new(transport)
//!     .wrap(TraceClient::wrap)
//!     .wrap(LogClient::wrap)
//!     .build();
//!
//! let ctx = CallContext::background().with_metadata([("X-User-Id", "john")]);
//! let req = Request::new("greeter", "Greeter.Hello", b"hi".to_vec()).unwrap();
//! let rsp = client.call(&ctx, &req).unwrap();
//! assert_eq!(rsp.payload(), b"hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod default;
pub mod logging;
pub mod loopback;
pub mod trace;

pub use builder::ClientBuilder;
pub use logging::LogClient;
pub use loopback::LoopbackClient;
pub use trace::{TraceClient, TRACE_ID_KEY};
