//! Courier Core Layer
//!
//! This crate contains the domain model for the Courier client middleware
//! chain: the call context, the request/response value types, and the
//! `Client` trait that both terminal transports and decorators implement.
//! Decorator implementations and the chain builder live in `courier-client`.
//!
//! ## Key Concepts
//!
//! - **Call Context**: an immutable, derivable carrier of cancellation,
//!   deadline, and string metadata, scoped to one logical call tree
//! - **Request**: an immutable {service, method, payload} descriptor
//! - **Client**: the single shared capability - `call(context, request)`
//! - **Decorator**: a client that wraps exactly one inner client and
//!   forwards every call to it, adding behavior around the forward
//!
//! ## Architecture
//!
//! This crate defines the trait boundary only:
//! - Pure value types and one trait
//! - No I/O, no transport, no global state
//! - Infrastructure (decorators, terminals, the default client) lives in
//!   other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod context;
pub mod error;
pub mod request;

// Re-exports for convenience
pub use client::Client;
pub use context::{CallContext, CancelHandle, Metadata};
pub use error::CallError;
pub use request::{Request, Response};
