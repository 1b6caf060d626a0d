//! Remote-invocation dispatch backend for Mimic.
//!
//! [`RemoteClient`] serializes the request descriptor to a JSON payload,
//! hands it to an opaque [`Invoker`] capability by function name, and
//! decodes the returned payload into a response. Binary bodies travel
//! hex-encoded and are decoded when the request's `accept` header asks
//! for `application/x-protobuf`.

pub mod invoker;
pub mod remote;

pub use invoker::{InvokeError, Invoker};
pub use remote::RemoteClient;
