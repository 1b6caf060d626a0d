//! Direct TLS-fingerprint transport backend for Mimic.
//!
//! [`HttpClient`] implements the dispatch contract over an opaque
//! [`TlsTransport`] capability, with a configurable retry/backoff engine.
//! [`ProxyClient`] is a thin specialization that pins a single proxy
//! address and supplies a default timeout.

pub mod client;
pub mod proxy;
pub mod resolver;
pub mod retry;
pub mod transport;

pub use client::{ClientConfig, HttpClient};
pub use proxy::{ProxyClient, DEFAULT_PROXY_TIMEOUT_SECS};
pub use resolver::{FixedProxy, NoProxy, ProxyResolver};
pub use retry::{default_retryable, RetryPolicy};
pub use transport::{TlsTransport, TransportError, TransportOptions, TransportResponse};
