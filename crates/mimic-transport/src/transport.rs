//! The opaque TLS transport capability.

use async_trait::async_trait;
use mimic_dispatch::Method;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-exchange options handed to the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportOptions {
    /// Request body bytes.
    pub body: Vec<u8>,
    /// TLS fingerprint profile to emulate; empty means transport default.
    pub ja3: String,
    /// Merged request headers.
    pub headers: HashMap<String, String>,
    /// Timeout in seconds; zero means transport default.
    pub timeout: u64,
    /// Do not follow redirects.
    pub disable_redirect: bool,
    /// Proxy address for this exchange, if resolved.
    pub proxy: Option<String>,
    /// User-Agent override promoted from the headers.
    pub user_agent: Option<String>,
}

/// The wire response as returned by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Flat header map, last value wins on duplicates.
    pub headers: HashMap<String, String>,
}

/// Failures reported by the transport.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Could not establish a connection.
    #[error("connection failed: {0}")]
    Connect(String),

    /// TLS negotiation failed.
    #[error("TLS negotiation failed: {0}")]
    Tls(String),

    /// The exchange exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// Any other transport-level failure.
    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// True when the failure is a network-level timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }
}

/// An opaque transport capable of emulating TLS client fingerprints.
///
/// The actual fingerprint emulation lives behind this trait; the backend
/// treats it as a black box. Implementations must be safe for concurrent
/// use if the owning client is shared across tasks.
#[async_trait]
pub trait TlsTransport: Send + Sync {
    /// Perform one HTTP exchange.
    async fn execute(
        &self,
        url: &str,
        options: &TransportOptions,
        method: Method,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: TlsTransport + ?Sized> TlsTransport for Arc<T> {
    async fn execute(
        &self,
        url: &str,
        options: &TransportOptions,
        method: Method,
    ) -> Result<TransportResponse, TransportError> {
        (**self).execute(url, options, method).await
    }
}
