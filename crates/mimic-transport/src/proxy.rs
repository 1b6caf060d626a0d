//! Proxy-routed dispatch backend.

use crate::client::{ClientConfig, HttpClient};
use crate::resolver::FixedProxy;
use crate::transport::TlsTransport;
use async_trait::async_trait;
use mimic_dispatch::{Dispatch, DispatchError, RequestConfig, RequestResponse};

/// Timeout applied when the descriptor leaves its timeout unset.
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 10;

/// Dispatch backend that routes every request through one fixed proxy.
///
/// A thin specialization of [`HttpClient`] with the proxy address baked in
/// at construction, a 10 second default timeout, and no retries.
pub struct ProxyClient<T> {
    inner: HttpClient<T>,
}

impl<T: TlsTransport> ProxyClient<T> {
    /// Create a backend over `transport` pinned to `proxy`.
    pub fn new(transport: T, proxy: impl Into<String>) -> Self {
        let inner = HttpClient::new(transport, ClientConfig::default())
            .with_proxy_resolver(FixedProxy::new(proxy));
        Self { inner }
    }
}

#[async_trait]
impl<T: TlsTransport> Dispatch for ProxyClient<T> {
    async fn dispatch(&self, request: &RequestConfig) -> Result<RequestResponse, DispatchError> {
        let mut request = request.clone();
        if request.timeout == 0 {
            request.timeout = DEFAULT_PROXY_TIMEOUT_SECS;
        }
        self.inner.dispatch(&request).await
    }
}
