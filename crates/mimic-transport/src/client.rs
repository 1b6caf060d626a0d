//! The direct transport backend.

use crate::resolver::{NoProxy, ProxyResolver};
use crate::retry::RetryPolicy;
use crate::transport::{TlsTransport, TransportError, TransportOptions, TransportResponse};
use async_trait::async_trait;
use mimic_dispatch::{headers, Dispatch, DispatchError, Method, RequestConfig, RequestResponse};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Construction-time configuration for [`HttpClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Instance-wide TLS fingerprint profile; a non-empty per-request
    /// fingerprint takes precedence.
    pub ja3: String,
    /// Headers merged into every request. On key collision these win over
    /// the caller's headers.
    pub additional_headers: HashMap<String, String>,
    /// Retry behavior for transport failures.
    pub retry: RetryPolicy,
}

/// Dispatch backend that sends requests through an opaque TLS transport,
/// optionally via a per-request resolved proxy, with retry/backoff.
///
/// Holds no per-request mutable state; concurrent `dispatch` calls are safe
/// whenever the transport is.
pub struct HttpClient<T> {
    transport: T,
    config: ClientConfig,
    proxy: Arc<dyn ProxyResolver>,
}

impl<T: TlsTransport> HttpClient<T> {
    /// Create a backend over `transport` with `config`.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            proxy: Arc::new(NoProxy),
        }
    }

    /// Install a proxy resolver, consulted once per request with the final URL.
    pub fn with_proxy_resolver<R: ProxyResolver + 'static>(mut self, resolver: R) -> Self {
        self.proxy = Arc::new(resolver);
        self
    }

    /// GET `url` with query parameters and headers.
    pub async fn get(
        &self,
        url: &str,
        query: HashMap<String, String>,
        request_headers: HashMap<String, String>,
    ) -> Result<RequestResponse, DispatchError> {
        let mut request = RequestConfig::new(Method::Get, url);
        request.query_params = query;
        request.headers = request_headers;
        self.dispatch(&request).await
    }

    /// POST `payload` to `url`.
    pub async fn post(
        &self,
        url: &str,
        payload: Vec<u8>,
        query: HashMap<String, String>,
        request_headers: HashMap<String, String>,
    ) -> Result<RequestResponse, DispatchError> {
        self.send_with_payload(Method::Post, url, payload, query, request_headers)
            .await
    }

    /// PUT `payload` to `url`.
    pub async fn put(
        &self,
        url: &str,
        payload: Vec<u8>,
        query: HashMap<String, String>,
        request_headers: HashMap<String, String>,
    ) -> Result<RequestResponse, DispatchError> {
        self.send_with_payload(Method::Put, url, payload, query, request_headers)
            .await
    }

    /// PATCH `payload` to `url`.
    pub async fn patch(
        &self,
        url: &str,
        payload: Vec<u8>,
        query: HashMap<String, String>,
        request_headers: HashMap<String, String>,
    ) -> Result<RequestResponse, DispatchError> {
        self.send_with_payload(Method::Patch, url, payload, query, request_headers)
            .await
    }

    /// DELETE `url` with an optional payload.
    pub async fn delete(
        &self,
        url: &str,
        payload: Vec<u8>,
        query: HashMap<String, String>,
        request_headers: HashMap<String, String>,
    ) -> Result<RequestResponse, DispatchError> {
        self.send_with_payload(Method::Delete, url, payload, query, request_headers)
            .await
    }

    async fn send_with_payload(
        &self,
        method: Method,
        url: &str,
        payload: Vec<u8>,
        query: HashMap<String, String>,
        request_headers: HashMap<String, String>,
    ) -> Result<RequestResponse, DispatchError> {
        let mut request = RequestConfig::new(method, url);
        request.payload = payload;
        request.query_params = query;
        request.headers = request_headers;
        self.dispatch(&request).await
    }

    /// Normalize the descriptor into a final URL and transport options.
    fn prepare(&self, request: &RequestConfig) -> Result<(Url, TransportOptions), DispatchError> {
        // Caller headers first, instance headers second: instance wins.
        let mut merged = request.headers.clone();
        for (key, value) in &self.config.additional_headers {
            merged.insert(key.clone(), value.clone());
        }

        let mut url = Url::parse(&request.url)?;
        if request.query_params.is_empty() {
            url.set_query(None);
        } else {
            // Sorted keys give a deterministic query string, replacing any
            // query already present on the URL.
            let mut params: Vec<_> = request.query_params.iter().collect();
            params.sort_by(|a, b| a.0.cmp(b.0));
            url.query_pairs_mut().clear().extend_pairs(params);
        }

        let ja3 = if request.ja3.is_empty() {
            self.config.ja3.clone()
        } else {
            request.ja3.clone()
        };
        let user_agent = merged.get(headers::USER_AGENT).cloned();
        let proxy = self.proxy.resolve(&url);

        let options = TransportOptions {
            body: request.payload.clone(),
            ja3,
            headers: merged,
            timeout: request.timeout,
            disable_redirect: request.skip_redirects,
            proxy,
            user_agent,
        };
        Ok((url, options))
    }

    async fn execute_with_retry(
        &self,
        url: &str,
        options: &TransportOptions,
        method: Method,
    ) -> Result<TransportResponse, TransportError> {
        let retry = &self.config.retry;
        if retry.max_retries == 0 {
            return self.transport.execute(url, options, method).await;
        }

        let mut attempts = 0u32;
        loop {
            let outcome = self.transport.execute(url, options, method).await;
            if !retry.should_retry(&outcome) {
                return outcome;
            }
            if attempts >= retry.max_retries {
                return outcome;
            }
            attempts += 1;
            let delay = retry.next_delay();
            tracing::warn!(
                "transport attempt {} of {} failed, retrying in {:?}",
                attempts,
                retry.max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<T: TlsTransport> Dispatch for HttpClient<T> {
    async fn dispatch(&self, request: &RequestConfig) -> Result<RequestResponse, DispatchError> {
        let (url, options) = self.prepare(request)?;
        let url = url.to_string();

        tracing::debug!("dispatching {} {}", request.method, url);
        let response = self
            .execute_with_retry(&url, &options, request.method)
            .await
            .map_err(|e| DispatchError::Transport(Box::new(e)))?;
        tracing::debug!("response {} for {}", response.status, url);

        Ok(RequestResponse {
            status_code: response.status,
            body: response.body,
            headers: response.headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverTransport;

    #[async_trait]
    impl TlsTransport for NeverTransport {
        async fn execute(
            &self,
            _url: &str,
            _options: &TransportOptions,
            _method: Method,
        ) -> Result<TransportResponse, TransportError> {
            panic!("transport must not be reached");
        }
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_transport() {
        let client = HttpClient::new(NeverTransport, ClientConfig::default());
        let request = RequestConfig::new(Method::Get, "::not a url::");
        let err = client.dispatch(&request).await.unwrap_err();
        assert!(matches!(err, DispatchError::InvalidUrl(_)));
    }

    #[test]
    fn test_prepare_merges_instance_headers_last() {
        let config = ClientConfig {
            additional_headers: HashMap::from([("X-Trace".to_string(), "a".to_string())]),
            ..Default::default()
        };
        let client = HttpClient::new(NeverTransport, config);

        let request = RequestConfig::new(Method::Get, "https://x.test/p").header("X-Trace", "b");
        let (_, options) = client.prepare(&request).unwrap();
        assert_eq!(options.headers.get("X-Trace").unwrap(), "a");
    }

    #[test]
    fn test_prepare_promotes_user_agent() {
        let client = HttpClient::new(NeverTransport, ClientConfig::default());
        let request =
            RequestConfig::new(Method::Get, "https://x.test/p").header("User-Agent", "mimic/1.0");
        let (_, options) = client.prepare(&request).unwrap();
        assert_eq!(options.user_agent.as_deref(), Some("mimic/1.0"));
        // The header itself still travels with the request.
        assert_eq!(options.headers.get("User-Agent").unwrap(), "mimic/1.0");
    }

    #[test]
    fn test_prepare_request_ja3_wins_over_instance() {
        let config = ClientConfig {
            ja3: "instance-fp".to_string(),
            ..Default::default()
        };
        let client = HttpClient::new(NeverTransport, config);

        let plain = RequestConfig::new(Method::Get, "https://x.test");
        let (_, options) = client.prepare(&plain).unwrap();
        assert_eq!(options.ja3, "instance-fp");

        let forced = RequestConfig::new(Method::Get, "https://x.test").ja3("request-fp");
        let (_, options) = client.prepare(&forced).unwrap();
        assert_eq!(options.ja3, "request-fp");
    }

    #[test]
    fn test_prepare_replaces_query_string() {
        let client = HttpClient::new(NeverTransport, ClientConfig::default());
        let request = RequestConfig::new(Method::Get, "https://x.test/p?old=1")
            .query_param("a", "1")
            .query_param("b", "2");
        let (url, _) = client.prepare(&request).unwrap();
        assert_eq!(url.as_str(), "https://x.test/p?a=1&b=2");
    }

    #[test]
    fn test_prepare_drops_stale_query_when_no_params() {
        let client = HttpClient::new(NeverTransport, ClientConfig::default());
        let request = RequestConfig::new(Method::Get, "https://x.test/p?old=1");
        let (url, _) = client.prepare(&request).unwrap();
        assert_eq!(url.as_str(), "https://x.test/p");
    }

    #[test]
    fn test_prepare_skip_redirects_and_timeout() {
        let client = HttpClient::new(NeverTransport, ClientConfig::default());
        let request = RequestConfig::new(Method::Get, "https://x.test")
            .skip_redirects(true)
            .timeout(7);
        let (_, options) = client.prepare(&request).unwrap();
        assert!(options.disable_redirect);
        assert_eq!(options.timeout, 7);
    }
}
