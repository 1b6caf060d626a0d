//! Proxy resolution capability.

use url::Url;

/// Resolves a proxy address for an outbound request URL.
///
/// Always present on a client; [`NoProxy`] is the default. Returning `None`
/// sends the request directly.
pub trait ProxyResolver: Send + Sync {
    /// Resolve the proxy address to use for `url`, if any.
    fn resolve(&self, url: &Url) -> Option<String>;
}

/// Never proxies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProxy;

impl ProxyResolver for NoProxy {
    fn resolve(&self, _url: &Url) -> Option<String> {
        None
    }
}

/// Always returns one fixed proxy address, ignoring the URL.
#[derive(Debug, Clone)]
pub struct FixedProxy {
    address: String,
}

impl FixedProxy {
    /// Pin `address` as the proxy for every request.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl ProxyResolver for FixedProxy {
    fn resolve(&self, _url: &Url) -> Option<String> {
        Some(self.address.clone())
    }
}

impl<F> ProxyResolver for F
where
    F: Fn(&Url) -> Option<String> + Send + Sync,
{
    fn resolve(&self, url: &Url) -> Option<String> {
        self(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_proxy() {
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(NoProxy.resolve(&url), None);
    }

    #[test]
    fn test_fixed_proxy_ignores_url() {
        let resolver = FixedProxy::new("http://proxy:8080");
        let a = Url::parse("https://a.test").unwrap();
        let b = Url::parse("https://b.test/path").unwrap();
        assert_eq!(resolver.resolve(&a).as_deref(), Some("http://proxy:8080"));
        assert_eq!(resolver.resolve(&b).as_deref(), Some("http://proxy:8080"));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |url: &Url| {
            if url.host_str() == Some("internal.test") {
                None
            } else {
                Some("http://egress:3128".to_string())
            }
        };
        let internal = Url::parse("https://internal.test").unwrap();
        let external = Url::parse("https://example.com").unwrap();
        assert_eq!(resolver.resolve(&internal), None);
        assert_eq!(resolver.resolve(&external).as_deref(), Some("http://egress:3128"));
    }
}
