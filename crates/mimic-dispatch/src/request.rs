//! Request descriptor and HTTP method types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Header names with special meaning to the backends.
pub mod headers {
    /// Promoted to a dedicated transport field by the direct backend.
    pub const USER_AGENT: &str = "User-Agent";
    /// Gates hex-decoding of remote-invocation response bodies.
    pub const ACCEPT: &str = "accept";
    /// The accept value that marks a response body as hex-encoded binary.
    pub const CONTENT_TYPE_PROTOBUF: &str = "application/x-protobuf";
}

/// HTTP verbs supported by the dispatch contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

impl Method {
    /// The wire representation of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend-agnostic outbound request descriptor.
///
/// Immutable once handed to [`Dispatch::dispatch`](crate::Dispatch::dispatch);
/// backends operate on derived copies. Serializes to the camelCase wire form
/// consumed by remote-invocation functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    /// HTTP verb.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Query parameters; these replace any query string already on `url`.
    #[serde(default)]
    pub query_params: HashMap<String, String>,
    /// Request body bytes, base64 on the wire.
    #[serde(default, with = "base64_bytes")]
    pub payload: Vec<u8>,
    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Timeout in seconds; zero means "use the backend default".
    #[serde(default)]
    pub timeout: u64,
    /// TLS fingerprint profile; empty means no forced fingerprint.
    #[serde(rename = "ja3", default)]
    pub ja3: String,
    /// When set, the backend must not follow redirects.
    #[serde(default)]
    pub skip_redirects: bool,
    /// Hint to the remote side that it should hex-encode a binary body.
    #[serde(default)]
    pub hex_encoded_response: bool,
}

impl RequestConfig {
    /// Create a descriptor for `method` and `url` with everything else unset.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query_params: HashMap::new(),
            payload: Vec::new(),
            headers: HashMap::new(),
            timeout: 0,
            ja3: String::new(),
            skip_redirects: false,
            hex_encoded_response: false,
        }
    }

    /// Add a query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Force a TLS fingerprint profile.
    pub fn ja3(mut self, fingerprint: impl Into<String>) -> Self {
        self.ja3 = fingerprint.into();
        self
    }

    /// Disable redirect following.
    pub fn skip_redirects(mut self, skip: bool) -> Self {
        self.skip_redirects = skip;
        self
    }

    /// Mark the expected response body as hex-encoded binary.
    pub fn hex_encoded_response(mut self, hex_encoded: bool) -> Self {
        self.hex_encoded_response = hex_encoded;
        self
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
