//! Remote-invocation backend.

use crate::invoker::Invoker;
use async_trait::async_trait;
use mimic_dispatch::{headers, Dispatch, DispatchError, RequestConfig, RequestResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Intermediate wire form returned by the remote function.
///
/// The body is a string that may hold either plain text or hex-encoded
/// binary; which one is decided by the request's `accept` header.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemotePayload {
    status_code: u16,
    #[serde(default)]
    body: String,
    #[serde(default)]
    headers: HashMap<String, String>,
}

/// Dispatch backend that executes requests through a named remote function.
///
/// The descriptor travels as a JSON payload; the remote side performs the
/// actual exchange and returns a [`RemotePayload`]. No retries at this
/// layer.
pub struct RemoteClient<I> {
    function: String,
    invoker: I,
}

impl<I: Invoker> RemoteClient<I> {
    /// Create a backend calling `function` through `invoker`.
    pub fn new(function: impl Into<String>, invoker: I) -> Self {
        Self {
            function: function.into(),
            invoker,
        }
    }

    /// The remote function identifier this backend invokes.
    pub fn function(&self) -> &str {
        &self.function
    }
}

/// Decode the wire body according to the request's accept header.
///
/// Hex decoding is attempted only for `accept: application/x-protobuf`;
/// a failed decode silently degrades to the literal text bytes.
fn decode_body(request: &RequestConfig, body: String) -> Vec<u8> {
    let wants_binary =
        request.headers.get(headers::ACCEPT).map(String::as_str)
            == Some(headers::CONTENT_TYPE_PROTOBUF);

    if wants_binary {
        match hex::decode(&body) {
            Ok(bytes) => return bytes,
            Err(e) => {
                tracing::debug!("response body is not valid hex ({}), keeping text", e);
            }
        }
    }
    body.into_bytes()
}

#[async_trait]
impl<I: Invoker> Dispatch for RemoteClient<I> {
    async fn dispatch(&self, request: &RequestConfig) -> Result<RequestResponse, DispatchError> {
        let payload = serde_json::to_vec(request).map_err(DispatchError::Encode)?;

        tracing::debug!(
            "invoking {} for {} {}",
            self.function,
            request.method,
            request.url
        );
        let result = self
            .invoker
            .invoke(&self.function, payload)
            .await
            .map_err(|e| DispatchError::Invoke(Box::new(e)))?;

        let remote: RemotePayload =
            serde_json::from_slice(&result).map_err(DispatchError::Decode)?;

        Ok(RequestResponse {
            status_code: remote.status_code,
            body: decode_body(request, remote.body),
            headers: remote.headers,
        })
    }
}
