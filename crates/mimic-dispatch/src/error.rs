//! Error taxonomy for dispatch backends.

/// Errors surfaced by [`Dispatch::dispatch`](crate::Dispatch::dispatch).
///
/// Each failure class gets its own variant; none are swallowed internally.
/// Transport failures are surfaced only after the backend's retry policy is
/// exhausted.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request URL failed to parse. Never retried.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport failed after retries were exhausted.
    #[error("transport request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The descriptor could not be encoded for remote invocation.
    #[error("failed to encode invocation payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The remote-invocation capability reported a failure.
    #[error("remote invocation failed: {0}")]
    Invoke(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote result could not be decoded into a response.
    #[error("failed to decode invocation result: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let err = url::Url::parse("not a url").unwrap_err();
        let dispatch_err = DispatchError::from(err);
        assert!(format!("{}", dispatch_err).contains("invalid request URL"));
    }

    #[test]
    fn test_decode_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let dispatch_err = DispatchError::Decode(json_err);
        assert!(format!("{}", dispatch_err).contains("failed to decode"));
    }
}
