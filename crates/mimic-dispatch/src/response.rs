//! Response model shared by all backends.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A backend-agnostic HTTP response.
///
/// The body is already decoded from any backend-specific encoding; headers
/// are flattened to a string map with last-value-wins on duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Decoded response body bytes.
    #[serde(default)]
    pub body: Vec<u8>,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl RequestResponse {
    /// True for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The body interpreted as UTF-8, lossily.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let mut response = RequestResponse {
            status_code: 200,
            body: Vec::new(),
            headers: HashMap::new(),
        };
        assert!(response.is_success());

        response.status_code = 299;
        assert!(response.is_success());

        response.status_code = 301;
        assert!(!response.is_success());

        response.status_code = 500;
        assert!(!response.is_success());
    }

    #[test]
    fn test_body_text() {
        let response = RequestResponse {
            status_code: 200,
            body: b"hello".to_vec(),
            headers: HashMap::new(),
        };
        assert_eq!(response.body_text(), "hello");
    }
}
