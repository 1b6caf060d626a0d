//! The opaque remote-invocation capability.

use async_trait::async_trait;
use std::sync::Arc;

/// Failures reported by the remote-invocation capability.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvokeError {
    /// The named function does not exist or is not callable.
    #[error("function {0:?} not found")]
    FunctionNotFound(String),

    /// The invocation was rejected or failed remotely.
    #[error("invocation failed: {0}")]
    Failed(String),

    /// The capability could not reach the remote service.
    #[error("invocation service unreachable: {0}")]
    Unreachable(String),
}

/// An external function-execution service invoked by name with a payload.
///
/// Session, credential, and region bootstrap belong to the capability's
/// constructor; this trait only models the call itself.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Invoke `function` with `payload`, returning its raw result bytes.
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<Vec<u8>, InvokeError>;
}

#[async_trait]
impl<I: Invoker + ?Sized> Invoker for Arc<I> {
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<Vec<u8>, InvokeError> {
        (**self).invoke(function, payload).await
    }
}
