//! Dispatch contract and request/response models for Mimic backends.
//!
//! This crate defines the uniform request/response contract shared by every
//! Mimic backend: the [`Dispatch`] trait, the [`RequestConfig`] descriptor,
//! the [`RequestResponse`] model, and the [`DispatchError`] taxonomy.

pub mod error;
pub mod request;
pub mod response;

pub use error::DispatchError;
pub use request::{headers, Method, RequestConfig};
pub use response::RequestResponse;

use async_trait::async_trait;

/// The uniform dispatch contract implemented by every backend.
///
/// A backend takes an immutable request descriptor and returns either a
/// fully populated response or a classified error, never both. Retry
/// behavior is a property of the individual backend, not of this contract.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Perform one HTTP-like exchange described by `request`.
    async fn dispatch(&self, request: &RequestConfig) -> Result<RequestResponse, DispatchError>;
}
