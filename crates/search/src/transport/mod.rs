//! Remote query collaborator.
//!
//! A [`Transport`] knows how to run a [`CountRequest`] against a cluster.
//! It is asynchronous; [`ProxyCountRequest`](crate::ProxyCountRequest) is
//! the only place that blocks on it.

mod http;

pub use http::{HttpTransport, TransportConfig};

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::CountRequest;
use crate::response::CountResponse;

/// Asynchronous count primitive.
///
/// Implementations must be safe to share between threads; a single
/// transport usually backs every request a [`SearchClient`](crate::SearchClient)
/// prepares.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run `request` and return the cluster's answer.
    async fn count(&self, request: &CountRequest) -> Result<CountResponse, TransportError>;
}
