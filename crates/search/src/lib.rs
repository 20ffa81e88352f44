//! # Sonde Search
//!
//! Synchronous, profiled count requests against a search cluster.
//!
//! A [`SearchClient`] pairs a [`Transport`] (the asynchronous collaborator
//! that actually talks to the cluster) with a runtime to block on and a
//! [`Profiling`](sonde_profiling::Profiling) configuration. Every count goes
//! through a [`ProxyCountRequest`], which:
//!
//! - blocks the calling thread until the transport answers,
//! - times the round-trip with a profiling stopwatch,
//! - wraps transport failures in [`SearchError::Execution`] with a
//!   description of the request,
//! - refuses timeout and asynchronous execution with
//!   [`SearchError::Unsupported`].
//!
//! ```rust,no_run
//! use sonde_profiling::{Profiling, ProfilingLevel};
//! use sonde_search::{SearchClient, TransportConfig};
//!
//! # fn main() -> Result<(), sonde_search::SearchError> {
//! let client = SearchClient::http(
//!     &TransportConfig::default(),
//!     Profiling::with_tracing(ProfilingLevel::Full),
//! )?;
//!
//! let response = client.prepare_count().collections(["logs"]).get()?;
//! println!("{} documents", response.count);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod error;
mod proxy;
mod request;
mod response;
pub mod transport;

pub use client::SearchClient;
pub use error::{SearchError, SearchResult, TransportError};
pub use proxy::{COUNT_OPERATION, ProxyCountRequest};
pub use request::CountRequest;
pub use response::{CountResponse, ShardStats};
pub use transport::{HttpTransport, Transport, TransportConfig};
