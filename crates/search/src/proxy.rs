//! Instrumented, blocking count execution.
//!
//! [`ProxyCountRequest`] owns a [`CountRequest`] and exposes a deliberately
//! narrow surface over it: a blocking [`get`](ProxyCountRequest::get) that is
//! timed and reports failures with a description of the request, and
//! timeout/asynchronous variants that always refuse.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use sonde_profiling::ProfilingLevel;

use crate::client::SearchClient;
use crate::error::{SearchError, SearchResult};
use crate::request::CountRequest;
use crate::response::CountResponse;

/// Operation name used for profiling domains and descriptions.
pub const COUNT_OPERATION: &str = "count";

const NOT_YET_IMPLEMENTED: &str = "Not yet implemented";

/// A count request bound to a [`SearchClient`].
///
/// Built with [`SearchClient::prepare_count`]. Each call to [`get`](Self::get)
/// is an independent, synchronous round-trip; nothing is cached between
/// calls.
///
/// The watch is started at [`ProfilingLevel::Full`] but only stopped with a
/// label when profiling is enabled at [`ProfilingLevel::Basic`]. With the
/// profiler at `Basic` the watch is therefore inactive and nothing is
/// recorded.
pub struct ProxyCountRequest {
    client: SearchClient,
    request: CountRequest,
}

impl ProxyCountRequest {
    pub(crate) fn new(client: SearchClient, request: CountRequest) -> Self {
        Self { client, request }
    }

    /// Replace the target collections.
    pub fn collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.set_collections(collections);
        self
    }

    /// Append one target collection.
    pub fn add_collection(mut self, collection: impl Into<String>) -> Self {
        self.request.push_collection(collection);
        self
    }

    /// Replace the filtering types.
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.set_types(types);
        self
    }

    /// Append one filtering type.
    pub fn add_type(mut self, type_: impl Into<String>) -> Self {
        self.request.push_type(type_);
        self
    }

    /// Only count documents matching `query`.
    pub fn query(mut self, query: Value) -> Self {
        self.request.set_query(query);
        self
    }

    /// Only count documents scoring at least `min_score`.
    pub fn min_score(mut self, min_score: f32) -> Self {
        self.request.set_min_score(min_score);
        self
    }

    /// Route the count to the shards owning `routing`.
    pub fn routing(mut self, routing: impl Into<String>) -> Self {
        self.request.set_routing(routing);
        self
    }

    /// Replica preference, e.g. `_local`.
    pub fn preference(mut self, preference: impl Into<String>) -> Self {
        self.request.set_preference(preference);
        self
    }

    /// The descriptor as built so far.
    pub fn request(&self) -> &CountRequest {
        &self.request
    }

    /// Human-readable description, e.g. `count request on collections 'logs'`.
    pub fn describe(&self) -> String {
        self.request.describe(COUNT_OPERATION)
    }

    /// Run the count and block until the cluster answers.
    ///
    /// A transport failure is wrapped once into [`SearchError::Execution`]
    /// and never retried. The round-trip runs on the client's own runtime, so
    /// this may be called from any thread, `spawn_blocking` closures included.
    /// Called from an async task it parks that task's worker until the
    /// cluster answers.
    pub fn get(&self) -> SearchResult<CountResponse> {
        let profiling = self.client.profiling();
        let watch = profiling.start(COUNT_OPERATION, ProfilingLevel::Full);

        let result = self.execute_blocking();

        if profiling.is_enabled(ProfilingLevel::Basic) {
            watch.stop(self);
        }
        result
    }

    /// Bounded-wait execution is not supported.
    pub fn get_timeout(&self, _timeout: Duration) -> SearchResult<CountResponse> {
        Err(SearchError::unsupported("get_timeout", NOT_YET_IMPLEMENTED))
    }

    /// Bounded-wait execution with a textual timeout (`"5s"`) is not supported.
    pub fn get_timeout_str(&self, _timeout: &str) -> SearchResult<CountResponse> {
        Err(SearchError::unsupported("get_timeout_str", NOT_YET_IMPLEMENTED))
    }

    /// Asynchronous execution is refused; use [`get`](Self::get).
    pub fn execute(&self) -> SearchResult<CountResponse> {
        Err(SearchError::unsupported(
            "execute",
            "execute() should not be called as it's used for asynchronous",
        ))
    }

    fn execute_blocking(&self) -> SearchResult<CountResponse> {
        let transport = self.client.transport();
        let request = self.request.clone();

        self.client
            .block_on(async move { transport.count(&request).await })
            .and_then(|result| result)
            .map_err(|source| {
                let description = self.describe();
                tracing::debug!(error = %source, "{description} failed");
                SearchError::Execution {
                    description,
                    source,
                }
            })
    }
}

impl fmt::Display for ProxyCountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for ProxyCountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCountRequest")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
