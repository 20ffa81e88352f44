//! Search client: shared transport, blocking runtime and profiling

use std::fmt;
use std::future::Future;
use std::sync::{Arc, mpsc};

use sonde_profiling::Profiling;
use tokio::runtime::{Builder as RuntimeBuilder, Handle, Runtime};

use crate::error::{SearchError, SearchResult, TransportError};
use crate::proxy::ProxyCountRequest;
use crate::request::CountRequest;
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Runtime the client drives transport futures on.
///
/// Dropped with `shutdown_background`, so the last clone of a client may be
/// released from inside async code.
struct BlockingRuntime {
    handle: Handle,
    runtime: Option<Runtime>,
}

impl BlockingRuntime {
    fn new(runtime: Runtime) -> Self {
        Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        }
    }

    /// Spawn `future` on this runtime and park the calling thread until it
    /// completes. Works from plain threads, `spawn_blocking` threads and
    /// async tasks alike, since the caller's context is never entered.
    fn run<F>(&self, future: F) -> Result<F::Output, TransportError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        self.handle.spawn(async move {
            let _ = tx.send(future.await);
        });
        rx.recv()
            .map_err(|_| TransportError::Other("search task ended without a result".into()))
    }
}

impl Drop for BlockingRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Entry point for preparing instrumented count requests.
///
/// Cheap to clone; clones share the transport, the runtime and the
/// profiling sink. The client itself holds no per-request state.
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    runtime: Arc<BlockingRuntime>,
    profiling: Profiling,
}

impl SearchClient {
    /// Create a client with its own single-worker runtime for blocking.
    pub fn new(transport: Arc<dyn Transport>, profiling: Profiling) -> SearchResult<Self> {
        let runtime = RuntimeBuilder::new_multi_thread()
            .worker_threads(1)
            .thread_name("sonde-search")
            .enable_all()
            .build()
            .map_err(SearchError::Runtime)?;
        Ok(Self::with_runtime(transport, runtime, profiling))
    }

    /// Create a client that takes ownership of `runtime`.
    ///
    /// The runtime is shut down in the background once the last clone of
    /// the client is dropped.
    pub fn with_runtime(
        transport: Arc<dyn Transport>,
        runtime: Runtime,
        profiling: Profiling,
    ) -> Self {
        Self {
            transport,
            runtime: Arc::new(BlockingRuntime::new(runtime)),
            profiling,
        }
    }

    /// Create a client backed by an [`HttpTransport`].
    pub fn http(config: &TransportConfig, profiling: Profiling) -> SearchResult<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::debug!(url = %transport.base_url(), level = %profiling.level(), "search client ready");
        Self::new(Arc::new(transport), profiling)
    }

    /// Start building a count over every collection.
    pub fn prepare_count(&self) -> ProxyCountRequest {
        ProxyCountRequest::new(self.clone(), CountRequest::new())
    }

    /// Start from an already built descriptor.
    pub fn prepare_count_with(&self, request: CountRequest) -> ProxyCountRequest {
        ProxyCountRequest::new(self.clone(), request)
    }

    /// Profiling this client's requests report to.
    pub fn profiling(&self) -> &Profiling {
        &self.profiling
    }

    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub(crate) fn block_on<F>(&self, future: F) -> Result<F::Output, TransportError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.run(future)
    }
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("profiling", &self.profiling)
            .finish_non_exhaustive()
    }
}
