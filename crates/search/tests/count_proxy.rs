//! Blocking execution, profiling and error wrapping of count requests.

use std::error::Error as _;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use sonde_profiling::{Profiling, ProfilingLevel, RecordingSink};
use sonde_search::{
    CountRequest, CountResponse, SearchClient, SearchError, Transport, TransportError,
};

/// Transport that answers every count with a fixed outcome.
struct ScriptedTransport {
    outcome: Result<u64, String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<CountRequest>>,
}

impl ScriptedTransport {
    fn ok(count: u64) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(count),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn count(&self, request: &CountRequest) -> Result<CountResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        tokio::time::sleep(Duration::from_millis(2)).await;
        match &self.outcome {
            Ok(count) => Ok(CountResponse::new(*count)),
            Err(message) => Err(TransportError::Other(message.clone())),
        }
    }
}

fn client(
    transport: Arc<ScriptedTransport>,
    level: ProfilingLevel,
) -> (SearchClient, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let profiling = Profiling::new(level, sink.clone());
    let client = SearchClient::new(transport, profiling).unwrap();
    (client, sink)
}

#[test]
fn get_returns_count_and_records_labelled_sample() {
    let transport = ScriptedTransport::ok(42);
    let (client, sink) = client(transport.clone(), ProfilingLevel::Full);

    let response = client.prepare_count().collections(["logs"]).get().unwrap();

    assert_eq!(response, CountResponse::new(42));
    assert_eq!(transport.calls(), 1);
    assert_eq!(sink.started(), 1);
    assert_eq!(sink.closed(), 1);
    let samples = sink.samples();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].domain, "count");
    assert_eq!(samples[0].label, "count request on collections 'logs'");
    assert!(samples[0].elapsed >= Duration::from_millis(2));
}

#[test]
fn transport_failure_becomes_execution_error() {
    let transport = ScriptedTransport::failing("connection refused");
    let (client, sink) = client(transport.clone(), ProfilingLevel::Full);

    let err = client
        .prepare_count()
        .collections(["issues", "rules"])
        .types(["issue"])
        .get()
        .unwrap_err();

    let description = "count request on collections 'issues,rules' on types 'issue'";
    assert!(matches!(err, SearchError::Execution { .. }));
    assert_eq!(err.to_string(), format!("Fail to execute {description}"));
    assert_eq!(err.description(), Some(description));
    assert_eq!(err.source().unwrap().to_string(), "connection refused");

    assert_eq!(transport.calls(), 1);
    assert_eq!(sink.started(), 1);
    assert_eq!(sink.closed(), 1);
    assert_eq!(sink.samples()[0].label, description);
}

#[test]
fn failures_are_not_retried() {
    let transport = ScriptedTransport::failing("boom");
    let (client, _sink) = client(transport.clone(), ProfilingLevel::None);

    assert!(client.prepare_count().get().is_err());
    assert_eq!(transport.calls(), 1);
}

#[test]
fn timeout_and_async_variants_never_reach_the_transport() {
    let transport = ScriptedTransport::ok(1);
    let (client, sink) = client(transport.clone(), ProfilingLevel::Full);
    let proxy = client.prepare_count().collections(["logs"]);

    let timeout = proxy.get_timeout(Duration::from_secs(1)).unwrap_err();
    let timeout_str = proxy.get_timeout_str("1s").unwrap_err();
    let execute = proxy.execute().unwrap_err();

    assert!(timeout.is_unsupported());
    assert!(timeout.to_string().contains("Not yet implemented"));
    assert!(timeout_str.is_unsupported());
    assert!(timeout_str.to_string().contains("Not yet implemented"));
    assert!(execute.is_unsupported());
    assert!(execute.to_string().contains("asynchronous"));

    assert_eq!(transport.calls(), 0);
    assert_eq!(sink.started(), 0);
}

#[test]
fn basic_level_starts_inactive_watch_and_records_nothing() {
    let transport = ScriptedTransport::ok(3);
    let (client, sink) = client(transport, ProfilingLevel::Basic);

    let response = client.prepare_count().get().unwrap();

    assert_eq!(response.count, 3);
    assert_eq!(sink.started(), 0);
    assert_eq!(sink.closed(), 0);
}

#[test]
fn disabled_profiling_still_executes() {
    let transport = ScriptedTransport::ok(9);
    let (client, sink) = client(transport.clone(), ProfilingLevel::None);

    assert_eq!(client.prepare_count().get().unwrap().count, 9);
    assert_eq!(transport.calls(), 1);
    assert_eq!(sink.started(), 0);
}

fn outer_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn get_from_spawn_blocking_reaches_transport() {
    let transport = ScriptedTransport::ok(5);
    let (client, sink) = client(transport.clone(), ProfilingLevel::Full);

    let outer = outer_runtime();
    let count = outer
        .block_on(async move {
            tokio::task::spawn_blocking(move || client.prepare_count().get().map(|r| r.count))
                .await
                .unwrap()
        })
        .unwrap();

    assert_eq!(count, 5);
    assert_eq!(transport.calls(), 1);
    assert_eq!(sink.stopped(), 1);
    assert_eq!(sink.closed(), 1);
}

#[test]
fn get_from_async_task_runs_on_client_runtime() {
    let transport = ScriptedTransport::ok(5);
    let (client, sink) = client(transport.clone(), ProfilingLevel::Full);

    let outer = outer_runtime();
    let response = outer.block_on(async { client.prepare_count().get() }).unwrap();

    assert_eq!(response.count, 5);
    assert_eq!(transport.calls(), 1);
    assert_eq!(sink.stopped(), 1);
}

#[test]
fn last_client_can_be_dropped_inside_async_code() {
    let transport = ScriptedTransport::ok(3);

    let outer = outer_runtime();
    let count = outer.block_on(async move {
        let (client, _sink) = client(transport, ProfilingLevel::None);
        let handle = tokio::task::spawn_blocking({
            let client = client.clone();
            move || client.prepare_count().get().map(|r| r.count)
        });
        drop(client);
        handle.await.unwrap()
    });

    assert_eq!(count.unwrap(), 3);
}

#[test]
fn client_built_and_dropped_inside_async_code() {
    let outer = outer_runtime();
    outer.block_on(async {
        let (client, _sink) = client(ScriptedTransport::ok(0), ProfilingLevel::None);
        drop(client);
    });
}

#[test]
fn descriptor_reaches_transport_unchanged() {
    let transport = ScriptedTransport::ok(0);
    let (client, _sink) = client(transport.clone(), ProfilingLevel::None);

    client
        .prepare_count()
        .add_collection("a")
        .add_collection("b")
        .add_type("t")
        .query(serde_json::json!({"term": {"status": "OPEN"}}))
        .min_score(1.5)
        .routing("project-1")
        .preference("_local")
        .get()
        .unwrap();

    let seen = transport.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.collections(), ["a".to_string(), "b".to_string()]);
    assert_eq!(request.types(), ["t".to_string()]);
    assert_eq!(request.min_score(), Some(1.5));
    assert_eq!(request.routing(), Some("project-1"));
    assert_eq!(request.preference(), Some("_local"));
    assert!(request.query().is_some());
}

#[test]
fn prepare_count_with_uses_given_descriptor() {
    let transport = ScriptedTransport::ok(0);
    let (client, _sink) = client(transport, ProfilingLevel::None);

    let proxy = client.prepare_count_with(
        CountRequest::new()
            .with_collections(["a", "b"])
            .with_types(["x"]),
    );

    assert_eq!(
        proxy.to_string(),
        "count request on collections 'a,b' on types 'x'"
    );
    assert_eq!(proxy.describe(), proxy.request().describe("count"));
}

#[test]
fn concurrent_gets_share_one_client() {
    let transport = ScriptedTransport::ok(7);
    let (client, sink) = client(transport.clone(), ProfilingLevel::Full);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            thread::spawn(move || {
                client
                    .prepare_count()
                    .collections([format!("c{i}")])
                    .get()
                    .map(|r| r.count)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 7);
    }
    assert_eq!(transport.calls(), 4);
    assert_eq!(sink.started(), 4);
    assert_eq!(sink.closed(), 4);
}
