//! Stopwatch lifecycle across threads and exit paths.

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use sonde_profiling::{Profiling, ProfilingLevel, RecordingSink};

fn fallible(profiling: &Profiling, fail: bool) -> Result<u64, String> {
    let watch = profiling.start("count", ProfilingLevel::Full);
    if fail {
        return Err("boom".into());
    }
    watch.stop("count request");
    Ok(1)
}

#[test]
fn every_exit_path_closes_the_watch() {
    let sink = Arc::new(RecordingSink::new());
    let profiling = Profiling::new(ProfilingLevel::Full, sink.clone());

    assert_eq!(fallible(&profiling, false), Ok(1));
    assert_eq!(fallible(&profiling, true), Err("boom".to_string()));

    assert_eq!(sink.started(), 2);
    assert_eq!(sink.stopped(), 1);
    assert_eq!(sink.discarded(), 1);
}

#[test]
fn concurrent_watches_record_independently() {
    let sink = Arc::new(RecordingSink::new());
    let profiling = Profiling::new(ProfilingLevel::Full, sink.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let profiling = profiling.clone();
            thread::spawn(move || {
                profiling
                    .start("count", ProfilingLevel::Basic)
                    .stop(format!("request {i}"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.started(), 8);
    assert_eq!(sink.closed(), 8);
    let mut labels: Vec<_> = sink.samples().into_iter().map(|s| s.label).collect();
    labels.sort();
    assert_eq!(labels.first().map(String::as_str), Some("request 0"));
    assert_eq!(labels.len(), 8);
}

#[test]
fn disabled_profiling_records_nothing() {
    let profiling = Profiling::disabled();
    assert_eq!(profiling.level(), ProfilingLevel::None);
    assert_eq!(profiling.start("count", ProfilingLevel::Basic).stop("x"), None);
}
