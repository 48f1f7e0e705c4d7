//! Engine requests run on runtime worker threads; their log lines must still
//! carry the session that issued them.

use std::sync::Mutex;
use std::time::Duration;

use jobsearch_engine::{
    ApiError, EngineEvent, EngineHandle, JobListing, SearchApi, SearchCriteria, StatusSnapshot,
};
use jobsearch_logging::search_warn;
use log::{Log, Metadata, Record};

const WAIT: Duration = Duration::from_secs(2);

struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    lines: Mutex::new(Vec::new()),
};

fn captured_lines() -> Vec<String> {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
    LOGGER.lines.lock().unwrap().clone()
}

/// A service whose status endpoint is down and whose results are not a list.
struct FlakyApi;

#[async_trait::async_trait]
impl SearchApi for FlakyApi {
    async fn submit_search(&self, _criteria: &SearchCriteria) -> Result<(), ApiError> {
        Ok(())
    }

    async fn fetch_status(&self) -> Result<StatusSnapshot, ApiError> {
        tokio::task::yield_now().await;
        Err(ApiError::Timeout)
    }

    async fn fetch_results(&self) -> Result<Option<Vec<JobListing>>, ApiError> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        search_warn!("Results body is not an array; treating as empty");
        Ok(None)
    }
}

fn wait_for(engine: &EngineHandle, matches: impl Fn(&EngineEvent) -> bool) {
    let deadline = std::time::Instant::now() + WAIT;
    while std::time::Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            if matches(&event) {
                return;
            }
        }
    }
    panic!("engine event did not arrive");
}

#[test]
fn request_logs_carry_the_issuing_session() {
    captured_lines();
    jobsearch_logging::set_session(0);
    let engine = EngineHandle::with_api(std::sync::Arc::new(FlakyApi)).expect("engine starts");

    engine.fetch_status(4, 1);
    wait_for(&engine, |event| {
        matches!(event, EngineEvent::StatusFetched { session: 4, .. })
    });
    engine.fetch_results(6);
    wait_for(&engine, |event| {
        matches!(event, EngineEvent::ResultsFetched { session: 6, .. })
    });

    let lines = captured_lines();
    assert!(
        lines
            .iter()
            .any(|line| line == "[s4] Status request failed: request timed out"),
        "captured: {lines:?}"
    );
    assert!(
        lines
            .iter()
            .any(|line| line == "[s6] Results body is not an array; treating as empty"),
        "captured: {lines:?}"
    );
    assert!(
        !lines.iter().any(|line| line.starts_with("[s0] Status")
            || line.starts_with("[s0] Results")),
        "captured: {lines:?}"
    );
}
