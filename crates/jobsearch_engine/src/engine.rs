use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobsearch_logging::{in_session, search_debug, search_info, search_warn};

use crate::api::{ApiSettings, ReqwestSearchApi, SearchApi};
use crate::timer::PollTimer;
use crate::{ApiError, EngineEvent, PollGeneration, SearchCriteria, SessionId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

enum EngineCommand {
    Submit {
        session: SessionId,
        criteria: SearchCriteria,
    },
    SchedulePoll {
        session: SessionId,
        generation: PollGeneration,
        delay: Duration,
    },
    CancelPoll,
    FetchStatus {
        session: SessionId,
        generation: PollGeneration,
    },
    FetchResults {
        session: SessionId,
    },
}

/// Runs requests and the poll timer on a background runtime; results come
/// back as `EngineEvent`s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestSearchApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn SearchApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("jobsearch-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let mut timer = PollTimer::new(runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::SchedulePoll {
                        session,
                        generation,
                        delay,
                    } => {
                        let event_tx = event_tx.clone();
                        timer.schedule(delay, move || {
                            let _ = event_tx.send(EngineEvent::PollDue {
                                session,
                                generation,
                            });
                        });
                    }
                    EngineCommand::CancelPoll => timer.cancel(),
                    request => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_request(api.as_ref(), request, event_tx).await;
                        });
                    }
                }
            }
            timer.cancel();
            search_debug!("Engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, session: SessionId, criteria: SearchCriteria) {
        search_info!(
            "Submitting search for {:?} in {:?}",
            criteria.position,
            criteria.location
        );
        self.send(EngineCommand::Submit { session, criteria });
    }

    pub fn schedule_poll(&self, session: SessionId, generation: PollGeneration, delay: Duration) {
        self.send(EngineCommand::SchedulePoll {
            session,
            generation,
            delay,
        });
    }

    pub fn cancel_poll(&self) {
        self.send(EngineCommand::CancelPoll);
    }

    pub fn fetch_status(&self, session: SessionId, generation: PollGeneration) {
        self.send(EngineCommand::FetchStatus {
            session,
            generation,
        });
    }

    pub fn fetch_results(&self, session: SessionId) {
        self.send(EngineCommand::FetchResults { session });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

/// Runs one request with its log lines tagged by the requesting session.
async fn handle_request(
    api: &dyn SearchApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Submit { session, criteria } => {
            in_session(session, async {
                let result = api.submit_search(&criteria).await;
                warn_on_failure("Search", &result);
                EngineEvent::SearchSubmitted { session, result }
            })
            .await
        }
        EngineCommand::FetchStatus {
            session,
            generation,
        } => {
            in_session(session, async {
                let result = api.fetch_status().await;
                warn_on_failure("Status", &result);
                EngineEvent::StatusFetched {
                    session,
                    generation,
                    result,
                }
            })
            .await
        }
        EngineCommand::FetchResults { session } => {
            in_session(session, async {
                let result = api.fetch_results().await;
                warn_on_failure("Results", &result);
                EngineEvent::ResultsFetched { session, result }
            })
            .await
        }
        EngineCommand::SchedulePoll { .. } | EngineCommand::CancelPoll => return,
    };
    let _ = event_tx.send(event);
}

fn warn_on_failure<T>(request: &str, result: &Result<T, ApiError>) {
    if let Err(err) = result {
        search_warn!("{} request failed: {}", request, err);
    }
}
