use std::time::Duration;

use jobsearch_core::{ApiFailure, Effect, JobListing, Millis, Msg, SearchForm, StatusSnapshot};
use jobsearch_engine::{ApiError, EngineEvent, EngineHandle, SearchCriteria};
use jobsearch_logging::{search_debug, search_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitSearch { session, form } => {
                    self.engine.submit(session, map_form(form));
                }
                Effect::SchedulePoll {
                    session,
                    generation,
                    delay_ms,
                } => {
                    search_debug!("Next status poll #{} in {} ms", generation, delay_ms);
                    self.engine
                        .schedule_poll(session, generation, Duration::from_millis(delay_ms));
                }
                Effect::CancelPoll => self.engine.cancel_poll(),
                Effect::FetchStatus {
                    session,
                    generation,
                } => self.engine.fetch_status(session, generation),
                Effect::FetchResults { session } => {
                    search_info!("Scraping finished; fetching results");
                    self.engine.fetch_results(session);
                }
            }
        }
    }

    pub fn recv(&self, wait: Duration) -> Option<EngineEvent> {
        self.engine.recv_timeout(wait)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }
}

/// `at` is the time the event was picked up by the dispatcher.
pub fn event_to_msg(event: EngineEvent, at: Millis) -> Msg {
    match event {
        EngineEvent::SearchSubmitted { session, result } => match result {
            Ok(()) => Msg::SearchAccepted { session, at },
            Err(err) => Msg::SearchFailed {
                session,
                failure: map_failure(err),
            },
        },
        EngineEvent::PollDue {
            session,
            generation,
        } => Msg::PollDue {
            session,
            generation,
            at,
        },
        EngineEvent::StatusFetched {
            session,
            generation,
            result,
        } => match result {
            Ok(snapshot) => Msg::StatusReceived {
                session,
                generation,
                at,
                snapshot: map_snapshot(snapshot),
            },
            Err(err) => Msg::StatusFailed {
                session,
                generation,
                failure: map_failure(err),
            },
        },
        EngineEvent::ResultsFetched { session, result } => match result {
            Ok(listings) => Msg::ResultsReceived {
                session,
                listings: listings.map(|items| items.into_iter().map(map_listing).collect()),
            },
            Err(err) => Msg::ResultsFailed {
                session,
                failure: map_failure(err),
            },
        },
    }
}

fn map_form(form: SearchForm) -> SearchCriteria {
    SearchCriteria {
        position: form.position,
        location: form.location,
        experience: form.experience,
        salary: form.salary,
        job_nature: form.job_nature,
        skills: form.skills,
    }
}

fn map_failure(err: ApiError) -> ApiFailure {
    match err {
        ApiError::Rejected { status, message } => ApiFailure::Rejected { status, message },
        other => ApiFailure::Transport {
            detail: other.to_string(),
        },
    }
}

fn map_snapshot(snapshot: jobsearch_engine::StatusSnapshot) -> StatusSnapshot {
    StatusSnapshot {
        is_scraping: snapshot.is_scraping,
        current_step: snapshot.current_step,
        progress: snapshot.progress,
        message: snapshot.message,
        error: snapshot.error,
        total_jobs: snapshot.total_jobs,
        scraped_jobs: snapshot.scraped_jobs,
    }
}

fn map_listing(listing: jobsearch_engine::JobListing) -> JobListing {
    JobListing {
        job_title: listing.job_title,
        title: listing.title,
        company_name: listing.company_name,
        company: listing.company,
        location: listing.location,
        salary: listing.salary,
        job_type: listing.job_type,
        description: listing.description,
        job_description: listing.job_description,
        apply_link: listing.apply_link,
    }
}
