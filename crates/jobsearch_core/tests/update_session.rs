use std::sync::Once;

use jobsearch_core::{
    update, ApiFailure, AppState, Effect, JobListing, Millis, Msg, PollCadence, PollGeneration,
    ResultsView, SearchForm, SessionId, SessionOutcome, SessionPhase, StatusSnapshot,
    INITIAL_STEP_TEXT, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobsearch_logging::initialize_for_tests);
}

fn form() -> SearchForm {
    SearchForm::new("Rust developer", "Berlin")
}

fn snapshot(progress: f64, is_scraping: bool) -> StatusSnapshot {
    StatusSnapshot {
        is_scraping,
        current_step: format!("step at {progress}"),
        progress,
        ..StatusSnapshot::default()
    }
}

fn submitted() -> (AppState, SessionId) {
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted(form()));
    let session = match effects.as_slice() {
        [Effect::SubmitSearch { session, form: sent }] => {
            assert_eq!(sent, &form());
            *session
        }
        other => panic!("unexpected effects {other:?}"),
    };
    (state, session)
}

fn polling() -> (AppState, SessionId, PollGeneration) {
    let (state, session) = submitted();
    let (state, effects) = update(state, Msg::SearchAccepted { session, at: 0 });
    let generation = match effects.as_slice() {
        [Effect::SchedulePoll {
            generation,
            delay_ms: 200,
            ..
        }] => *generation,
        other => panic!("unexpected effects {other:?}"),
    };
    (state, session, generation)
}

/// Fires the poll timer and answers the status request.
fn poll_once(
    state: AppState,
    session: SessionId,
    generation: PollGeneration,
    at: Millis,
    snapshot: StatusSnapshot,
) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(
        state,
        Msg::PollDue {
            session,
            generation,
            at,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchStatus {
            session,
            generation
        }]
    );
    update(
        state,
        Msg::StatusReceived {
            session,
            generation,
            at,
            snapshot,
        },
    )
}

#[test]
fn submit_shows_busy_state_and_posts_form() {
    init_logging();
    let (state, session) = submitted();
    let view = state.view();

    assert_eq!(session, 1);
    assert_eq!(view.phase, SessionPhase::Submitting);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
    assert!(view.progress_visible);
    assert_eq!(view.current_step, INITIAL_STEP_TEXT);
    assert!(view.dirty);
}

#[test]
fn resubmitting_while_searching_is_ignored() {
    init_logging();
    let (state, _session, _generation) = polling();
    let before = state.clone();

    let (next, effects) = update(state, Msg::SearchSubmitted(form()));

    assert_eq!(next, before);
    assert!(effects.is_empty());
}

#[test]
fn missing_required_fields_never_reach_the_server() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::SearchSubmitted(SearchForm::new("", "Berlin")),
    );

    assert!(effects.is_empty());
    assert!(!state.is_searching());
    assert_eq!(
        state.view().error.as_deref(),
        Some("Position and location are required fields")
    );
}

#[test]
fn reset_ui_clears_page_and_cancels_timer() {
    init_logging();
    let (state, session, generation) = polling();
    let mut status = snapshot(55.0, true);
    status.message = Some("Scraping".into());
    let (mut state, _) = poll_once(state, session, generation, 200, status);
    assert_eq!(state.last_progress(), 55.0);
    assert_eq!(state.active_poll(), Some(generation));

    let effects = state.reset_ui();

    assert_eq!(effects, vec![Effect::CancelPoll]);
    assert_eq!(state.last_progress(), 0.0);
    assert_eq!(state.active_poll(), None);
    assert!(!state.is_animating());
    let view = state.view();
    assert_eq!(view.error, None);
    assert_eq!(view.results, ResultsView::Hidden);
    assert_eq!(view.progress_width, 0.0);
    assert_eq!(view.progress_text, "0%");
    assert_eq!(view.current_step, INITIAL_STEP_TEXT);
    assert_eq!(view.status_message, "");
}

#[test]
fn scraping_sequence_fetches_results_once_after_last_snapshot() {
    init_logging();
    let (mut state, session, generation) = polling();
    let mut at = 0;
    let mut results_fetches = Vec::new();
    let sequence = [
        snapshot(10.0, true),
        snapshot(10.0, true),
        snapshot(55.0, true),
        snapshot(55.0, true),
        snapshot(100.0, true),
        snapshot(100.0, false),
    ];
    let last = sequence.len() - 1;

    for (index, status) in sequence.into_iter().enumerate() {
        at += 200;
        let (next, effects) = poll_once(state, session, generation, at, status);
        state = next;
        for effect in effects {
            if matches!(effect, Effect::FetchResults { .. }) {
                results_fetches.push(index);
            }
        }
    }

    assert_eq!(results_fetches, vec![last]);
    assert_eq!(state.phase(), SessionPhase::FetchingResults);
    assert_eq!(state.active_poll(), None);
    assert_eq!(state.last_progress(), 100.0);
}

#[test]
fn in_band_error_stops_polling_and_returns_to_idle() {
    init_logging();
    let (state, session, generation) = polling();
    let mut status = snapshot(40.0, true);
    status.error = Some("Scraper blocked".into());

    let (state, effects) = poll_once(state, session, generation, 200, status);

    assert_eq!(effects, vec![Effect::CancelPoll]);
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("Scraper blocked"));
    assert_eq!(view.phase, SessionPhase::Idle);
    assert_eq!(view.last_outcome, Some(SessionOutcome::Failed));
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);

    // A timer that raced the cancellation is ignored.
    let (_state, effects) = update(
        state,
        Msg::PollDue {
            session,
            generation,
            at: 400,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn empty_error_field_is_not_an_error() {
    init_logging();
    let (state, session, generation) = polling();
    let mut status = snapshot(5.0, true);
    status.error = Some(String::new());

    let (state, effects) = poll_once(state, session, generation, 200, status);

    assert_eq!(state.view().error, None);
    assert!(matches!(
        effects.as_slice(),
        [Effect::SchedulePoll { delay_ms: 200, .. }]
    ));
}

#[test]
fn status_request_failure_surfaces_error() {
    init_logging();
    let (state, session, generation) = polling();
    let (state, _) = update(
        state,
        Msg::PollDue {
            session,
            generation,
            at: 200,
        },
    );

    let (state, effects) = update(
        state,
        Msg::StatusFailed {
            session,
            generation,
            failure: ApiFailure::Transport {
                detail: "connection refused".into(),
            },
        },
    );

    assert_eq!(effects, vec![Effect::CancelPoll]);
    let view = state.view();
    assert_eq!(
        view.error.as_deref(),
        Some("Error checking status: connection refused")
    );
    assert_eq!(view.last_outcome, Some(SessionOutcome::Failed));
    assert!(view.submit_enabled);
}

#[test]
fn rejected_search_uses_server_message_or_default() {
    init_logging();
    let (state, session) = submitted();
    let (state, effects) = update(
        state,
        Msg::SearchFailed {
            session,
            failure: ApiFailure::Rejected {
                status: 400,
                message: Some("Position and location are required fields".into()),
            },
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().error.as_deref(),
        Some("Position and location are required fields")
    );
    assert!(!state.is_searching());

    let (state, effects) = update(state, Msg::SearchSubmitted(form()));
    let session = match effects.as_slice() {
        [Effect::SubmitSearch { session, .. }] => *session,
        other => panic!("unexpected effects {other:?}"),
    };
    assert_eq!(state.view().error, None);
    let (state, _) = update(
        state,
        Msg::SearchFailed {
            session,
            failure: ApiFailure::Rejected {
                status: 502,
                message: None,
            },
        },
    );
    assert_eq!(
        state.view().error.as_deref(),
        Some("Failed to start job search")
    );
}

#[test]
fn results_render_and_restore_idle() {
    init_logging();
    let (state, session, generation) = polling();
    let (state, _) = poll_once(state, session, generation, 200, snapshot(100.0, false));

    let listing = JobListing {
        title: Some("Engineer".into()),
        company: Some("Acme".into()),
        ..JobListing::default()
    };
    let (state, effects) = update(
        state,
        Msg::ResultsReceived {
            session,
            listings: Some(vec![listing]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.last_outcome, Some(SessionOutcome::Completed));
    assert!(view.submit_enabled);
    assert!(view.results_visible());
    assert_eq!(view.job_count_text(), "1 jobs");
    let ResultsView::Cards(cards) = &view.results else {
        panic!("expected cards, got {:?}", view.results);
    };
    assert_eq!(cards[0].company_initial, 'A');
    assert_eq!(cards[0].title, "Engineer");
    assert_eq!(cards[0].location, "Not specified");
}

#[test]
fn empty_results_show_empty_state() {
    init_logging();
    for listings in [Some(Vec::new()), None] {
        let (state, session, generation) = polling();
        let (state, _) = poll_once(state, session, generation, 200, snapshot(100.0, false));
        let (state, _) = update(state, Msg::ResultsReceived { session, listings });

        let view = state.view();
        assert_eq!(view.results, ResultsView::NoMatches);
        assert_eq!(view.job_count_text(), "0 jobs");
        assert!(view.results_visible());
    }
}

#[test]
fn results_failure_always_restores_idle() {
    init_logging();
    let (state, session, generation) = polling();
    let (state, _) = poll_once(state, session, generation, 200, snapshot(100.0, false));

    let (state, _) = update(
        state,
        Msg::ResultsFailed {
            session,
            failure: ApiFailure::Rejected {
                status: 500,
                message: None,
            },
        },
    );

    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("Failed to fetch results"));
    assert_eq!(view.results, ResultsView::Hidden);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
}

#[test]
fn cancelled_session_ignores_late_replies() {
    init_logging();
    let (state, session, generation) = polling();

    let (state, effects) = update(state, Msg::SessionCancelled);
    assert_eq!(effects, vec![Effect::CancelPoll]);
    assert!(!state.is_searching());
    assert!(!state.view().progress_visible);

    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::StatusReceived {
            session,
            generation,
            at: 200,
            snapshot: snapshot(100.0, false),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, effects) = update(
        state,
        Msg::ResultsReceived {
            session,
            listings: Some(Vec::new()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn progress_animates_over_three_hundred_millis() {
    init_logging();
    let (state, session, generation) = polling();
    let (state, _) = poll_once(state, session, generation, 200, snapshot(60.0, true));
    assert_eq!(state.last_progress(), 60.0);
    assert_eq!(state.view().progress_width, 0.0);

    let (mut state, _) = update(state, Msg::Tick { at: 350 });
    assert_eq!(state.view().progress_width, 30.0);
    assert_eq!(state.view().progress_text, "30%");
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::Tick { at: 520 });
    assert_eq!(state.view().progress_width, 60.0);
    assert!(!state.is_animating());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::Tick { at: 600 });
    assert!(!state.consume_dirty());
}

#[test]
fn newer_progress_supersedes_running_animation() {
    init_logging();
    let (state, session, generation) = polling();
    let (state, effects) = poll_once(state, session, generation, 200, snapshot(40.0, true));
    assert!(matches!(
        effects.as_slice(),
        [Effect::SchedulePoll { delay_ms: 200, .. }]
    ));
    let (state, _) = update(state, Msg::Tick { at: 250 });
    let mid = state.view().progress_width;
    assert!(mid > 0.0 && mid < 40.0);

    // The next animation starts from the recorded value, not the drawn one.
    let (state, _) = poll_once(state, session, generation, 400, snapshot(80.0, true));
    let (state, _) = update(state, Msg::Tick { at: 400 });
    assert_eq!(state.view().progress_width, 40.0);
    let (state, _) = update(state, Msg::Tick { at: 700 });
    assert_eq!(state.view().progress_width, 80.0);
}

#[test]
fn scrape_counters_and_message_are_shown() {
    init_logging();
    let (state, session, generation) = polling();
    let status = StatusSnapshot {
        is_scraping: true,
        current_step: "Processing scraped job data".into(),
        progress: 40.0,
        message: Some("Halfway there".into()),
        error: None,
        total_jobs: Some(12),
        scraped_jobs: Some(12),
    };

    let (state, _) = poll_once(state, session, generation, 200, status);

    let view = state.view();
    assert_eq!(view.current_step, "Processing scraped job data");
    assert_eq!(view.status_message, "Halfway there");
    assert_eq!(view.scrape_counter.as_deref(), Some("Scraped 12 of 12 jobs"));
    assert_eq!(view.phase, SessionPhase::Polling(PollCadence::Fast));
}
