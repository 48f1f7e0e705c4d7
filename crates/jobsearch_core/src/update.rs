use crate::{AppState, Effect, Msg, SessionOutcome, SessionPhase};

const MISSING_FIELDS: &str = "Position and location are required fields";
const SEARCH_FAILED_DEFAULT: &str = "Failed to start job search";
const RESULTS_FAILED_DEFAULT: &str = "Failed to fetch results";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(form) => {
            if state.is_searching() {
                return (state, Vec::new());
            }
            let mut effects = state.reset_ui();
            if form.is_missing_required() {
                state.show_error(MISSING_FIELDS);
                return (state, effects);
            }
            let session = state.begin_search();
            effects.push(Effect::SubmitSearch { session, form });
            effects
        }
        Msg::SearchAccepted { session, at } => {
            if session != state.session() || state.phase() != SessionPhase::Submitting {
                return (state, Vec::new());
            }
            vec![state.start_polling(at)]
        }
        Msg::SearchFailed { session, failure } => {
            if session != state.session() || state.phase() != SessionPhase::Submitting {
                return (state, Vec::new());
            }
            state.show_error(failure.message_or(SEARCH_FAILED_DEFAULT));
            state.finish_search(SessionOutcome::Failed);
            Vec::new()
        }
        Msg::PollDue {
            session,
            generation,
            at: _,
        } => {
            if session != state.session() || !state.claim_poll(generation) {
                return (state, Vec::new());
            }
            vec![Effect::FetchStatus {
                session,
                generation,
            }]
        }
        Msg::StatusReceived {
            session,
            generation,
            at,
            snapshot,
        } => {
            if session != state.session() || !state.release_poll(generation) {
                return (state, Vec::new());
            }
            state.apply_status(&snapshot, at);
            match snapshot.error.as_deref().filter(|e| !e.is_empty()) {
                Some(error) => {
                    state.show_error(error);
                    let effects = state.stop_polling();
                    state.finish_search(SessionOutcome::Failed);
                    effects
                }
                None if !snapshot.is_scraping => {
                    let mut effects = state.stop_polling();
                    effects.push(state.begin_results_fetch());
                    effects
                }
                None => state.schedule_next_poll(at),
            }
        }
        Msg::StatusFailed {
            session,
            generation,
            failure,
        } => {
            if session != state.session() || !state.release_poll(generation) {
                return (state, Vec::new());
            }
            state.show_error(format!("Error checking status: {}", failure.detail()));
            let effects = state.stop_polling();
            state.finish_search(SessionOutcome::Failed);
            effects
        }
        Msg::ResultsReceived { session, listings } => {
            if session != state.session() || state.phase() != SessionPhase::FetchingResults {
                return (state, Vec::new());
            }
            state.render_results(listings.as_deref());
            state.finish_search(SessionOutcome::Completed);
            Vec::new()
        }
        Msg::ResultsFailed { session, failure } => {
            if session != state.session() || state.phase() != SessionPhase::FetchingResults {
                return (state, Vec::new());
            }
            state.show_error(failure.message_or(RESULTS_FAILED_DEFAULT));
            state.finish_search(SessionOutcome::Failed);
            Vec::new()
        }
        Msg::Tick { at } => {
            state.animate(at);
            Vec::new()
        }
        Msg::SessionCancelled => {
            let effects = state.reset_ui();
            state.abandon_session();
            effects
        }
    };

    (state, effects)
}
