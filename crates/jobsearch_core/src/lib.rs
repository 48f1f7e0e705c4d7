//! Job search core: pure session state machine and view-model helpers.
mod animation;
mod effect;
mod listing;
mod msg;
mod schedule;
mod state;
mod update;
mod view_model;

pub use animation::{ProgressAnimation, PROGRESS_ANIMATION_MS};
pub use effect::Effect;
pub use listing::{JobListing, SearchForm, StatusSnapshot};
pub use msg::{ApiFailure, Msg};
pub use schedule::{
    PollCadence, PollSchedule, CADENCE_SWITCH_AFTER_MS, FAST_POLL_INTERVAL_MS,
    SLOW_POLL_INTERVAL_MS,
};
pub use state::{AppState, Millis, PollGeneration, SessionId, SessionOutcome, SessionPhase};
pub use update::update;
pub use view_model::{
    AppViewModel, JobCard, ResultsView, INITIAL_STEP_TEXT, NO_MATCHES_HINT, NO_MATCHES_TITLE,
    SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
