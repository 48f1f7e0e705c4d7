//! Job search engine: HTTP client for the search service and effect execution.
mod api;
mod engine;
mod timer;
mod types;

pub use api::{ApiSettings, ReqwestSearchApi, SearchApi};
pub use engine::{EngineError, EngineHandle};
pub use timer::PollTimer;
pub use types::{
    ApiError, EngineEvent, JobListing, PollGeneration, SearchCriteria, SessionId, StatusSnapshot,
};
