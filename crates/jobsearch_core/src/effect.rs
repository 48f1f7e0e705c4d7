use crate::{Millis, PollGeneration, SearchForm, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitSearch {
        session: SessionId,
        form: SearchForm,
    },
    /// Replace any scheduled poll with one due after `delay_ms`.
    SchedulePoll {
        session: SessionId,
        generation: PollGeneration,
        delay_ms: Millis,
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
