use crate::{JobListing, Millis, PollGeneration, SearchForm, SessionId, StatusSnapshot};

/// Timestamps (`at`) are milliseconds on the front-end's monotonic clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the search form.
    SearchSubmitted(SearchForm),
    /// The search endpoint accepted the request.
    SearchAccepted { session: SessionId, at: Millis },
    /// The search request was rejected or never got an answer.
    SearchFailed {
        session: SessionId,
        failure: ApiFailure,
    },
    /// The scheduled status poll is due.
    PollDue {
        session: SessionId,
        generation: PollGeneration,
        at: Millis,
    },
    StatusReceived {
        session: SessionId,
        generation: PollGeneration,
        at: Millis,
        snapshot: StatusSnapshot,
    },
    StatusFailed {
        session: SessionId,
        generation: PollGeneration,
        failure: ApiFailure,
    },
    /// `None` when the body was valid but not a list of jobs.
    ResultsReceived {
        session: SessionId,
        listings: Option<Vec<JobListing>>,
    },
    ResultsFailed {
        session: SessionId,
        failure: ApiFailure,
    },
    /// Display refresh tick; drives the progress animation.
    Tick { at: Millis },
    /// User left the page or abandoned the search.
    SessionCancelled,
}

/// Why a request to the search service failed, as far as the UI cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// Non-success status, with the server's `error` text if it sent one.
    Rejected { status: u16, message: Option<String> },
    /// Network, timeout or malformed body.
    Transport { detail: String },
}

impl ApiFailure {
    /// Server message or transport detail, falling back to `default` when a
    /// rejection carried no message.
    pub fn message_or(&self, default: &str) -> String {
        match self {
            ApiFailure::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiFailure::Rejected { .. } => default.to_string(),
            ApiFailure::Transport { detail } => detail.clone(),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiFailure::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiFailure::Rejected { status, .. } => format!("server responded with status {status}"),
            ApiFailure::Transport { detail } => detail.clone(),
        }
    }
}
