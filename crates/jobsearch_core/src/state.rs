use crate::view_model::{
    AppViewModel, ResultsView, INITIAL_STEP_TEXT, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
use crate::{Effect, JobListing, PollCadence, PollSchedule, ProgressAnimation, StatusSnapshot};

pub type SessionId = u64;
pub type PollGeneration = u64;
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Waiting for the search endpoint to accept the form.
    Submitting,
    Polling(PollCadence),
    FetchingResults,
}

/// How the most recent search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Failed,
}

/// The single scheduled or in-flight status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePoll {
    generation: PollGeneration,
    schedule: PollSchedule,
    awaiting_status: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct PageState {
    error: Option<String>,
    progress_visible: bool,
    displayed_progress: f64,
    current_step: String,
    status_message: String,
    scrape_counter: Option<(u64, u64)>,
    results: ResultsView,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            error: None,
            progress_visible: false,
            displayed_progress: 0.0,
            current_step: INITIAL_STEP_TEXT.to_string(),
            status_message: String::new(),
            scrape_counter: None,
            results: ResultsView::Hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionId,
    phase: SessionPhase,
    last_outcome: Option<SessionOutcome>,
    last_progress: f64,
    next_generation: PollGeneration,
    poll: Option<ActivePoll>,
    animation: Option<ProgressAnimation>,
    page: PageState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let searching = self.is_searching();
        AppViewModel {
            phase: self.phase,
            last_outcome: self.last_outcome,
            error: self.page.error.clone(),
            submit_enabled: !searching,
            submit_label: if searching {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            },
            progress_visible: self.page.progress_visible,
            progress_width: self.page.displayed_progress,
            progress_text: format!("{}%", self.page.displayed_progress.round() as i64),
            current_step: self.page.current_step.clone(),
            status_message: self.page.status_message.clone(),
            scrape_counter: self
                .page
                .scrape_counter
                .map(|(scraped, total)| format!("Scraped {scraped} of {total} jobs")),
            results: self.page.results.clone(),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_searching(&self) -> bool {
        self.phase != SessionPhase::Idle
    }

    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    /// Generation of the live poll, if any.
    pub fn active_poll(&self) -> Option<PollGeneration> {
        self.poll.map(|poll| poll.generation)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears every trace of the previous search from the page and cancels
    /// the poll timer if one is live.
    pub fn reset_ui(&mut self) -> Vec<Effect> {
        let progress_visible = self.page.progress_visible;
        self.page = PageState {
            progress_visible,
            ..PageState::default()
        };
        self.last_progress = 0.0;
        self.animation = None;
        self.mark_dirty();
        self.stop_polling()
    }

    pub(crate) fn begin_search(&mut self) -> SessionId {
        self.session += 1;
        self.phase = SessionPhase::Submitting;
        self.last_outcome = None;
        self.page.progress_visible = true;
        self.mark_dirty();
        self.session
    }

    /// Invalidates every reply still in flight for the current session.
    pub(crate) fn abandon_session(&mut self) {
        self.session += 1;
        self.phase = SessionPhase::Idle;
        self.last_outcome = None;
        self.page.progress_visible = false;
        self.mark_dirty();
    }

    /// Back to an idle, searchable page.
    pub(crate) fn finish_search(&mut self, outcome: SessionOutcome) {
        self.phase = SessionPhase::Idle;
        self.last_outcome = Some(outcome);
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.page.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn start_polling(&mut self, at: Millis) -> Effect {
        self.next_generation += 1;
        let mut poll = ActivePoll {
            generation: self.next_generation,
            schedule: PollSchedule::start(at),
            awaiting_status: false,
        };
        let delay_ms = poll.schedule.advance(at);
        self.phase = SessionPhase::Polling(poll.schedule.cadence());
        self.poll = Some(poll);
        self.mark_dirty();
        Effect::SchedulePoll {
            session: self.session,
            generation: poll.generation,
            delay_ms,
        }
    }

    /// Marks the live poll as waiting for its status reply. Returns false for
    /// a stale or duplicate timer.
    pub(crate) fn claim_poll(&mut self, generation: PollGeneration) -> bool {
        match self.poll.as_mut() {
            Some(poll) if poll.generation == generation && !poll.awaiting_status => {
                poll.awaiting_status = true;
                true
            }
            _ => false,
        }
    }

    /// Accepts a status reply for the live poll. Returns false for a stale one.
    pub(crate) fn release_poll(&mut self, generation: PollGeneration) -> bool {
        match self.poll.as_mut() {
            Some(poll) if poll.generation == generation && poll.awaiting_status => {
                poll.awaiting_status = false;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn schedule_next_poll(&mut self, at: Millis) -> Vec<Effect> {
        let session = self.session;
        let Some(poll) = self.poll.as_mut() else {
            return Vec::new();
        };
        let delay_ms = poll.schedule.advance(at);
        let cadence = poll.schedule.cadence();
        let generation = poll.generation;
        self.phase = SessionPhase::Polling(cadence);
        vec![Effect::SchedulePoll {
            session,
            generation,
            delay_ms,
        }]
    }

    pub(crate) fn stop_polling(&mut self) -> Vec<Effect> {
        match self.poll.take() {
            Some(_) => vec![Effect::CancelPoll],
            None => Vec::new(),
        }
    }

    pub(crate) fn begin_results_fetch(&mut self) -> Effect {
        self.phase = SessionPhase::FetchingResults;
        self.mark_dirty();
        Effect::FetchResults {
            session: self.session,
        }
    }

    /// Copies the snapshot's text onto the page and starts a bar animation
    /// when the progress value moved.
    pub(crate) fn apply_status(&mut self, snapshot: &StatusSnapshot, at: Millis) {
        self.page.current_step = snapshot.current_step.clone();
        if snapshot.progress != self.last_progress {
            self.animation = Some(ProgressAnimation::new(
                self.last_progress,
                snapshot.progress,
                at,
            ));
            self.last_progress = snapshot.progress;
        }
        if let Some(message) = snapshot.message.as_deref().filter(|m| !m.is_empty()) {
            self.page.status_message = message.to_string();
        }
        if let (Some(scraped), Some(total)) = (snapshot.scraped_jobs, snapshot.total_jobs) {
            if total > 0 {
                self.page.scrape_counter = Some((scraped, total));
            }
        }
        self.mark_dirty();
    }

    /// Advances the bar animation to `at`.
    pub(crate) fn animate(&mut self, at: Millis) {
        let Some(animation) = self.animation else {
            return;
        };
        let sample = animation.sample(at);
        if sample != self.page.displayed_progress {
            self.page.displayed_progress = sample;
            self.mark_dirty();
        }
        if animation.is_finished(at) {
            self.animation = None;
        }
    }

    pub(crate) fn render_results(&mut self, listings: Option<&[JobListing]>) {
        self.page.results = ResultsView::from_listings(listings);
        self.mark_dirty();
    }
}
