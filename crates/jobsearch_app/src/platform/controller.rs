use std::time::{Duration, Instant};

use jobsearch_core::{update, AppState, AppViewModel, Millis, Msg, SearchForm};
use jobsearch_logging::search_trace;

use super::effects::{event_to_msg, EffectRunner};
use super::ui::ViewSink;

/// Owns the session state for one page lifetime, runs effects on the engine
/// and pushes every changed view to the injected UI binding.
pub struct SearchSessionController<V: ViewSink> {
    state: AppState,
    runner: EffectRunner,
    view: V,
    clock: Instant,
}

impl<V: ViewSink> SearchSessionController<V> {
    pub fn new(runner: EffectRunner, view: V) -> Self {
        let mut controller = Self {
            state: AppState::new(),
            runner,
            view,
            clock: Instant::now(),
        };
        let initial = controller.state.view();
        controller.view.render(&initial);
        controller
    }

    pub fn submit_search(&mut self, form: SearchForm) {
        self.dispatch(Msg::SearchSubmitted(form));
    }

    pub fn cancel(&mut self) {
        self.dispatch(Msg::SessionCancelled);
    }

    pub fn is_searching(&self) -> bool {
        self.state.is_searching()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Waits up to `frame` for engine events, applies everything that
    /// arrived, then advances the display by one frame.
    pub fn pump(&mut self, frame: Duration) {
        if let Some(event) = self.runner.recv(frame) {
            let msg = event_to_msg(event, self.now());
            self.dispatch(msg);
            while let Some(event) = self.runner.try_recv() {
                let msg = event_to_msg(event, self.now());
                self.dispatch(msg);
            }
        }
        self.dispatch(Msg::Tick { at: self.now() });
    }

    fn now(&self) -> Millis {
        self.clock.elapsed().as_millis() as Millis
    }

    fn dispatch(&mut self, msg: Msg) {
        if !matches!(msg, Msg::Tick { .. }) {
            search_trace!("Dispatching {:?}", msg);
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        jobsearch_logging::set_session(state.session());
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            let view = self.state.view();
            self.view.render(&view);
        }
    }
}
