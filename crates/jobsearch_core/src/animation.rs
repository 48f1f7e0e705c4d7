use crate::Millis;

/// Duration of the progress bar transition.
pub const PROGRESS_ANIMATION_MS: Millis = 300;

/// Linear transition of the progress bar between two percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    started_at: Millis,
}

impl ProgressAnimation {
    pub fn new(from: f64, to: f64, started_at: Millis) -> Self {
        Self {
            from,
            to,
            started_at,
        }
    }

    pub fn sample(&self, now: Millis) -> f64 {
        let elapsed = now.saturating_sub(self.started_at) as f64;
        let t = (elapsed / PROGRESS_ANIMATION_MS as f64).min(1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        now.saturating_sub(self.started_at) >= PROGRESS_ANIMATION_MS
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}
