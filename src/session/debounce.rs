use std::time::{Duration, Instant};

/// Collapses a burst of viewport resize events into one, after a quiet period.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<((u32, u32), Instant)>,
}

impl ResizeDebouncer {
    /// Debouncer firing once no event arrived for `quiet`.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Quiet period.
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a resize to `width` x `height` observed at `now`; replaces any pending size.
    pub fn notify(&mut self, width: u32, height: u32, now: Instant) {
        self.pending = Some(((width, height), now));
    }

    /// Whether a resize is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the latest size once `quiet` has elapsed since the last event.
    pub fn poll(&mut self, now: Instant) -> Option<(u32, u32)> {
        let (size, at) = self.pending?;
        if now.saturating_duration_since(at) < self.quiet {
            return None;
        }
        self.pending = None;
        Some(size)
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/debounce.rs"]
mod tests;
