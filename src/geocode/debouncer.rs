//! Keystroke debouncer for geocoder searches
//!
//! Delays the search until input has been quiet for the configured period so
//! a burst of keystrokes produces a single request.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    /// Timestamp of the last input that triggered a debounce
    last_input_time: Option<Instant>,
    /// Whether a search is waiting for the delay to expire
    pending: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_input_time: None,
            pending: false,
        }
    }

    /// Schedule a search; calling again before it fires restarts the timer
    pub fn schedule(&mut self) {
        self.schedule_at(Instant::now());
    }

    fn schedule_at(&mut self, now: Instant) {
        self.last_input_time = Some(now);
        self.pending = true;
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready_at(Instant::now())
    }

    fn is_ready_at(&self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }

        match self.last_input_time {
            Some(last_time) => now.saturating_duration_since(last_time) >= self.delay,
            None => false,
        }
    }

    pub fn mark_complete(&mut self) {
        self.pending = false;
        self.last_input_time = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY_MS: u64 = 30;

    #[test]
    fn test_new_debouncer_has_no_pending() {
        let debouncer = Debouncer::new(DELAY_MS);
        assert!(!debouncer.has_pending());
        assert!(!debouncer.is_ready());
    }

    #[test]
    fn test_not_ready_immediately_after_schedule() {
        let mut debouncer = Debouncer::new(DELAY_MS);
        let start = Instant::now();
        debouncer.schedule_at(start);

        assert!(debouncer.has_pending());
        assert!(!debouncer.is_ready_at(start));
        assert!(!debouncer.is_ready_at(start + Duration::from_millis(DELAY_MS - 1)));
    }

    #[test]
    fn test_ready_after_delay() {
        let mut debouncer = Debouncer::new(DELAY_MS);
        let start = Instant::now();
        debouncer.schedule_at(start);

        assert!(debouncer.is_ready_at(start + Duration::from_millis(DELAY_MS)));
    }

    #[test]
    fn test_schedule_resets_timer() {
        let mut debouncer = Debouncer::new(DELAY_MS);
        let start = Instant::now();
        debouncer.schedule_at(start);
        debouncer.schedule_at(start + Duration::from_millis(20));

        assert!(!debouncer.is_ready_at(start + Duration::from_millis(DELAY_MS)));
        assert!(debouncer.is_ready_at(start + Duration::from_millis(20 + DELAY_MS)));
    }

    #[test]
    fn test_mark_complete_clears_state() {
        let mut debouncer = Debouncer::new(DELAY_MS);
        let start = Instant::now();
        debouncer.schedule_at(start);
        debouncer.mark_complete();

        assert!(!debouncer.has_pending());
        assert!(!debouncer.is_ready_at(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut debouncer = Debouncer::new(DELAY_MS);
        debouncer.schedule();
        debouncer.cancel();

        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_zero_delay_is_ready_at_once() {
        let mut debouncer = Debouncer::new(0);
        debouncer.schedule();
        assert!(debouncer.is_ready());
    }
}
