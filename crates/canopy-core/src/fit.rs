//! Debounced fit-view scheduling.
//!
//! Every schedule bumps a generation counter and supersedes earlier ones; only the latest
//! generation ever fires. The scheduler stores no graph or state, just the due time.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitViewRequest {
    /// Fraction of the viewport kept free around the drawing.
    pub padding: f64,
    /// Animation length.
    pub duration: Duration,
}

impl Default for FitViewRequest {
    fn default() -> Self {
        Self {
            padding: 0.2,
            duration: Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FitScheduler {
    delay: Duration,
    request: FitViewRequest,
    generation: u64,
    due: Option<(u64, Instant)>,
}

impl Default for FitScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), FitViewRequest::default())
    }
}

impl FitScheduler {
    pub fn new(delay: Duration, request: FitViewRequest) -> Self {
        Self {
            delay,
            request,
            generation: 0,
            due: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Schedules a fit at `now + delay` and returns its generation.
    pub fn schedule(&mut self, now: Instant) -> u64 {
        self.generation += 1;
        self.due = Some((self.generation, now + self.delay));
        self.generation
    }

    /// Returns the request once the latest schedule is due. Fires at most once per schedule.
    pub fn tick(&mut self, now: Instant) -> Option<FitViewRequest> {
        match self.due {
            Some((generation, at)) if generation == self.generation && now >= at => {
                self.due = None;
                Some(self.request)
            }
            _ => None,
        }
    }

    /// For hosts with their own timers: fires when `generation` is still the latest pending one.
    pub fn fire(&mut self, generation: u64) -> Option<FitViewRequest> {
        match self.due {
            Some((pending, _)) if pending == generation => {
                self.due = None;
                Some(self.request)
            }
            _ => None,
        }
    }
}
