//! Courtesy pacing between requests.
//!
//! Before every request the client sleeps for a duration picked at random
//! from a small fixed set, which spreads requests out instead of bursting.
//! An empty set disables pacing entirely.

use std::time::Duration;

use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Default)]
pub struct Pacer {
    pauses: Vec<Duration>,
}

impl Pacer {
    #[must_use]
    pub fn new(pauses: Vec<Duration>) -> Self {
        Self { pauses }
    }

    /// A pacer that never sleeps.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Picks the delay for the next request, or `None` when pacing is off.
    pub(crate) fn next_delay(&self) -> Option<Duration> {
        self.pauses.choose(&mut rand::rng()).copied()
    }

    /// Sleeps for a randomly chosen delay from the configured set.
    pub(crate) async fn pause(&self) {
        let Some(delay) = self.next_delay() else {
            return;
        };
        if delay.is_zero() {
            return;
        }
        tracing::debug!(delay_ms = delay.as_millis(), "pausing before request");
        tokio::time::sleep(delay).await;
    }
}
