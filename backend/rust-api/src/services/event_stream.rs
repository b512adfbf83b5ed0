//! Paced viewing-event streams.
//!
//! A stream pairs two sequences: a cadence that ticks once per interval and an
//! unbounded generator of synthetic [`ViewingEvent`]s. Each tick pulls exactly
//! one payload and the tick counter itself is discarded. Payloads are cheap,
//! so they are only built once their tick has fired; nothing is produced
//! ahead of demand.
//!
//! Dropping the stream is cancellation: the timer goes with it and no further
//! work is scheduled.

use chrono::Local;
use futures::Stream;
use rand::rngs::StdRng;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::models::{Movie, ViewingEvent, USERS};
use crate::services::random::pick;

/// Fixed-interval tick source. The first tick fires one full interval after
/// creation; missed ticks are delayed rather than bursted.
pub struct Cadence {
    interval: Interval,
    ticks: u64,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, ticks: 0 }
    }

    /// Resolves with the 1-based tick count once the next tick elapses.
    pub fn poll_tick(&mut self, cx: &mut Context<'_>) -> Poll<u64> {
        match self.interval.poll_tick(cx) {
            Poll::Ready(_) => {
                self.ticks += 1;
                Poll::Ready(self.ticks)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Infinite payload sequence for one movie.
pub struct ViewingEventGenerator {
    movie: Movie,
    rng: StdRng,
}

impl ViewingEventGenerator {
    pub fn new(movie: Movie, rng: StdRng) -> Self {
        Self { movie, rng }
    }

    pub fn next_event(&mut self) -> ViewingEvent {
        ViewingEvent {
            movie: self.movie.clone(),
            occurred_on: Local::now().date_naive(),
            user: pick(&mut self.rng, &USERS).to_string(),
        }
    }
}

impl Iterator for ViewingEventGenerator {
    type Item = ViewingEvent;

    fn next(&mut self) -> Option<ViewingEvent> {
        Some(self.next_event())
    }
}

/// One subscription: waits for a tick, emits one event, waits again.
pub struct ViewingEventStream {
    cadence: Cadence,
    payloads: ViewingEventGenerator,
    emitted: u64,
    active: Arc<AtomicUsize>,
}

impl ViewingEventStream {
    /// `active` counts open subscriptions; it is decremented when this stream is dropped.
    pub fn new(movie: Movie, period: Duration, rng: StdRng, active: Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Event stream opened for movie {} (period {:?})", movie.id, period);
        Self {
            cadence: Cadence::new(period),
            payloads: ViewingEventGenerator::new(movie, rng),
            emitted: 0,
            active,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.payloads.movie
    }
}

impl Stream for ViewingEventStream {
    type Item = ViewingEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<ViewingEvent>> {
        match self.cadence.poll_tick(cx) {
            Poll::Ready(tick) => {
                let event = self.payloads.next_event();
                self.emitted += 1;
                tracing::trace!(tick, user = %event.user, "Emitting viewing event for {}", event.movie.id);
                Poll::Ready(Some(event))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for ViewingEventStream {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!(
            "Event stream for movie {} cancelled after {} events",
            self.payloads.movie.id,
            self.emitted
        );
    }
}
