//! One-shot timers driven by a pluggable clock.
//!
//! The lifecycle observer uses these for the grace delay between a pause and
//! the commit it schedules. Timers are polled, never slept on: the owner asks
//! for [`TimerManager::time_until_next`] and calls
//! [`TimerManager::process_expired`] when it is due. A stopped timer is removed
//! from the table immediately, so it cannot fire after `stop` returns.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and advance the
/// clock the observer is reading.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer fires.
    fire_at: Instant,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages one-shot timers.
pub struct TimerManager<C: Clock = SystemClock> {
    clock: C,
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl<C: Clock> TimerManager<C> {
    /// Create a timer manager reading `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// The clock this manager reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a one-shot timer that fires after `delay`.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, delay: Duration) -> TimerId {
        let fire_at = self.clock.now() + delay;
        let id = self.timers.insert(TimerData { fire_at });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: fire_at,
        });
        tracing::trace!(target: targets::TIMER, ?id, ?delay, "timer started");
        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer already fired or was stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId),
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        // Clean up any stopped timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }

        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Remove and return every timer whose fire time has passed.
    #[tracing::instrument(skip(self), target = "dynamic_app_icon_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_time > now {
                break;
            }
            let Some(entry) = self.queue.pop() else {
                break;
            };

            // Stopped timers leave their queue entry behind.
            let due = self
                .timers
                .get(entry.id)
                .is_some_and(|timer| timer.fire_at <= now);
            if due && self.timers.remove(entry.id).is_some() {
                tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
                fired.push(entry.id);
            }
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Default for TimerManager<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let clock = ManualClock::new();
        let mut timers = TimerManager::new(clock.clone());
        let id = timers.start_one_shot(Duration::from_millis(500));

        assert!(timers.process_expired().is_empty());
        clock.advance(Duration::from_millis(499));
        assert!(timers.process_expired().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(!timers.is_active(id));
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let clock = ManualClock::new();
        let mut timers = TimerManager::new(clock.clone());
        let id = timers.start_one_shot(Duration::from_millis(100));

        timers.stop(id).unwrap();
        clock.advance(Duration::from_secs(1));

        assert!(timers.process_expired().is_empty());
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert_eq!(timers.time_until_next(), None);
    }

    #[test]
    fn test_replacement_timer_keeps_its_own_deadline() {
        let clock = ManualClock::new();
        let mut timers = TimerManager::new(clock.clone());
        let stopped = timers.start_one_shot(Duration::from_millis(100));
        timers.stop(stopped).unwrap();
        let replacement = timers.start_one_shot(Duration::from_millis(500));

        clock.advance(Duration::from_millis(200));
        assert!(timers.process_expired().is_empty());
        assert!(timers.is_active(replacement));

        clock.advance(Duration::from_millis(300));
        assert_eq!(timers.process_expired(), vec![replacement]);
    }

    #[test]
    fn test_time_until_next() {
        let clock = ManualClock::new();
        let mut timers = TimerManager::new(clock.clone());
        assert_eq!(timers.time_until_next(), None);

        timers.start_one_shot(Duration::from_millis(300));
        timers.start_one_shot(Duration::from_millis(100));
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(100)));

        clock.advance(Duration::from_millis(150));
        assert_eq!(timers.time_until_next(), Some(Duration::ZERO));
        assert_eq!(timers.process_expired().len(), 1);
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(150)));
    }

    #[test]
    fn test_fire_order() {
        let clock = ManualClock::new();
        let mut timers = TimerManager::new(clock.clone());
        let late = timers.start_one_shot(Duration::from_millis(20));
        let early = timers.start_one_shot(Duration::from_millis(10));

        clock.advance(Duration::from_millis(30));
        assert_eq!(timers.process_expired(), vec![early, late]);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_system_clock_timer() {
        let mut timers = TimerManager::default();
        let id = timers.start_one_shot(Duration::from_millis(5));
        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(timers.process_expired(), vec![id]);
    }
}
