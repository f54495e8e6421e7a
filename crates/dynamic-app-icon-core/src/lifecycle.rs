//! The lifecycle observer.
//!
//! Android must not disable the component backing the foreground activity, so
//! pending icon changes are only committed once the app has really left the
//! foreground:
//!
//! ```text
//!               pause (dirty)               grace delay elapsed
//! Foreground ------------------> Backgrounding -----------------> Background
//!     ^                               |         (commit)               |
//!     +---------- resume -------------+-------------- resume ----------+
//! ```
//!
//! A destroy commits immediately from any state. Each pending change gets
//! exactly one commit attempt; whatever the reconciler reports, the ledger is
//! settled afterwards and the change is never retried.

use std::time::Duration;

use crate::event::LifecycleEvent;
use crate::ledger::Ledger;
use crate::logging::targets;
use crate::reconciler::{CommitOutcome, CommitReport, ComponentReconciler};
use crate::timer::{Clock, SystemClock, TimerId, TimerManager};

/// Where the app is with respect to the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// An activity is in front.
    Foreground,
    /// Paused with a change pending; the grace timer is running.
    Backgrounding(TimerId),
    /// Paused, destroyed, or past the grace delay.
    Background,
}

/// Turns lifecycle events into commits.
pub struct LifecycleObserver<C: Clock = SystemClock> {
    ledger: Ledger,
    reconciler: ComponentReconciler,
    timers: TimerManager<C>,
    grace_delay: Duration,
    state: LifecycleState,
}

impl<C: Clock> LifecycleObserver<C> {
    /// Create an observer starting in the foreground.
    pub fn new(ledger: Ledger, reconciler: ComponentReconciler, grace_delay: Duration, clock: C) -> Self {
        Self {
            ledger,
            reconciler,
            timers: TimerManager::new(clock),
            grace_delay,
            state: LifecycleState::Foreground,
        }
    }

    /// The current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The ledger this observer commits.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The configured grace delay.
    pub fn grace_delay(&self) -> Duration {
        self.grace_delay
    }

    /// Dispatch one event. Returns the report if the event caused a commit.
    pub fn handle(&mut self, event: LifecycleEvent) -> Option<CommitReport> {
        match event {
            LifecycleEvent::Pause => {
                self.on_pause();
                None
            }
            LifecycleEvent::Resume => {
                self.on_resume();
                None
            }
            LifecycleEvent::Destroy => self.on_destroy(),
            LifecycleEvent::Shutdown => None,
        }
    }

    /// The activity was paused. Schedules a commit after the grace delay if a
    /// change is pending.
    pub fn on_pause(&mut self) {
        self.cancel_grace_timer();

        if !self.ledger.is_dirty() {
            self.state = LifecycleState::Background;
            return;
        }

        let id = self.timers.start_one_shot(self.grace_delay);
        tracing::debug!(
            target: targets::LIFECYCLE,
            grace_delay = ?self.grace_delay,
            "paused with a pending icon change, waiting before commit"
        );
        self.state = LifecycleState::Backgrounding(id);
    }

    /// An activity resumed. Any scheduled commit is cancelled.
    pub fn on_resume(&mut self) {
        if self.cancel_grace_timer() {
            tracing::debug!(target: targets::LIFECYCLE, "resumed within grace delay, commit cancelled");
        }
        self.state = LifecycleState::Foreground;
    }

    /// The activity is being destroyed. Commits right away if a change is pending.
    pub fn on_destroy(&mut self) -> Option<CommitReport> {
        self.cancel_grace_timer();
        self.state = LifecycleState::Background;
        self.commit("destroy")
    }

    /// Fire the grace timer if it is due. Returns the commit report if it fired.
    pub fn poll(&mut self) -> Option<CommitReport> {
        let fired = self.timers.process_expired();
        let LifecycleState::Backgrounding(id) = self.state else {
            return None;
        };
        if !fired.contains(&id) {
            return None;
        }

        self.state = LifecycleState::Background;
        self.commit("grace delay elapsed")
    }

    /// Time until the grace timer fires, if one is running.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// Returns whether a timer was running.
    fn cancel_grace_timer(&mut self) -> bool {
        match self.state {
            LifecycleState::Backgrounding(id) => self.timers.stop(id).is_ok(),
            _ => false,
        }
    }

    fn commit(&mut self, trigger: &'static str) -> Option<CommitReport> {
        let report = self.reconciler.commit(&self.ledger);
        if report.outcome == CommitOutcome::NothingPending {
            return None;
        }
        tracing::debug!(target: targets::LIFECYCLE, trigger, outcome = ?report.outcome, "commit attempted");
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::component::ComponentName;
    use crate::config::IconConfig;
    use crate::memory::InMemoryManifestStore;
    use crate::timer::ManualClock;

    const GRACE: Duration = Duration::from_millis(500);
    const EPSILON: Duration = Duration::from_millis(1);

    struct Fixture {
        observer: LifecycleObserver<ManualClock>,
        clock: ManualClock,
        store: Arc<InMemoryManifestStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryManifestStore::launcher_set(
            "com.app",
            ".MainActivity",
            &["light", "dark"],
        ));
        let reconciler = ComponentReconciler::new(store.clone(), Arc::new(IconConfig::default()));
        let clock = ManualClock::new();
        let observer = LifecycleObserver::new(Ledger::new(), reconciler, GRACE, clock.clone());
        Fixture {
            observer,
            clock,
            store,
        }
    }

    fn request_dark(ledger: &Ledger) {
        let mut change = ledger.lock();
        change.capture_owner_package("com.app");
        change.request(
            ComponentName::new("com.app", ".MainActivity"),
            "com.app.MainActivitydark".into(),
        );
    }

    #[test]
    fn test_pause_without_change_schedules_nothing() {
        let mut f = fixture();
        f.observer.on_pause();

        assert_eq!(f.observer.state(), LifecycleState::Background);
        assert_eq!(f.observer.time_until_next(), None);
    }

    #[test]
    fn test_pause_resume_within_grace_never_commits() {
        let mut f = fixture();
        request_dark(f.observer.ledger());

        f.observer.on_pause();
        assert!(matches!(f.observer.state(), LifecycleState::Backgrounding(_)));

        f.clock.advance(GRACE - EPSILON);
        assert!(f.observer.poll().is_none());
        f.observer.on_resume();
        assert_eq!(f.observer.state(), LifecycleState::Foreground);

        f.clock.advance(GRACE * 2);
        assert!(f.observer.poll().is_none());
        assert_eq!(f.store.toggle_count(), 0);
        assert!(f.observer.ledger().is_dirty());
    }

    #[test]
    fn test_grace_elapsed_commits_once() {
        let mut f = fixture();
        request_dark(f.observer.ledger());

        f.observer.on_pause();
        f.clock.advance(GRACE + EPSILON);

        let report = f.observer.poll().expect("commit after grace delay");
        assert!(report.is_clean());
        assert_eq!(f.observer.state(), LifecycleState::Background);
        assert_eq!(f.store.enabled_classes(), vec!["com.app.MainActivitydark"]);

        let toggles = f.store.toggle_count();
        f.clock.advance(GRACE * 4);
        assert!(f.observer.poll().is_none());
        assert_eq!(f.store.toggle_count(), toggles);
    }

    #[test]
    fn test_destroy_commits_immediately() {
        let mut f = fixture();
        request_dark(f.observer.ledger());
        f.observer.on_pause();

        let report = f.observer.handle(LifecycleEvent::Destroy);
        assert!(report.is_some());
        assert!(!f.observer.ledger().is_dirty());

        // The cancelled grace timer must not commit a second time.
        f.clock.advance(GRACE * 2);
        assert!(f.observer.poll().is_none());
    }

    #[test]
    fn test_destroy_without_change_is_quiet() {
        let mut f = fixture();
        assert!(f.observer.on_destroy().is_none());
        assert_eq!(f.store.toggle_count(), 0);
    }

    #[test]
    fn test_repeated_pause_restarts_grace() {
        let mut f = fixture();
        request_dark(f.observer.ledger());

        f.observer.on_pause();
        f.clock.advance(GRACE - EPSILON);
        f.observer.on_pause();
        f.clock.advance(EPSILON * 2);
        assert!(f.observer.poll().is_none());

        f.clock.advance(GRACE);
        assert!(f.observer.poll().is_some());
    }

    #[test]
    fn test_failed_commit_is_not_retried() {
        let mut f = fixture();
        f.store.set_fail_listing(true);
        request_dark(f.observer.ledger());

        f.observer.on_pause();
        f.clock.advance(GRACE + EPSILON);
        let report = f.observer.poll().expect("attempted once");
        assert!(!report.is_clean());
        assert!(!f.observer.ledger().is_dirty());

        f.observer.on_resume();
        f.observer.on_pause();
        f.clock.advance(GRACE + EPSILON);
        assert!(f.observer.poll().is_none());
    }
}
