//! Lifecycle events delivered to the observer.

/// Activity lifecycle signals forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The foreground activity was paused.
    Pause,
    /// An activity came (back) to the foreground.
    Resume,
    /// The activity is being destroyed; last chance to commit.
    Destroy,
    /// Stop the dispatcher thread. Not an activity signal.
    Shutdown,
}
