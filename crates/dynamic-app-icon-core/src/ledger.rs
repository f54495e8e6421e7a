//! The pending-change ledger.
//!
//! A single record, not a queue: the last request wins. The ledger is shared
//! by handle between the request handler (writer), the lifecycle observer
//! (reader) and the reconciler (settles it), and is guarded by a mutex so a
//! request issued from another thread can never interleave with a commit.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::component::ComponentName;
use crate::logging::targets;

/// The desired icon change and its bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChange {
    /// Fully-qualified alias class of the desired icon; empty when nothing is
    /// pending.
    target: Option<String>,
    /// Alias class the last commit left enabled, when it is known.
    committed: Option<String>,
    /// The application package, captured on first request.
    owner_package: Option<String>,
    /// Aliases known to be enabled that the next commit must disable.
    stale_aliases: BTreeSet<ComponentName>,
    /// Set between a request and its commit (or abandonment).
    dirty: bool,
}

impl PendingChange {
    /// The pending alias class, if a change is waiting.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The alias class the last commit left enabled.
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// The pending alias class, or else the last committed one.
    pub fn effective_target(&self) -> Option<&str> {
        self.target.as_deref().or(self.committed.as_deref())
    }

    /// The owning package, once captured.
    pub fn owner_package(&self) -> Option<&str> {
        self.owner_package.as_deref()
    }

    /// Aliases awaiting disablement.
    pub fn stale_aliases(&self) -> &BTreeSet<ComponentName> {
        &self.stale_aliases
    }

    /// Whether a change is waiting to be committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Capture the owning package. The first value sticks; an app cannot change
    /// its own package identity mid-process.
    pub fn capture_owner_package<'a>(&'a mut self, package: &'a str) -> &'a str {
        if self.owner_package.is_none() {
            self.owner_package = Some(package.to_owned());
        } else if self.owner_package.as_deref() != Some(package) {
            tracing::warn!(
                target: targets::LEDGER,
                existing = ?self.owner_package,
                reported = %package,
                "host reported a different package name; keeping the first one"
            );
        }
        self.owner_package.as_deref().unwrap_or(package)
    }

    /// Record a new desired target, marking `previous` as stale.
    ///
    /// An earlier uncommitted target is simply overwritten; its own `previous`
    /// stays in the stale set so nothing is left enabled forever.
    pub fn request(&mut self, previous: ComponentName, target: String) {
        tracing::debug!(
            target: targets::LEDGER,
            previous = %previous,
            requested = %target,
            overwrote_pending = self.dirty,
            "recorded icon change"
        );
        self.stale_aliases.insert(previous);
        self.target = Some(target);
        self.dirty = true;
    }

    /// Mark the pending change as handled: clear the target and drain the
    /// stale set.
    pub(crate) fn settle(&mut self) -> Vec<ComponentName> {
        self.dirty = false;
        self.target = None;
        std::mem::take(&mut self.stale_aliases).into_iter().collect()
    }

    /// Drop the pending change without touching the component table. The
    /// last committed alias stays as it was.
    pub(crate) fn abandon(&mut self) {
        self.settle();
    }

    /// Record what a commit left enabled; `None` when it cannot be told.
    pub(crate) fn record_committed(&mut self, class_name: Option<String>) {
        self.committed = class_name;
    }
}

/// A shared handle to the process's [`PendingChange`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    inner: Arc<Mutex<PendingChange>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the ledger for reading or mutation.
    pub fn lock(&self) -> MutexGuard<'_, PendingChange> {
        self.inner.lock()
    }

    /// A copy of the current record.
    pub fn snapshot(&self) -> PendingChange {
        self.inner.lock().clone()
    }

    /// Whether a change is waiting to be committed.
    pub fn is_dirty(&self) -> bool {
        self.inner.lock().dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_activity() -> ComponentName {
        ComponentName::new("com.app", ".MainActivity")
    }

    #[test]
    fn test_new_ledger_is_clean() {
        let ledger = Ledger::new();
        let change = ledger.snapshot();
        assert!(!change.is_dirty());
        assert!(change.target().is_none());
        assert!(change.stale_aliases().is_empty());
    }

    #[test]
    fn test_last_write_wins_keeps_stale() {
        let ledger = Ledger::new();
        {
            let mut change = ledger.lock();
            change.request(main_activity(), "com.app.MainActivitylight".into());
            change.request(
                ComponentName::new("com.app", "com.app.MainActivitylight"),
                "com.app.MainActivitydark".into(),
            );
        }

        let change = ledger.snapshot();
        assert_eq!(change.target(), Some("com.app.MainActivitydark"));
        assert_eq!(change.stale_aliases().len(), 2);
        assert!(change.is_dirty());
    }

    #[test]
    fn test_settle_drains() {
        let ledger = Ledger::new();
        ledger
            .lock()
            .request(main_activity(), "com.app.MainActivitydark".into());

        let drained = ledger.lock().settle();
        assert_eq!(drained, vec![main_activity()]);
        assert!(!ledger.is_dirty());
        assert!(ledger.snapshot().target().is_none());
    }

    #[test]
    fn test_effective_target_prefers_pending() {
        let ledger = Ledger::new();
        {
            let mut change = ledger.lock();
            change.record_committed(Some("com.app.MainActivitylight".into()));
            assert_eq!(change.effective_target(), Some("com.app.MainActivitylight"));

            change.request(main_activity(), "com.app.MainActivitydark".into());
            assert_eq!(change.effective_target(), Some("com.app.MainActivitydark"));

            change.abandon();
        }

        let change = ledger.snapshot();
        assert!(change.target().is_none());
        assert_eq!(change.committed(), Some("com.app.MainActivitylight"));
        assert_eq!(change.effective_target(), Some("com.app.MainActivitylight"));
    }

    #[test]
    fn test_abandon_clears_target() {
        let ledger = Ledger::new();
        ledger
            .lock()
            .request(main_activity(), "com.app.MainActivitynope".into());
        ledger.lock().abandon();

        let change = ledger.snapshot();
        assert!(change.target().is_none());
        assert!(!change.is_dirty());
    }

    #[test]
    fn test_owner_package_is_sticky() {
        let mut change = PendingChange::default();
        assert_eq!(change.capture_owner_package("com.app"), "com.app");
        assert_eq!(change.capture_owner_package("com.other"), "com.app");
        assert_eq!(change.owner_package(), Some("com.app"));
    }
}
