//! The component reconciler.
//!
//! Applies the ledger's desired icon to the package manager's component table.
//! The sweep covers every launcher entry (the main activity and every alias
//! targeting it), not only the aliases the ledger recorded as stale, so a
//! commit also repairs any earlier inconsistent state. Other activities are
//! never touched, whatever their names.
//!
//! Each toggle is attempted independently. Failures are logged and collected
//! in the [`CommitReport`]; nothing is returned as an error because the commit
//! runs from a lifecycle callback that no caller is waiting on.

use std::sync::Arc;

use crate::component::{ComponentInfo, ComponentName, EnabledState, KillPolicy};
use crate::config::{CommitOrder, IconConfig};
use crate::error::PlatformError;
use crate::ledger::{Ledger, PendingChange};
use crate::logging::targets;
use crate::platform::ComponentManifestStore;

/// Why a commit was abandoned before touching any component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    /// No request ever captured the owning package.
    MissingPackage,
    /// The component listing could not be read.
    ListingFailed(PlatformError),
    /// The target alias is not declared in the manifest.
    TargetNotDeclared,
}

/// What a commit attempt did overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The ledger was clean; nothing was attempted.
    NothingPending,
    /// The change was dropped without touching any component.
    Abandoned(AbandonReason),
    /// Every managed component was visited.
    Completed,
}

/// The record of one commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    /// What happened overall.
    pub outcome: CommitOutcome,
    /// The alias class the commit aimed for.
    pub target: Option<String>,
    /// Components successfully disabled.
    pub disabled: Vec<ComponentName>,
    /// The target, if enabling it succeeded.
    pub enabled: Option<ComponentName>,
    /// Toggles that failed, in the order attempted.
    pub failures: Vec<(ComponentName, PlatformError)>,
    /// Whether the main activity had to be force-enabled.
    pub fallback_applied: bool,
}

impl CommitReport {
    fn new(outcome: CommitOutcome, target: Option<String>) -> Self {
        Self {
            outcome,
            target,
            disabled: Vec::new(),
            enabled: None,
            failures: Vec::new(),
            fallback_applied: false,
        }
    }

    /// Whether the commit completed without a single failed toggle.
    pub fn is_clean(&self) -> bool {
        self.outcome == CommitOutcome::Completed && self.failures.is_empty()
    }
}

/// Applies pending changes to a [`ComponentManifestStore`].
pub struct ComponentReconciler {
    store: Arc<dyn ComponentManifestStore>,
    config: Arc<IconConfig>,
}

impl ComponentReconciler {
    /// Create a reconciler writing through `store`.
    pub fn new(store: Arc<dyn ComponentManifestStore>, config: Arc<IconConfig>) -> Self {
        Self { store, config }
    }

    /// Commit whatever `ledger` holds.
    ///
    /// The ledger stays locked for the whole commit so a concurrent request is
    /// applied by the next commit instead of being cleared by this one. The
    /// ledger is settled (not dirty, no stale aliases) when this returns, no
    /// matter how many toggles failed.
    #[tracing::instrument(skip_all, target = "dynamic_app_icon_core::reconciler", level = "debug")]
    pub fn commit(&self, ledger: &Ledger) -> CommitReport {
        let mut change = ledger.lock();
        let report = self.commit_locked(&mut change);
        tracing::debug!(
            target: targets::RECONCILER,
            outcome = ?report.outcome,
            disabled = report.disabled.len(),
            failures = report.failures.len(),
            fallback = report.fallback_applied,
            "commit finished"
        );
        report
    }

    fn commit_locked(&self, change: &mut PendingChange) -> CommitReport {
        let target = match change.target() {
            Some(target) if change.is_dirty() => target.to_owned(),
            _ => return CommitReport::new(CommitOutcome::NothingPending, None),
        };

        let Some(package) = change.owner_package().map(str::to_owned) else {
            change.abandon();
            return self.abandoned(AbandonReason::MissingPackage, target);
        };

        let components = match self.store.list_components(&package) {
            Ok(components) => components,
            Err(err) => {
                change.abandon();
                return self.abandoned(AbandonReason::ListingFailed(err), target);
            }
        };

        let target_name = ComponentName::new(package.as_str(), target.as_str());
        if !components.iter().any(|info| info.name == target_name) {
            change.abandon();
            return self.abandoned(AbandonReason::TargetNotDeclared, target);
        }

        let stale = change.settle();
        let main_activity = self.config.main_activity_class(&package);
        let to_disable: Vec<ComponentName> = components
            .iter()
            .filter(|info| info.name != target_name && info.is_enabled())
            .filter(|info| self.is_launcher_entry(info, &main_activity))
            .map(|info| info.name.clone())
            .collect();
        tracing::trace!(
            target: targets::RECONCILER,
            stale = stale.len(),
            to_disable = to_disable.len(),
            "sweeping launcher entries"
        );

        let mut report = CommitReport::new(CommitOutcome::Completed, Some(target));
        match self.config.commit_order {
            CommitOrder::DisableFirst => {
                self.disable_all(&to_disable, &mut report);
                self.enable_target(&target_name, &mut report);
            }
            CommitOrder::EnableFirst => {
                self.enable_target(&target_name, &mut report);
                self.disable_all(&to_disable, &mut report);
            }
        }

        self.ensure_entry_point(&package, &main_activity, &mut report);

        let committed = if report.enabled.is_some() {
            Some(target_name.class_name().to_owned())
        } else if report.fallback_applied {
            Some(main_activity)
        } else {
            None
        };
        change.record_committed(committed);

        tracing::info!(
            target: targets::RECONCILER,
            target_component = %target_name,
            clean = report.is_clean(),
            "icon change committed"
        );
        report
    }

    fn abandoned(&self, reason: AbandonReason, target: String) -> CommitReport {
        tracing::warn!(
            target: targets::RECONCILER,
            target_component = %target,
            reason = ?reason,
            "icon change abandoned"
        );
        CommitReport::new(CommitOutcome::Abandoned(reason), Some(target))
    }

    fn disable_all(&self, components: &[ComponentName], report: &mut CommitReport) {
        for component in components {
            if self.toggle(component, EnabledState::Disabled, report) {
                report.disabled.push(component.clone());
            }
        }
    }

    fn enable_target(&self, target: &ComponentName, report: &mut CommitReport) {
        if self.toggle(target, EnabledState::Enabled, report) {
            report.enabled = Some(target.clone());
        }
    }

    /// Force the main activity on if the sweep left no managed entry point.
    fn ensure_entry_point(&self, package: &str, main_activity: &str, report: &mut CommitReport) {
        let components = match self.store.list_components(package) {
            Ok(components) => components,
            Err(err) => {
                tracing::warn!(
                    target: targets::RECONCILER,
                    error = %err,
                    "could not verify launcher entry points after commit"
                );
                return;
            }
        };

        let any_enabled = components
            .iter()
            .any(|info| self.is_launcher_entry(info, main_activity) && info.is_enabled());
        if any_enabled {
            return;
        }

        tracing::warn!(
            target: targets::RECONCILER,
            main_activity = %main_activity,
            "no launcher entry point left enabled, restoring main activity"
        );
        let main = ComponentName::new(package, main_activity);
        if self.toggle(&main, EnabledState::Enabled, report) {
            report.fallback_applied = true;
        }
    }

    /// The main activity, an alias the store reports as targeting it, or one
    /// of the configured `main_activity + icon` aliases.
    fn is_launcher_entry(&self, info: &ComponentInfo, main_activity: &str) -> bool {
        let class_name = info.name.class_name();
        if class_name == main_activity || info.targets(main_activity) {
            return true;
        }
        class_name
            .strip_prefix(main_activity)
            .is_some_and(|icon| self.config.declared_icons.iter().any(|name| name == icon))
    }

    fn toggle(&self, component: &ComponentName, state: EnabledState, report: &mut CommitReport) -> bool {
        match self
            .store
            .set_enabled_state(component, state, KillPolicy::DontKillApp)
        {
            Ok(()) => {
                tracing::trace!(target: targets::RECONCILER, %component, ?state, "component toggled");
                true
            }
            Err(err) => {
                tracing::warn!(
                    target: targets::RECONCILER,
                    %component,
                    ?state,
                    error = %err,
                    "component toggle failed"
                );
                report.failures.push((component.clone(), err));
                false
            }
        }
    }
}
