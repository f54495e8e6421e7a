//! The icon request handler.
//!
//! Requests only declare intent: they are written to the [`Ledger`] and
//! applied later by the lifecycle observer, because the component backing the
//! foreground activity must not be disabled while it is in front.

use std::sync::Arc;

use crate::component::ComponentName;
use crate::config::IconConfig;
use crate::error::{IconError, Result};
use crate::icon::{IconIdentifier, SetIconOutcome};
use crate::ledger::Ledger;
use crate::logging::targets;
use crate::platform::HostContext;

/// Entry point for icon change requests and icon queries.
pub struct IconRequestHandler {
    ledger: Ledger,
    context: Arc<dyn HostContext>,
    config: Arc<IconConfig>,
}

impl IconRequestHandler {
    /// Create a handler writing into `ledger`.
    pub fn new(ledger: Ledger, context: Arc<dyn HostContext>, config: Arc<IconConfig>) -> Self {
        Self {
            ledger,
            context,
            config,
        }
    }

    /// The ledger this handler writes into.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Request a switch to `name` (`None` for the primary icon).
    ///
    /// Returns immediately; the change is committed on the next backgrounding.
    /// Never fails loudly: problems are logged and reported as
    /// [`SetIconOutcome::Failed`].
    pub fn set_icon(&self, name: Option<&str>) -> SetIconOutcome {
        match self.try_set_icon(name) {
            Ok(icon) => SetIconOutcome::Requested(icon),
            Err(err) => {
                tracing::warn!(target: targets::REQUEST, ?name, error = %err, "icon request failed");
                SetIconOutcome::Failed
            }
        }
    }

    fn try_set_icon(&self, name: Option<&str>) -> Result<IconIdentifier> {
        let icon = IconIdentifier::from_request(name);
        if let IconIdentifier::Alternate(name) = &icon {
            if !self.config.is_declared(name) {
                return Err(IconError::UndeclaredIcon { name: name.clone() });
            }
        }

        let package = self.context.package_name()?;
        let mut change = self.ledger.lock();
        let package = change.capture_owner_package(&package).to_owned();

        let main_activity = self.config.main_activity_class(&package);
        let target = match &icon {
            IconIdentifier::Default => main_activity.clone(),
            IconIdentifier::Alternate(name) => format!("{main_activity}{name}"),
        };

        // Pending target first, then the last commit, then what is running.
        let current = match change.effective_target() {
            Some(pending) => pending.to_owned(),
            None => self
                .context
                .current_activity()
                .filter(|activity| activity.package() == package)
                .map(|activity| activity.class_name().to_owned())
                .unwrap_or(main_activity),
        };

        if current == target {
            tracing::debug!(target: targets::REQUEST, icon = %icon, "icon already requested");
            return Ok(icon);
        }

        change.request(ComponentName::new(package, current), target);
        tracing::info!(target: targets::REQUEST, icon = %icon, "icon change pending");
        Ok(icon)
    }

    /// The icon that is pending or, with nothing pending, the one the last
    /// commit enabled. Before any commit, the icon the foreground activity was
    /// launched through.
    pub fn get_icon(&self) -> IconIdentifier {
        let (package, class_name) = {
            let change = self.ledger.lock();
            let package = change
                .owner_package()
                .map(str::to_owned)
                .or_else(|| self.context.package_name().ok());
            let class_name = change.effective_target().map(str::to_owned).or_else(|| {
                self.context
                    .current_activity()
                    .map(|activity| activity.class_name().to_owned())
            });
            (package, class_name)
        };

        let (Some(package), Some(class_name)) = (package, class_name) else {
            return IconIdentifier::Default;
        };

        let main_activity = self.config.main_activity_class(&package);
        match class_name.strip_prefix(main_activity.as_str()) {
            Some("") => IconIdentifier::Default,
            Some(icon) if self.config.is_declared(icon) => {
                IconIdentifier::Alternate(icon.to_owned())
            }
            Some(_) | None => {
                tracing::debug!(
                    target: targets::REQUEST,
                    class_name = %class_name,
                    "foreground component is not a managed launcher entry"
                );
                IconIdentifier::Default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryHostContext;

    fn handler_with(config: IconConfig) -> (IconRequestHandler, Arc<InMemoryHostContext>) {
        let context = Arc::new(InMemoryHostContext::new("com.app"));
        context.set_current_activity(Some(ComponentName::new("com.app", ".MainActivity")));
        let handler = IconRequestHandler::new(Ledger::new(), context.clone(), Arc::new(config));
        (handler, context)
    }

    fn handler() -> (IconRequestHandler, Arc<InMemoryHostContext>) {
        handler_with(IconConfig::default())
    }

    #[test]
    fn test_set_icon_records_target() {
        let (handler, _) = handler();
        let outcome = handler.set_icon(Some("dark"));

        assert_eq!(
            outcome,
            SetIconOutcome::Requested(IconIdentifier::Alternate("dark".into()))
        );
        let change = handler.ledger().snapshot();
        assert_eq!(change.target(), Some("com.app.MainActivitydark"));
        assert_eq!(change.owner_package(), Some("com.app"));
        assert!(change.is_dirty());
        assert!(
            change
                .stale_aliases()
                .contains(&ComponentName::new("com.app", ".MainActivity"))
        );
    }

    #[test]
    fn test_default_when_already_default_is_noop() {
        let (handler, _) = handler();
        assert_eq!(
            handler.set_icon(None),
            SetIconOutcome::Requested(IconIdentifier::Default)
        );
        assert!(!handler.ledger().is_dirty());
        assert!(handler.ledger().snapshot().stale_aliases().is_empty());
    }

    #[test]
    fn test_repeat_request_is_idempotent() {
        let (handler, _) = handler();
        handler.set_icon(Some("dark"));
        let before = handler.ledger().snapshot();

        let outcome = handler.set_icon(Some("dark"));
        assert_eq!(outcome.icon().map(IconIdentifier::as_str), Some("dark"));
        assert_eq!(handler.ledger().snapshot(), before);
    }

    #[test]
    fn test_last_write_wins() {
        let (handler, _) = handler();
        handler.set_icon(Some("light"));
        handler.set_icon(Some("dark"));

        let change = handler.ledger().snapshot();
        assert_eq!(change.target(), Some("com.app.MainActivitydark"));
        assert!(
            change
                .stale_aliases()
                .contains(&ComponentName::new("com.app", "com.app.MainActivitylight"))
        );
        assert_eq!(handler.get_icon(), IconIdentifier::Alternate("dark".into()));
    }

    #[test]
    fn test_get_icon_from_foreground_activity() {
        let (handler, context) = handler();
        assert_eq!(handler.get_icon(), IconIdentifier::Default);

        context.set_current_activity(Some(ComponentName::new(
            "com.app",
            "com.app.MainActivitylight",
        )));
        assert_eq!(handler.get_icon(), IconIdentifier::Alternate("light".into()));
    }

    #[test]
    fn test_get_icon_ignores_undeclared_activity() {
        let config = IconConfig {
            declared_icons: vec!["light".into(), "dark".into()],
            ..IconConfig::default()
        };
        let (handler, context) = handler_with(config);
        context.set_current_activity(Some(ComponentName::new(
            "com.app",
            "com.app.MainActivityDetails",
        )));
        assert_eq!(handler.get_icon(), IconIdentifier::Default);
    }

    #[test]
    fn test_committed_alias_answers_get_icon() {
        let (handler, _) = handler();
        handler.set_icon(Some("dark"));
        handler.ledger().lock().settle();
        handler
            .ledger()
            .lock()
            .record_committed(Some("com.app.MainActivitydark".into()));

        // The foreground activity is still the main one until relaunch.
        assert_eq!(handler.get_icon(), IconIdentifier::Alternate("dark".into()));
        handler.set_icon(Some("dark"));
        assert!(!handler.ledger().is_dirty());
    }

    #[test]
    fn test_rerequest_after_fallback() {
        let (handler, _) = handler();
        handler.set_icon(Some("dark"));
        handler.ledger().lock().settle();
        handler
            .ledger()
            .lock()
            .record_committed(Some("com.app.MainActivity".into()));

        assert_eq!(handler.get_icon(), IconIdentifier::Default);
        handler.set_icon(Some("dark"));
        assert!(handler.ledger().is_dirty());
    }

    #[test]
    fn test_current_alias_becomes_stale() {
        let (handler, context) = handler();
        context.set_current_activity(Some(ComponentName::new(
            "com.app",
            "com.app.MainActivitylight",
        )));

        handler.set_icon(None);
        let change = handler.ledger().snapshot();
        assert_eq!(change.target(), Some("com.app.MainActivity"));
        assert!(
            change
                .stale_aliases()
                .contains(&ComponentName::new("com.app", "com.app.MainActivitylight"))
        );
    }

    #[test]
    fn test_detached_context_fails_soft() {
        let handler = IconRequestHandler::new(
            Ledger::new(),
            Arc::new(InMemoryHostContext::detached()),
            Arc::new(IconConfig::default()),
        );
        assert_eq!(handler.set_icon(Some("dark")), SetIconOutcome::Failed);
        assert!(!handler.ledger().is_dirty());
        assert_eq!(handler.get_icon(), IconIdentifier::Default);
    }

    #[test]
    fn test_declared_icons_enforced() {
        let config = IconConfig {
            declared_icons: vec!["light".into(), "dark".into()],
            ..IconConfig::default()
        };
        let (handler, _) = handler_with(config);

        assert_eq!(handler.set_icon(Some("sepia")), SetIconOutcome::Failed);
        assert!(handler.set_icon(Some("light")).is_requested());
        assert!(handler.set_icon(None).is_requested());
    }

    #[test]
    fn test_default_sentinel_string() {
        let (handler, _) = handler();
        handler.set_icon(Some("dark"));
        assert_eq!(
            handler.set_icon(Some("DEFAULT")),
            SetIconOutcome::Requested(IconIdentifier::Default)
        );
        assert_eq!(
            handler.ledger().snapshot().target(),
            Some("com.app.MainActivity")
        );
    }
}
