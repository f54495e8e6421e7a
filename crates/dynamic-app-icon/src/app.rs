//! The application-facing icon API.

use std::sync::Arc;

use crossbeam_channel::Sender;

use dynamic_app_icon_core::logging::targets;
use dynamic_app_icon_core::{
    AlternateIconResolver, CommitReport, ComponentManifestStore, ComponentReconciler, HostContext,
    IconConfig, IconError, IconIdentifier, IconRequestHandler, Ledger, LifecycleDispatcher,
    LifecycleObserver, LifecycleProxy, Result, SetIconOutcome, SystemClock,
};

use crate::target::Platform;

enum Backend {
    Android {
        handler: IconRequestHandler,
        dispatcher: LifecycleDispatcher,
    },
    Ios {
        resolver: Arc<dyn AlternateIconResolver>,
        config: Arc<IconConfig>,
    },
    Unsupported {
        platform: Platform,
    },
}

/// Switches the launcher icon.
///
/// On Android a request is only recorded; the component table is rewritten
/// after the app has stayed in the background for the grace delay, so the
/// host must forward its lifecycle callbacks through [`DynamicAppIcon::lifecycle`].
/// On iOS requests go straight to the system.
pub struct DynamicAppIcon {
    backend: Backend,
}

impl DynamicAppIcon {
    /// Android backend. Spawns the lifecycle dispatcher thread.
    pub fn android(
        store: Arc<dyn ComponentManifestStore>,
        context: Arc<dyn HostContext>,
        config: IconConfig,
    ) -> Result<Self> {
        Self::android_inner(store, context, config, None)
    }

    /// Android backend that also publishes every commit report to `reports`.
    pub fn android_with_reports(
        store: Arc<dyn ComponentManifestStore>,
        context: Arc<dyn HostContext>,
        config: IconConfig,
        reports: Sender<CommitReport>,
    ) -> Result<Self> {
        Self::android_inner(store, context, config, Some(reports))
    }

    fn android_inner(
        store: Arc<dyn ComponentManifestStore>,
        context: Arc<dyn HostContext>,
        config: IconConfig,
        reports: Option<Sender<CommitReport>>,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let ledger = Ledger::new();

        let handler = IconRequestHandler::new(ledger.clone(), context, config.clone());
        let observer = LifecycleObserver::new(
            ledger,
            ComponentReconciler::new(store, config.clone()),
            config.grace_delay(),
            SystemClock,
        );
        let dispatcher = match reports {
            Some(reports) => LifecycleDispatcher::spawn_with_reports(observer, reports)?,
            None => LifecycleDispatcher::spawn(observer)?,
        };

        Ok(Self {
            backend: Backend::Android {
                handler,
                dispatcher,
            },
        })
    }

    /// iOS backend over the system's alternate icon API.
    pub fn ios(resolver: Arc<dyn AlternateIconResolver>, config: IconConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend: Backend::Ios {
                resolver,
                config: Arc::new(config),
            },
        })
    }

    /// A backend for a platform without icon switching. Every call fails.
    pub fn unsupported(platform: Platform) -> Self {
        Self {
            backend: Backend::Unsupported { platform },
        }
    }

    /// The platform this instance drives.
    pub fn platform(&self) -> Platform {
        match &self.backend {
            Backend::Android { .. } => Platform::Android,
            Backend::Ios { .. } => Platform::Ios,
            Backend::Unsupported { platform } => platform.clone(),
        }
    }

    /// Request an icon; `None`, `""` and `"DEFAULT"` mean the primary icon.
    ///
    /// On Android the change is applied once the app is in the background.
    pub fn set_app_icon(&self, name: Option<&str>) -> Result<SetIconOutcome> {
        match &self.backend {
            Backend::Android { handler, .. } => Ok(handler.set_icon(name)),
            Backend::Ios { resolver, config } => Ok(set_ios_icon(resolver.as_ref(), config, name)),
            Backend::Unsupported { platform } => Err(unsupported(platform, "set_app_icon")),
        }
    }

    /// The icon the launcher shows, or will show once a pending change lands.
    pub fn get_app_icon(&self) -> Result<IconIdentifier> {
        match &self.backend {
            Backend::Android { handler, .. } => Ok(handler.get_icon()),
            Backend::Ios { resolver, config } => Ok(get_ios_icon(resolver.as_ref(), config)),
            Backend::Unsupported { platform } => Err(unsupported(platform, "get_app_icon")),
        }
    }

    /// Where the host posts activity lifecycle callbacks. `None` off Android.
    pub fn lifecycle(&self) -> Option<LifecycleProxy> {
        match &self.backend {
            Backend::Android { dispatcher, .. } => Some(dispatcher.proxy()),
            Backend::Ios { .. } | Backend::Unsupported { .. } => None,
        }
    }

    /// Stop the dispatcher thread and wait for it. A no-op off Android.
    pub fn shutdown(&self) {
        if let Backend::Android { dispatcher, .. } = &self.backend {
            dispatcher.shutdown();
        }
    }
}

fn unsupported(platform: &Platform, operation: &str) -> IconError {
    tracing::error!(
        target: targets::CORE,
        %platform,
        operation,
        "dynamic app icons are not supported on this platform"
    );
    IconError::unsupported(platform.to_string())
}

fn set_ios_icon(
    resolver: &dyn AlternateIconResolver,
    config: &IconConfig,
    name: Option<&str>,
) -> SetIconOutcome {
    if !resolver.supports_alternate_icons() {
        tracing::warn!(target: targets::REQUEST, "alternate icons are not supported on this device");
        return SetIconOutcome::Failed;
    }

    let icon = IconIdentifier::from_request(name);
    let system_name = match &icon {
        IconIdentifier::Default => None,
        IconIdentifier::Alternate(name) => {
            if !config.is_declared(name) {
                tracing::warn!(target: targets::REQUEST, icon = %name, "icon was not declared");
                return SetIconOutcome::Failed;
            }
            Some(format!("{}{name}", config.ios_icon_prefix))
        }
    };

    match resolver.set_alternate_icon(system_name.as_deref()) {
        Ok(()) => {
            tracing::debug!(target: targets::REQUEST, %icon, "set alternate icon");
            SetIconOutcome::Requested(icon)
        }
        Err(e) => {
            tracing::warn!(target: targets::REQUEST, %icon, error = %e, "failed to set alternate icon");
            SetIconOutcome::Failed
        }
    }
}

fn get_ios_icon(resolver: &dyn AlternateIconResolver, config: &IconConfig) -> IconIdentifier {
    match resolver.alternate_icon_name() {
        Some(name) => {
            let name = name
                .strip_prefix(config.ios_icon_prefix.as_str())
                .unwrap_or(&name);
            IconIdentifier::from_request(Some(name))
        }
        None => IconIdentifier::Default,
    }
}
