//! Core systems for Dynamic App Icon.
//!
//! Android has no API for switching the launcher icon at runtime. The icon is
//! simulated by declaring one activity-alias per alternate icon and toggling
//! which of them is enabled. Doing that safely takes a small state machine:
//!
//! - **Ledger**: the single pending icon change ([`Ledger`], [`PendingChange`])
//! - **Request handler**: records requests without touching the OS ([`IconRequestHandler`])
//! - **Lifecycle observer**: commits once the app has really left the
//!   foreground ([`LifecycleObserver`], [`LifecycleDispatcher`])
//! - **Reconciler**: applies the change to the component table and guarantees
//!   a launchable entry point survives ([`ComponentReconciler`])
//!
//! The OS sits behind the traits in [`platform`]; [`memory`] provides
//! in-memory implementations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use dynamic_app_icon_core::{
//!     ComponentName, ComponentReconciler, IconConfig, IconRequestHandler, InMemoryHostContext,
//!     InMemoryManifestStore, Ledger, LifecycleObserver, ManualClock,
//! };
//!
//! let config = Arc::new(IconConfig::default());
//! let store = Arc::new(InMemoryManifestStore::launcher_set(
//!     "com.app",
//!     ".MainActivity",
//!     &["light", "dark"],
//! ));
//! let context = Arc::new(InMemoryHostContext::new("com.app"));
//! context.set_current_activity(Some(ComponentName::new("com.app", ".MainActivity")));
//!
//! let ledger = Ledger::new();
//! let handler = IconRequestHandler::new(ledger.clone(), context, config.clone());
//! let clock = ManualClock::new();
//! let mut observer = LifecycleObserver::new(
//!     ledger,
//!     ComponentReconciler::new(store.clone(), config.clone()),
//!     config.grace_delay(),
//!     clock.clone(),
//! );
//!
//! handler.set_icon(Some("dark"));
//! observer.on_pause();
//! clock.advance(config.grace_delay() + Duration::from_millis(1));
//! observer.poll();
//!
//! assert_eq!(store.enabled_classes(), vec!["com.app.MainActivitydark"]);
//! ```

mod component;
mod config;
mod dispatcher;
mod error;
mod event;
mod icon;
mod ledger;
mod lifecycle;
pub mod logging;
pub mod memory;
pub mod platform;
mod reconciler;
mod request;
mod timer;

pub use component::{ComponentInfo, ComponentName, EnabledState, KillPolicy};
pub use config::{
    CommitOrder, DEFAULT_GRACE_DELAY_MS, DEFAULT_IOS_ICON_PREFIX, DEFAULT_MAIN_ACTIVITY,
    IconConfig, MAX_GRACE_DELAY_MS,
};
pub use dispatcher::{DISPATCHER_THREAD_NAME, LifecycleDispatcher, LifecycleProxy};
pub use error::{IconError, PlatformError, PlatformResult, Result, TimerError};
pub use event::LifecycleEvent;
pub use icon::{DEFAULT_ICON, IconIdentifier, SetIconOutcome};
pub use ledger::{Ledger, PendingChange};
pub use lifecycle::{LifecycleObserver, LifecycleState};
pub use memory::{InMemoryHostContext, InMemoryManifestStore, StoreCall};
pub use platform::{AlternateIconResolver, ComponentManifestStore, HostContext};
pub use reconciler::{AbandonReason, CommitOutcome, CommitReport, ComponentReconciler};
pub use request::IconRequestHandler;
pub use timer::{Clock, ManualClock, SystemClock, TimerId, TimerManager};
