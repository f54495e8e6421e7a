//! Single-consumer delivery of lifecycle events.
//!
//! The host forwards activity callbacks through a [`LifecycleProxy`] from
//! whatever thread it receives them on. One dedicated thread owns the
//! [`LifecycleObserver`], so events, grace timers and commits are processed
//! strictly one at a time.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dynamic_app_icon_core::{
//!     ComponentReconciler, IconConfig, InMemoryManifestStore, Ledger, LifecycleDispatcher,
//!     LifecycleObserver, SystemClock,
//! };
//!
//! let config = Arc::new(IconConfig::default());
//! let store = Arc::new(InMemoryManifestStore::launcher_set("com.app", ".MainActivity", &["dark"]));
//! let reconciler = ComponentReconciler::new(store, config.clone());
//! let observer = LifecycleObserver::new(Ledger::new(), reconciler, config.grace_delay(), SystemClock);
//!
//! let dispatcher = LifecycleDispatcher::spawn(observer)?;
//! let proxy = dispatcher.proxy();
//! proxy.pause()?;
//! proxy.resume()?;
//! dispatcher.shutdown();
//! # Ok::<(), dynamic_app_icon_core::IconError>(())
//! ```

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use parking_lot::Mutex;

use crate::error::{IconError, Result};
use crate::event::LifecycleEvent;
use crate::lifecycle::LifecycleObserver;
use crate::logging::targets;
use crate::reconciler::CommitReport;
use crate::timer::Clock;

/// Name of the dispatcher thread.
pub const DISPATCHER_THREAD_NAME: &str = "dynamic-app-icon-lifecycle";

/// A cloneable handle for posting lifecycle events.
#[derive(Debug, Clone)]
pub struct LifecycleProxy {
    sender: Sender<LifecycleEvent>,
}

impl LifecycleProxy {
    /// Post an event to the dispatcher thread.
    pub fn post(&self, event: LifecycleEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| IconError::DispatcherExited)
    }

    /// Forward an activity pause.
    pub fn pause(&self) -> Result<()> {
        self.post(LifecycleEvent::Pause)
    }

    /// Forward an activity resume.
    pub fn resume(&self) -> Result<()> {
        self.post(LifecycleEvent::Resume)
    }

    /// Forward an activity destroy.
    pub fn destroy(&self) -> Result<()> {
        self.post(LifecycleEvent::Destroy)
    }
}

/// Owns the thread that runs a [`LifecycleObserver`].
pub struct LifecycleDispatcher {
    proxy: LifecycleProxy,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl LifecycleDispatcher {
    /// Start the dispatcher thread.
    pub fn spawn<C: Clock + 'static>(observer: LifecycleObserver<C>) -> Result<Self> {
        Self::spawn_inner(observer, None)
    }

    /// Start the dispatcher thread, publishing every commit report to `reports`.
    pub fn spawn_with_reports<C: Clock + 'static>(
        observer: LifecycleObserver<C>,
        reports: Sender<CommitReport>,
    ) -> Result<Self> {
        Self::spawn_inner(observer, Some(reports))
    }

    fn spawn_inner<C: Clock + 'static>(
        observer: LifecycleObserver<C>,
        reports: Option<Sender<CommitReport>>,
    ) -> Result<Self> {
        let (sender, receiver) = unbounded();
        let handle = thread::Builder::new()
            .name(DISPATCHER_THREAD_NAME.to_owned())
            .spawn(move || dispatch_loop(receiver, observer, reports))
            .map_err(IconError::DispatcherSpawn)?;

        Ok(Self {
            proxy: LifecycleProxy { sender },
            handle: Mutex::new(Some(handle)),
        })
    }

    /// A handle for posting events.
    pub fn proxy(&self) -> LifecycleProxy {
        self.proxy.clone()
    }

    /// Stop the thread and wait for it.
    ///
    /// Pending events queued before the shutdown are processed first. A grace
    /// timer still running is dropped without committing; hosts that want the
    /// change applied send a destroy first.
    ///
    /// Returns `true` if the thread was joined, `false` if it was already
    /// joined or panicked.
    pub fn shutdown(&self) -> bool {
        let _ = self.proxy.post(LifecycleEvent::Shutdown);
        match self.handle.lock().take() {
            Some(handle) => handle.join().is_ok(),
            None => false,
        }
    }
}

impl Drop for LifecycleDispatcher {
    fn drop(&mut self) {
        // Don't block in drop - just request shutdown.
        let _ = self.proxy.post(LifecycleEvent::Shutdown);
    }
}

fn dispatch_loop<C: Clock>(
    receiver: Receiver<LifecycleEvent>,
    mut observer: LifecycleObserver<C>,
    reports: Option<Sender<CommitReport>>,
) {
    tracing::debug!(target: targets::DISPATCHER, "lifecycle dispatcher started");

    loop {
        let received = match observer.time_until_next() {
            Some(wait) => receiver.recv_timeout(wait),
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let report = match received {
            Ok(LifecycleEvent::Shutdown) => break,
            Ok(event) => {
                tracing::trace!(target: targets::DISPATCHER, ?event, "lifecycle event");
                // A busy queue must not starve an overdue grace timer.
                observer.handle(event).or_else(|| observer.poll())
            }
            Err(RecvTimeoutError::Timeout) => observer.poll(),
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if let (Some(report), Some(reports)) = (report, &reports) {
            if reports.send(report).is_err() {
                tracing::trace!(target: targets::DISPATCHER, "commit report receiver dropped");
            }
        }
    }

    tracing::debug!(target: targets::DISPATCHER, "lifecycle dispatcher stopped");
}
