// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle Supervisor: starts consumers and the reload worker, waits for a
//! termination signal, then drains and shuts down (spec.md §4.7).

use haaas_adapters::{BusClient, Reloader, SyslogCtl};
use haaas_cluster::{create_topics_and_channels, EventKind, EventPublisher, EventRouter, ReloadWorker};
use haaas_core::{Clock, Config};
use haaas_lb::{LbController, SyslogCoordinator};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::admin::AdminSurface;

/// Owns everything started at process startup: the producer handle, the
/// syslog coordinator, and every long-lived task's [`JoinHandle`]. Not an
/// ambient global — constructed once in `main` and driven to completion.
pub struct Supervisor {
    router_handles: Vec<JoinHandle<()>>,
    worker_handle: JoinHandle<()>,
    worker_stop_tx: oneshot::Sender<()>,
    admin: Arc<dyn AdminSurface>,
}

/// Delay between finishing topic/channel bootstrap and starting consumers,
/// matching the original's `time.Sleep(1 * time.Second)` settle window.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

impl Supervisor {
    /// Bootstraps topics/channels, then starts the three bus consumers, the
    /// reload worker, and the admin surface.
    pub async fn start<C: Clock + 'static>(
        config: &Config,
        bus: Arc<dyn BusClient>,
        reloader: Arc<dyn Reloader>,
        syslog_ctl: Arc<dyn SyslogCtl>,
        clock: C,
        admin: Arc<dyn AdminSurface>,
    ) -> Result<Self, SupervisorError> {
        create_topics_and_channels(bus.as_ref(), &config.cluster_id).await;
        tokio::time::sleep(SETTLE_DELAY).await;

        let (reload_tx, reload_rx) = mpsc::channel(1);

        let router_handles = [EventKind::CommitRequested, EventKind::CommitSlaveCompleted, EventKind::CommitCompleted]
            .into_iter()
            .map(|kind| {
                let router = EventRouter::new(bus.clone(), config.cluster_id.clone(), config.status, reload_tx.clone());
                tokio::spawn(async move { router.run(kind).await })
            })
            .collect();

        let controller = LbController::new(config.hap_home.clone(), reloader, clock.clone(), tracing::enabled!(tracing::Level::DEBUG));
        let syslog = SyslogCoordinator::new(syslog_ctl, clock);
        let publisher = EventPublisher::new(bus, config.cluster_id.clone());
        let worker = ReloadWorker::new(controller, syslog, publisher);

        let (worker_stop_tx, worker_stop_rx) = oneshot::channel();
        let worker_handle = tokio::spawn(async move { worker.run_until_stop(reload_rx, worker_stop_rx).await });

        admin.start().await.map_err(SupervisorError::Admin)?;

        Ok(Self { router_handles, worker_handle, worker_stop_tx, admin })
    }

    /// Signal the worker to stop, stop the admin surface, then wait for
    /// every started task to finish.
    pub async fn shutdown(self) {
        let _ = self.worker_stop_tx.send(());
        self.admin.stop().await;

        if let Err(err) = self.worker_handle.await {
            tracing::warn!(error = %err, "reload worker task panicked");
        }
        for handle in self.router_handles {
            handle.abort();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("admin surface failed to start: {0}")]
    Admin(#[from] crate::admin::AdminSurfaceError),
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
