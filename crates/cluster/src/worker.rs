// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single-consumer reload worker: drains the reload channel and invokes
//! the LB Controller and Syslog Coordinator in order (spec.md §4.5).
//!
//! There is exactly one worker; this is the system's sole concurrency
//! invariant for LB mutation (no two reload-script invocations overlap).

use crate::publisher::EventPublisher;
use crate::router::ReloadRequest;
use haaas_core::{ApplyStatus, Clock, CommitEvent, TerminalEvent};
use haaas_lb::{LbController, SyslogCoordinator};
use tokio::sync::mpsc;

/// Drains [`ReloadRequest`]s one at a time until the channel closes,
/// running each to completion before picking up the next.
pub struct ReloadWorker<C: Clock> {
    controller: LbController<C>,
    syslog: SyslogCoordinator<C>,
    publisher: EventPublisher,
}

impl<C: Clock> ReloadWorker<C> {
    pub fn new(controller: LbController<C>, syslog: SyslogCoordinator<C>, publisher: EventPublisher) -> Self {
        Self { controller, syslog, publisher }
    }

    /// Process requests from `reload_rx` until the channel is closed and
    /// empty. Intended to be the body of the single long-lived worker task.
    pub async fn run(&self, mut reload_rx: mpsc::Receiver<ReloadRequest>) {
        while let Some(request) = reload_rx.recv().await {
            self.dispatch(request).await;
        }
    }

    /// Like [`Self::run`], but also stops on `stop_rx` firing. A request
    /// already dequeued when the stop signal arrives still runs to
    /// completion (spec.md §5: "in-flight bus messages already dequeued are
    /// allowed to finish").
    pub async fn run_until_stop(
        &self,
        mut reload_rx: mpsc::Receiver<ReloadRequest>,
        mut stop_rx: tokio::sync::oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                biased;
                request = reload_rx.recv() => {
                    match request {
                        Some(request) => self.dispatch(request).await,
                        None => return,
                    }
                }
                _ = &mut stop_rx => return,
            }
        }
    }

    async fn dispatch(&self, request: ReloadRequest) {
        match request {
            ReloadRequest::Slave(event) => self.reload_slave(event).await,
            ReloadRequest::Master(event) => self.reload_master(event).await,
        }
    }

    /// 1. Apply with the slave LB Controller.
    /// 2. On any non-`Unchanged` success, gate-restart syslog.
    /// 3. Success (including `Unchanged`) → publish the full event to
    ///    `commit_slave_completed_{clusterId}`.
    /// 4. Failure → publish a terminal event to `commit_failed_{clusterId}`.
    async fn reload_slave(&self, event: CommitEvent) {
        let status = self.controller.apply_configuration(&event).await;
        match status {
            ApplyStatus::Success => {
                self.syslog.restart_gated().await;
                self.publisher.publish("commit_slave_completed_", &event).await;
            }
            ApplyStatus::Unchanged => {
                self.publisher.publish("commit_slave_completed_", &event).await;
            }
            ApplyStatus::ErrConf | ApplyStatus::ErrReload | ApplyStatus::ErrSyslog => {
                self.log_failure(&event, status);
                self.publisher.publish("commit_failed_", &TerminalEvent::from(&event)).await;
            }
        }
    }

    /// Same shape as [`Self::reload_slave`], but syslog restarts
    /// unconditionally on success and the success topic/payload differ:
    /// `commit_completed_{clusterId}` with a terminal event only.
    async fn reload_master(&self, event: CommitEvent) {
        let status = self.controller.apply_configuration(&event).await;
        match status {
            ApplyStatus::Success => {
                self.syslog.restart_unconditional().await;
                self.publisher.publish("commit_completed_", &TerminalEvent::from(&event)).await;
            }
            ApplyStatus::Unchanged => {
                self.publisher.publish("commit_completed_", &TerminalEvent::from(&event)).await;
            }
            ApplyStatus::ErrConf | ApplyStatus::ErrReload | ApplyStatus::ErrSyslog => {
                self.log_failure(&event, status);
                self.publisher.publish("commit_failed_", &TerminalEvent::from(&event)).await;
            }
        }
    }

    fn log_failure(&self, event: &CommitEvent, status: ApplyStatus) {
        tracing::error!(
            correlation_id = %event.correlation_id,
            application = %event.application,
            platform = %event.platform,
            status = %status,
            "commit failed"
        );
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
