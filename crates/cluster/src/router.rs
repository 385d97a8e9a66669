// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumes cluster events, filters by node role, decodes payloads, and
//! enqueues reload work (spec.md §4.4).

use haaas_adapters::BusClient;
use haaas_core::{CommitEvent, Role};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Work enqueued on the reload channel: which pipeline to run, carrying the
/// decoded event. Replaces the original's `(handler, payload)` tuple with an
/// enum so the Reload Worker can match exhaustively.
#[derive(Debug, Clone)]
pub enum ReloadRequest {
    Slave(CommitEvent),
    Master(CommitEvent),
}

/// The three named cluster topics the router consumes, each gated to a
/// single expected role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    CommitRequested,
    CommitSlaveCompleted,
    CommitCompleted,
}

impl EventKind {
    /// Bare topic name, before the `_{clusterId}` suffix.
    pub fn topic_name(self) -> &'static str {
        match self {
            EventKind::CommitRequested => "commit_requested",
            EventKind::CommitSlaveCompleted => "commit_slave_completed",
            EventKind::CommitCompleted => "commit_completed",
        }
    }

    /// Role this event kind is only relevant to; events on this topic for
    /// any other role are ignored (spec.md §4.4 step 2).
    pub fn expected_role(self) -> Role {
        match self {
            EventKind::CommitRequested => Role::Slave,
            EventKind::CommitSlaveCompleted => Role::Master,
            EventKind::CommitCompleted => Role::Slave,
        }
    }
}

/// Consumes one bus topic/channel, applies the role filter, decodes, and
/// dispatches onto the reload channel.
pub struct EventRouter {
    bus: Arc<dyn BusClient>,
    cluster_id: String,
    node_role: Role,
    reload_tx: mpsc::Sender<ReloadRequest>,
}

impl EventRouter {
    pub fn new(
        bus: Arc<dyn BusClient>,
        cluster_id: impl Into<String>,
        node_role: Role,
        reload_tx: mpsc::Sender<ReloadRequest>,
    ) -> Self {
        Self { bus, cluster_id: cluster_id.into(), node_role, reload_tx }
    }

    /// Subscribe to `kind`'s topic and consume messages until the
    /// subscription closes. Runs forever in practice; intended to be spawned
    /// as its own task per [`EventKind`].
    pub async fn run(&self, kind: EventKind) {
        let topic = format!("{}_{}", kind.topic_name(), self.cluster_id);
        let channel = format!("{}-{}", self.cluster_id, self.node_role);
        if kind == EventKind::CommitRequested {
            tracing::debug!(topic = %topic, "subscribing to externally-provisioned topic");
        }

        let mut subscription = match self.bus.subscribe(&topic, &channel).await {
            Ok(sub) => sub,
            Err(err) => {
                tracing::error!(topic = %topic, error = %err, "failed to subscribe");
                return;
            }
        };

        loop {
            match subscription.recv().await {
                Ok(Some(payload)) => {
                    // Ack is unconditional: handling happens regardless of
                    // outcome, and there is no redelivery path (spec.md §7).
                    self.handle(kind, &payload).await;
                }
                Ok(None) => {
                    tracing::info!(topic = %topic, "subscription closed");
                    return;
                }
                Err(err) => {
                    tracing::error!(topic = %topic, error = %err, "bus receive error");
                    return;
                }
            }
        }
    }

    async fn handle(&self, kind: EventKind, payload: &[u8]) {
        if kind.expected_role() != self.node_role {
            tracing::debug!(kind = kind.topic_name(), role = %self.node_role, "ignore event");
            return;
        }

        let event: CommitEvent = match serde_json::from_slice(payload) {
            Ok(event) => event,
            Err(err) => {
                tracing::error!(kind = kind.topic_name(), error = %err, "malformed payload, discarding");
                return;
            }
        };

        tracing::debug!(kind = kind.topic_name(), "handle event");
        match kind {
            EventKind::CommitRequested => {
                let _ = self.reload_tx.send(ReloadRequest::Slave(event)).await;
            }
            EventKind::CommitSlaveCompleted => {
                let _ = self.reload_tx.send(ReloadRequest::Master(event)).await;
            }
            EventKind::CommitCompleted => {
                tracing::debug!(
                    correlation_id = %event.correlation_id,
                    application = %event.application,
                    platform = %event.platform,
                    "commit completed"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
