// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin wrapper around the bus producer: serialises payloads as JSON and
//! publishes to `{prefix}{clusterId}`.

use haaas_adapters::BusClient;
use serde::Serialize;
use std::sync::Arc;

/// Publishes stage-completion and failure events. Publish failures are
/// logged but not retried at this layer — the bus client performs its own
/// buffering (spec.md §4.6).
pub struct EventPublisher {
    bus: Arc<dyn BusClient>,
    cluster_id: String,
}

impl EventPublisher {
    pub fn new(bus: Arc<dyn BusClient>, cluster_id: impl Into<String>) -> Self {
        Self { bus, cluster_id: cluster_id.into() }
    }

    /// Publish `payload` to `{topic_prefix}{cluster_id}`.
    pub async fn publish(&self, topic_prefix: &str, payload: &impl Serialize) {
        let topic = format!("{topic_prefix}{}", self.cluster_id);
        let body = match serde_json::to_vec(payload) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(topic, error = %err, "failed to serialize publish payload");
                return;
            }
        };
        tracing::debug!(topic, payload = %String::from_utf8_lossy(&body), "publish");
        if let Err(err) = self.bus.publish(&topic, body).await {
            tracing::error!(topic, error = %err, "publish failed");
        }
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
