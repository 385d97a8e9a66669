// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topic/channel bootstrap for the three cluster-facing outbound topics.
//!
//! `commit_requested_{clusterId}` is deliberately not created here: it is
//! assumed to be provisioned by deployment tooling outside this process
//! (spec.md §9 open question).

use haaas_adapters::BusClient;

const TOPICS: [&str; 3] = ["commit_slave_completed", "commit_completed", "commit_failed"];
const CHANNELS: [&str; 2] = ["slave", "master"];

/// Creates `{topic}_{clusterId}` for each of [`TOPICS`], then
/// `{clusterId}-{channel}` for each of [`CHANNELS`] on that topic. A
/// topic's channel failure re-tries the whole topic (create + both
/// channels) until it succeeds, matching the original's single-retry-queue
/// bootstrap.
pub async fn create_topics_and_channels(bus: &dyn BusClient, cluster_id: &str) {
    for topic in TOPICS {
        let qualified_topic = format!("{topic}_{cluster_id}");
        loop {
            tracing::info!(topic = %qualified_topic, "creating topic");
            if bus.create_topic(&qualified_topic).await.is_err() {
                tracing::warn!(topic = %qualified_topic, "topic creation failed, retrying");
                continue;
            }

            if create_channels(bus, &qualified_topic, cluster_id).await {
                tracing::info!(topic = %qualified_topic, "topic created");
                break;
            }
            tracing::warn!(topic = %qualified_topic, "channel creation failed, retrying topic");
        }
    }
}

async fn create_channels(bus: &dyn BusClient, qualified_topic: &str, cluster_id: &str) -> bool {
    for channel in CHANNELS {
        let qualified_channel = format!("{cluster_id}-{channel}");
        tracing::info!(channel = %qualified_channel, "creating channel");
        if bus.create_channel(qualified_topic, &qualified_channel).await.is_err() {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
