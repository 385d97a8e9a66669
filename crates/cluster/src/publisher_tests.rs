// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use haaas_adapters::FakeBusClient;
use haaas_core::TerminalEvent;

#[tokio::test]
async fn publish_serializes_json_and_suffixes_cluster_id() {
    let bus = Arc::new(FakeBusClient::new());
    let publisher = EventPublisher::new(bus.clone(), "c1");

    let terminal =
        TerminalEvent { application: "A".to_string(), platform: "P".to_string(), correlationid: "corr".to_string() };
    publisher.publish("commit_failed_", &terminal).await;

    let published = bus.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "commit_failed_c1");
    let body: serde_json::Value = serde_json::from_slice(&published[0].1).unwrap();
    assert_eq!(body["correlationid"], "corr");
}
