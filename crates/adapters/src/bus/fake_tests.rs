// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn create_topic_and_channel_are_idempotent() {
    let bus = FakeBusClient::new();
    bus.create_topic("commit_requested_c1").await.unwrap();
    bus.create_topic("commit_requested_c1").await.unwrap();
    bus.create_channel("commit_requested_c1", "slave").await.unwrap();
    bus.create_channel("commit_requested_c1", "slave").await.unwrap();

    assert!(bus.topic_exists("commit_requested_c1"));
    assert!(bus.channel_exists("commit_requested_c1", "slave"));
}

#[tokio::test]
async fn publish_delivers_to_subscribed_channel() {
    let bus = FakeBusClient::new();
    let mut sub = bus.subscribe("commit_requested_c1", "slave").await.unwrap();

    bus.publish("commit_requested_c1", b"hello".to_vec()).await.unwrap();

    let received = sub.recv().await.unwrap();
    assert_eq!(received, Some(b"hello".to_vec()));
}

#[tokio::test]
async fn publish_is_not_delivered_to_a_different_topic() {
    let bus = FakeBusClient::new();
    let mut sub = bus.subscribe("commit_requested_c2", "slave").await.unwrap();

    bus.publish("commit_requested_c1", b"hello".to_vec()).await.unwrap();

    let outcome = tokio::time::timeout(std::time::Duration::from_millis(50), sub.recv()).await;
    assert!(outcome.is_err(), "no message should have been delivered to an unrelated topic");
}

#[tokio::test]
async fn published_records_every_message_regardless_of_subscribers() {
    let bus = FakeBusClient::new();
    bus.publish("t", b"a".to_vec()).await.unwrap();
    bus.publish("t", b"b".to_vec()).await.unwrap();

    let all = bus.published();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].1, b"a");
}
