// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use haaas_adapters::{BusError, FakeBusClient, Subscription};
use parking_lot::Mutex;

#[tokio::test]
async fn creates_all_topics_and_both_channels_per_topic() {
    let bus = FakeBusClient::new();

    create_topics_and_channels(&bus, "c1").await;

    for topic in TOPICS {
        let qualified = format!("{topic}_c1");
        assert!(bus.topic_exists(&qualified), "missing topic {qualified}");
        for channel in CHANNELS {
            let qualified_channel = format!("c1-{channel}");
            assert!(
                bus.channel_exists(&qualified, &qualified_channel),
                "missing channel {qualified_channel} on {qualified}"
            );
        }
    }
}

/// A bus that fails `create_topic` a fixed number of times before succeeding,
/// to exercise the per-topic retry loop.
struct FlakyBus {
    remaining_failures: Mutex<usize>,
    created_topics: Mutex<Vec<String>>,
}

#[async_trait]
impl BusClient for FlakyBus {
    async fn create_topic(&self, topic: &str) -> Result<(), BusError> {
        let mut remaining = self.remaining_failures.lock();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(BusError::Admin("simulated failure".to_string()));
        }
        self.created_topics.lock().push(topic.to_string());
        Ok(())
    }

    async fn create_channel(&self, _topic: &str, _channel: &str) -> Result<(), BusError> {
        Ok(())
    }

    async fn publish(&self, _topic: &str, _payload: Vec<u8>) -> Result<(), BusError> {
        Ok(())
    }

    async fn subscribe(&self, _topic: &str, _channel: &str) -> Result<Box<dyn Subscription>, BusError> {
        unimplemented!("not exercised by this test")
    }
}

#[tokio::test]
async fn retries_a_failing_topic_until_it_succeeds() {
    let bus = FlakyBus { remaining_failures: Mutex::new(2), created_topics: Mutex::new(Vec::new()) };

    create_topics_and_channels(&bus, "c1").await;

    assert_eq!(bus.created_topics.lock().len(), TOPICS.len());
}
