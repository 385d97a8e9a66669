// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`BusClient`] for tests: topics/channels are plain maps, and
//! publishing fans a message out to every channel registered on that topic.

use super::{BusClient, BusError, Subscription};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Default)]
struct FakeState {
    topics: HashMap<String, ()>,
    channels: HashMap<(String, String), mpsc::UnboundedSender<Vec<u8>>>,
    published: Vec<(String, Vec<u8>)>,
}

/// In-memory bus client. Cloning shares the same underlying state.
#[derive(Clone, Default)]
pub struct FakeBusClient {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeBusClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages ever published, in publish order, as `(topic, payload)`.
    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.inner.lock().published.clone()
    }

    pub fn topic_exists(&self, topic: &str) -> bool {
        self.inner.lock().topics.contains_key(topic)
    }

    pub fn channel_exists(&self, topic: &str, channel: &str) -> bool {
        self.inner.lock().channels.contains_key(&(topic.to_string(), channel.to_string()))
    }
}

#[async_trait]
impl BusClient for FakeBusClient {
    async fn create_topic(&self, topic: &str) -> Result<(), BusError> {
        self.inner.lock().topics.insert(topic.to_string(), ());
        Ok(())
    }

    async fn create_channel(&self, topic: &str, channel: &str) -> Result<(), BusError> {
        let mut state = self.inner.lock();
        state.topics.entry(topic.to_string()).or_insert(());
        state
            .channels
            .entry((topic.to_string(), channel.to_string()))
            .or_insert_with(|| mpsc::unbounded_channel().0);
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        let mut state = self.inner.lock();
        state.published.push((topic.to_string(), payload.clone()));
        for ((t, _channel), sender) in state.channels.iter() {
            if t == topic {
                let _ = sender.send(payload.clone());
            }
        }
        Ok(())
    }

    async fn subscribe(
        &self,
        topic: &str,
        channel: &str,
    ) -> Result<Box<dyn Subscription>, BusError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.inner.lock();
        state.topics.entry(topic.to_string()).or_insert(());
        state.channels.insert((topic.to_string(), channel.to_string()), tx);
        Ok(Box::new(FakeSubscription { rx }))
    }
}

struct FakeSubscription {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

#[async_trait]
impl Subscription for FakeSubscription {
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, BusError> {
        Ok(self.rx.recv().await)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
