// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability interface for the cluster message bus.
//!
//! Per SPEC_FULL.md §9 ("Bus client"), the core depends only on this narrow
//! trait — `create_topic`/`create_channel` for bootstrap, `publish`, and
//! `subscribe` — and never on a specific client library's error types. The
//! pub/sub transport itself is an external collaborator (spec.md §1
//! Non-goals); [`tcp::TcpBusClient`] is a minimal concrete transport for
//! local use, not a production message-bus implementation.

#[cfg(any(test, feature = "test-support"))]
mod fake;
mod tcp;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from bus operations. The core never depends on a transport
/// library's own error type.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("bus connection failed: {0}")]
    Connect(String),
    #[error("bus publish failed: {0}")]
    Publish(String),
    #[error("bus admin request failed: {0}")]
    Admin(String),
}

/// A single subscription's receive half. Messages are delivered as opaque
/// bytes; acknowledgement is the Event Router's concern, not the bus's
/// (spec.md §4.4: acked unconditionally after handling, no redelivery).
#[async_trait]
pub trait Subscription: Send {
    /// Receive the next message, or `None` once the subscription is closed.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, BusError>;
}

/// A connected bus client: topic/channel admin plus publish/subscribe.
#[async_trait]
pub trait BusClient: Send + Sync + 'static {
    /// Idempotently create `topic`. Retried by the caller on failure
    /// (spec.md §4.7: "retried on failure until success").
    async fn create_topic(&self, topic: &str) -> Result<(), BusError>;
    /// Idempotently create `channel` on `topic`.
    async fn create_channel(&self, topic: &str, channel: &str) -> Result<(), BusError>;
    /// Publish `payload` to `topic`.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError>;
    /// Subscribe to `topic` under `channel`, returning a receive-only handle.
    async fn subscribe(
        &self,
        topic: &str,
        channel: &str,
    ) -> Result<Box<dyn Subscription>, BusError>;
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeBusClient;
pub use tcp::TcpBusClient;
