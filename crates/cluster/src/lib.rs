// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! haaas-cluster: the bus-facing half of the reload pipeline — topic/channel
//! bootstrap, the Event Router, the Reload Worker, and the Event Publisher.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod bootstrap;
mod publisher;
mod router;
mod worker;

pub use bootstrap::create_topics_and_channels;
pub use publisher::EventPublisher;
pub use router::{EventKind, EventRouter, ReloadRequest};
pub use worker::ReloadWorker;
