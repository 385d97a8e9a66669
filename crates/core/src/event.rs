// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commit event payloads exchanged on the cluster message bus.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default haproxy version used when an event's `hapVersion` is empty.
pub const DEFAULT_HAP_VERSION: &str = "1.4.22";

/// Full commit event as published on `commit_requested_{clusterId}` and
/// `commit_slave_completed_{clusterId}`.
///
/// `conf` and `syslog_fragment` are opaque bytes, base64-encoded on the wire
/// by the JSON layer (see [`as_base64`]/[`from_base64`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEvent {
    #[serde(rename = "correlationId")]
    pub correlation_id: String,
    pub application: String,
    pub platform: String,
    #[serde(rename = "hapVersion", default)]
    pub hap_version: String,
    #[serde(with = "as_base64")]
    pub conf: Vec<u8>,
    #[serde(rename = "syslogFragment", with = "as_base64")]
    pub syslog_fragment: Vec<u8>,
}

impl CommitEvent {
    /// The haproxy version to apply: `hap_version`, or [`DEFAULT_HAP_VERSION`]
    /// when empty.
    pub fn effective_version(&self) -> &str {
        if self.hap_version.is_empty() {
            DEFAULT_HAP_VERSION
        } else {
            &self.hap_version
        }
    }
}

/// Terminal-stage payload: `{application, platform, correlationid}`, published
/// on `commit_completed_{clusterId}` and `commit_failed_{clusterId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalEvent {
    pub application: String,
    pub platform: String,
    pub correlationid: String,
}

impl From<&CommitEvent> for TerminalEvent {
    fn from(event: &CommitEvent) -> Self {
        TerminalEvent {
            application: event.application.clone(),
            platform: event.platform.clone(),
            correlationid: event.correlation_id.clone(),
        }
    }
}

mod as_base64 {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
