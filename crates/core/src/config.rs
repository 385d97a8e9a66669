// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML-backed node configuration (spec.md §6).

use crate::role::Role;
use serde::Deserialize;
use std::path::PathBuf;

/// Node configuration loaded from the `-config` TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root directory under which all managed LB state lives. Trailing
    /// slash is stripped on load.
    #[serde(rename = "HapHome")]
    pub hap_home: PathBuf,
    #[serde(rename = "ClusterId")]
    pub cluster_id: String,
    /// This node's role in the two-phase rollout.
    #[serde(rename = "Status")]
    pub status: Role,
    /// Bus producer TCP address.
    #[serde(rename = "ProducerAddr")]
    pub producer_addr: String,
    /// Bus admin HTTP base URL, used for topic/channel bootstrap.
    #[serde(rename = "ProducerRestAddr")]
    pub producer_rest_addr: String,
    /// Bus discovery address.
    #[serde(rename = "LookupdAddr")]
    pub lookupd_addr: String,
    /// Node's IP address. Not part of the TOML file — supplied via the
    /// `-ip` CLI flag and filled in after parsing (see [`Config::with_ip`]).
    #[serde(skip, default = "default_ip")]
    pub ip_addr: String,
}

fn default_ip() -> String {
    "4.3.2.1".to_string()
}

/// Errors loading or parsing a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: Box<toml::de::Error> },
}

impl Config {
    /// Load and parse a TOML config file from `path`.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source: Box::new(source) })?;
        config.strip_trailing_slash();
        Ok(config)
    }

    /// Apply the `-ip` CLI flag and return self (builder style).
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_addr = ip.into();
        self
    }

    /// The node id: the IP address supplied via `-ip`, verbatim (see
    /// SPEC_FULL.md §3).
    pub fn node_id(&self) -> &str {
        &self.ip_addr
    }

    fn strip_trailing_slash(&mut self) {
        if let Some(s) = self.hap_home.to_str() {
            if let Some(stripped) = s.strip_suffix('/') {
                self.hap_home = PathBuf::from(stripped.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
