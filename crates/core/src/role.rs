// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node role within the cluster-wide rollout.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which stage of the two-phase rollout a node participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Slave,
    Master,
}

crate::simple_display! {
    Role {
        Slave => "slave",
        Master => "master",
    }
}

/// Error returned when a role string is neither `"slave"` nor `"master"`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slave" => Ok(Role::Slave),
            "master" => Ok(Role::Master),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
