// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_known_roles() {
    assert_eq!("slave".parse::<Role>().unwrap(), Role::Slave);
    assert_eq!("master".parse::<Role>().unwrap(), Role::Master);
}

#[test]
fn rejects_unknown_role() {
    let err = "observer".parse::<Role>().unwrap_err();
    assert_eq!(err.to_string(), "unknown role: observer");
}

#[test]
fn displays_lowercase() {
    assert_eq!(Role::Slave.to_string(), "slave");
    assert_eq!(Role::Master.to_string(), "master");
}

#[test]
fn serde_roundtrip() {
    let json = serde_json::to_string(&Role::Master).unwrap();
    assert_eq!(json, "\"master\"");
    let role: Role = serde_json::from_str(&json).unwrap();
    assert_eq!(role, Role::Master);
}
