// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! haaas-lb: the local LB reload pipeline — filesystem layout, the
//! diff/archive/write/reload/rollback algorithm, and syslog-restart
//! coordination.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod controller;
pub mod layout;
mod syslog_coordinator;

pub use controller::LbController;
pub use layout::{ensure_skeleton, CommitContext};
pub use syslog_coordinator::SyslogCoordinator;
