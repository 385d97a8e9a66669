// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! haaas-adapters: concrete and fake implementations of the capability
//! interfaces the daemon depends on — reload script execution, syslog
//! control, and the cluster message bus.
//!
//! Every trait here has exactly one real adapter and one fake adapter built
//! for tests (gated behind `cfg(any(test, feature = "test-support"))`).

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod bus;
mod reloader;
mod syslog_ctl;

pub use bus::{BusClient, BusError, Subscription, TcpBusClient};
pub use reloader::{ReloadError, ReloadOutput, Reloader, ShellReloader};
pub use syslog_ctl::{ShellSyslogCtl, SyslogCtl, SyslogCtlError};

#[cfg(any(test, feature = "test-support"))]
pub use bus::FakeBusClient;
#[cfg(any(test, feature = "test-support"))]
pub use reloader::{FakeReloader, ReloadCall};
#[cfg(any(test, feature = "test-support"))]
pub use syslog_ctl::FakeSyslogCtl;
