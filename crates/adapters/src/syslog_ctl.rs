// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability interface for restarting the local syslog daemon.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from restarting syslog. Never surfaced to callers (spec.md §4.3:
/// "any failure is logged, not surfaced") — kept as a typed error anyway so
/// the logging call site can record it.
#[derive(Debug, Error)]
pub enum SyslogCtlError {
    #[error("failed to exec syslog control command: {0}")]
    Exec(std::io::Error),
    #[error("syslog control command exited with status {0}")]
    NonZeroExit(i32),
}

/// Restarts the local syslog daemon.
#[async_trait]
pub trait SyslogCtl: Send + Sync + 'static {
    async fn restart(&self) -> Result<(), SyslogCtlError>;
}

/// Real syslog control: shells out to the system service manager.
#[derive(Debug, Clone)]
pub struct ShellSyslogCtl {
    /// Command and arguments used to restart syslog, e.g.
    /// `["service", "syslog", "restart"]`.
    command: Vec<String>,
}

impl Default for ShellSyslogCtl {
    fn default() -> Self {
        Self { command: vec!["service".to_string(), "syslog".to_string(), "restart".to_string()] }
    }
}

impl ShellSyslogCtl {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl SyslogCtl for ShellSyslogCtl {
    async fn restart(&self) -> Result<(), SyslogCtlError> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(());
        };

        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(SyslogCtlError::Exec)?;

        if !status.success() {
            return Err(SyslogCtlError::NonZeroExit(status.code().unwrap_or(-1)));
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake syslog control: records restart calls, never fails unless configured to.
    #[derive(Clone, Default)]
    pub struct FakeSyslogCtl {
        inner: Arc<Mutex<FakeState>>,
    }

    #[derive(Default)]
    struct FakeState {
        restart_count: usize,
        fail_next: bool,
    }

    impl FakeSyslogCtl {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn restart_count(&self) -> usize {
            self.inner.lock().restart_count
        }

        pub fn fail_next(&self) {
            self.inner.lock().fail_next = true;
        }
    }

    #[async_trait]
    impl SyslogCtl for FakeSyslogCtl {
        async fn restart(&self) -> Result<(), SyslogCtlError> {
            let mut state = self.inner.lock();
            state.restart_count += 1;
            if std::mem::take(&mut state.fail_next) {
                return Err(SyslogCtlError::NonZeroExit(1));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSyslogCtl;

#[cfg(test)]
#[path = "syslog_ctl_tests.rs"]
mod tests;
