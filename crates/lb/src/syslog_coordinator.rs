// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rate-limited syslog restart coordination.
//!
//! Slave-path restarts are gated to at most one per 10-second window; the
//! master path bypasses the gate entirely (spec.md §4.3).

use haaas_core::Clock;
use haaas_adapters::SyslogCtl;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

const THROTTLE: Duration = Duration::from_secs(10);

/// Coordinates syslog restarts across the reload worker. Owns the single
/// last-restart timestamp the spec calls out as process-wide state.
pub struct SyslogCoordinator<C: Clock> {
    ctl: Arc<dyn SyslogCtl>,
    clock: C,
    last_restart: Mutex<Option<Instant>>,
}

impl<C: Clock> SyslogCoordinator<C> {
    pub fn new(ctl: Arc<dyn SyslogCtl>, clock: C) -> Self {
        Self { ctl, clock, last_restart: Mutex::new(None) }
    }

    /// Restart syslog, honoring the 10-second gate. Returns `true` if a
    /// restart was actually issued.
    pub async fn restart_gated(&self) -> bool {
        {
            let mut last = self.last_restart.lock();
            if let Some(prev) = *last {
                let elapsed = self.clock.now().saturating_duration_since(prev);
                if elapsed < THROTTLE {
                    tracing::debug!(elapsed_secs = elapsed.as_secs_f64(), "skip syslog reload");
                    return false;
                }
            }
            *last = Some(self.clock.now());
        }
        self.issue_restart().await;
        true
    }

    /// Restart syslog unconditionally, bypassing the gate (master path).
    /// Still updates the last-restart timestamp so a subsequent gated call
    /// observes it.
    pub async fn restart_unconditional(&self) {
        *self.last_restart.lock() = Some(self.clock.now());
        self.issue_restart().await;
    }

    async fn issue_restart(&self) {
        if let Err(err) = self.ctl.restart().await {
            tracing::error!(error = %err, "syslog restart failed");
        }
    }
}

#[cfg(test)]
#[path = "syslog_coordinator_tests.rs"]
mod tests;
