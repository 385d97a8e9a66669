// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The LB Controller: diff, archive, write, reload, rollback, and
//! syslog-fragment write for a single (application, platform) context.

use crate::layout::{ensure_skeleton, CommitContext};
use haaas_core::{ApplyStatus, Clock, CommitEvent};
use haaas_adapters::Reloader;
use std::sync::Arc;

const DUMP_HEADER_RULE: &str = "================================================================";

/// Applies a [`CommitEvent`] to the local LB configuration for one
/// (application, platform) context, following the algorithm in
/// spec.md §4.2.
pub struct LbController<C: Clock> {
    home: std::path::PathBuf,
    reloader: Arc<dyn Reloader>,
    clock: C,
    verbose: bool,
}

impl<C: Clock> LbController<C> {
    pub fn new(home: impl Into<std::path::PathBuf>, reloader: Arc<dyn Reloader>, clock: C, verbose: bool) -> Self {
        Self { home: home.into(), reloader, clock, verbose }
    }

    /// Run the full apply algorithm for `event`, returning the resulting
    /// [`ApplyStatus`]. Never returns an `Err` itself — all failure modes
    /// are represented as non-success `ApplyStatus` values (spec.md §7:
    /// errors within the reload pipeline never crash the process).
    pub async fn apply_configuration(&self, event: &CommitEvent) -> ApplyStatus {
        let ctx = CommitContext::new(
            self.home.clone(),
            event.application.clone(),
            event.platform.clone(),
            event.effective_version().to_string(),
        );

        // Step 1: skeleton. Directory errors are logged but do not abort.
        ensure_skeleton(&ctx);

        // Step 2: debug dump, only if verbose logging is enabled.
        if self.verbose {
            self.write_dump(&ctx.debug_dump_path(&self.timestamp()), event);
        }

        // Step 3: diff.
        let active_path = ctx.conf_path();
        if let Ok(existing) = std::fs::read(&active_path) {
            if existing == event.conf {
                tracing::info!(
                    application = %event.application,
                    platform = %event.platform,
                    "ignoring unchanged configuration"
                );
                return ApplyStatus::Unchanged;
            }
        }

        // Step 4: archive. A missing source rename (first-ever apply) is
        // tolerated.
        let archive_path = ctx.archive_path();
        match std::fs::rename(&active_path, &archive_path) {
            Ok(()) => tracing::info!(path = %archive_path.display(), "archived previous configuration"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(error = %err, "failed to archive previous configuration"),
        }

        // Step 5: write.
        if let Err(err) = std::fs::write(&active_path, &event.conf) {
            tracing::error!(path = %active_path.display(), error = %err, "failed to write configuration");
            return ApplyStatus::ErrConf;
        }
        tracing::info!(path = %active_path.display(), "wrote new configuration");

        // Step 6: reload.
        let reload_script = ctx.reload_script_path();
        match self.reloader.invoke(&reload_script, &["reload", "-y"]).await {
            Ok(output) => {
                tracing::info!(script = %reload_script.display(), stdout = %output.stdout, "reload succeeded");
            }
            Err(err) => {
                tracing::error!(
                    application = %event.application,
                    platform = %event.platform,
                    error = %err,
                    "reload failed"
                );
                self.write_dump(&ctx.error_dump_path(&self.timestamp()), event);
                if let Err(rollback_err) = self.rollback(&ctx).await {
                    tracing::error!(error = %rollback_err, "rollback also failed");
                }
                return ApplyStatus::ErrReload;
            }
        }

        // Step 7: syslog fragment. No rollback on failure (open question,
        // preserved from the original).
        let fragment_path = ctx.syslog_fragment_path();
        if let Err(err) = std::fs::write(&fragment_path, &event.syslog_fragment) {
            tracing::error!(path = %fragment_path.display(), error = %err, "failed to write syslog fragment");
            return ApplyStatus::ErrSyslog;
        }

        ApplyStatus::Success
    }

    /// §4.2.1 rollback: archive → active, then reload. The reload result is
    /// logged but never overrides the caller's `ErrReload` status.
    async fn rollback(&self, ctx: &CommitContext) -> Result<(), RollbackError> {
        let archive_path = ctx.archive_path();
        if !archive_path.is_file() {
            return Err(RollbackError::NothingToRollback);
        }
        let active_path = ctx.conf_path();
        std::fs::rename(&archive_path, &active_path).map_err(RollbackError::Rename)?;

        let reload_script = ctx.reload_script_path();
        if let Err(err) = self.reloader.invoke(&reload_script, &["reload", "-y"]).await {
            tracing::warn!(error = %err, "rollback reload failed");
        }
        Ok(())
    }

    fn write_dump(&self, path: &std::path::Path, event: &CommitEvent) {
        let body = format!(
            "{DUMP_HEADER_RULE}\napplication: {}\nplatform: {}\ncorrelationid: {}\n{DUMP_HEADER_RULE}\n",
            event.application, event.platform, event.correlation_id
        );
        let mut contents = body.into_bytes();
        contents.extend_from_slice(&event.conf);
        if let Err(err) = std::fs::write(path, &contents) {
            tracing::warn!(path = %path.display(), error = %err, "failed to write configuration dump");
        } else {
            tracing::info!(path = %path.display(), "wrote configuration dump");
        }
    }

    fn timestamp(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.clock.epoch_ms() as i64)
            .unwrap_or_default()
            .format("%Y%m%d%H%M%S")
            .to_string()
    }
}

/// Failure of the §4.2.1 rollback step. Always logged, never surfaced as a
/// distinct `ApplyStatus` — the outer `ErrReload` stands regardless.
#[derive(Debug, thiserror::Error)]
enum RollbackError {
    #[error("nothing to rollback")]
    NothingToRollback,
    #[error("failed to restore archived configuration: {0}")]
    Rename(std::io::Error),
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
