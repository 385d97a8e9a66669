// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic path derivation and directory/symlink skeleton for a single
//! (application, platform) context.
//!
//! Path derivation is pure — unlike the original `confPath`/`confArchivePath`,
//! which created their parent directory as a side effect of being called,
//! [`CommitContext`]'s accessors never touch the filesystem. All directories
//! are created up front by [`ensure_skeleton`].

use std::path::{Path, PathBuf};

/// Fixed target the reload script symlink always points to. Environment-
/// specific in the original source; kept as a single constant here.
const HAPCTL_SYMLINK_TARGET: &str = "/HOME/uxwadm/scripts/hapctl_unif";

/// Paths and derived names for one (application, platform, version) tuple,
/// rooted at a node's home directory.
#[derive(Debug, Clone)]
pub struct CommitContext {
    home: PathBuf,
    application: String,
    platform: String,
    version: String,
}

impl CommitContext {
    pub fn new(
        home: impl Into<PathBuf>,
        application: impl Into<String>,
        platform: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            home: home.into(),
            application: application.into(),
            platform: platform.into(),
            version: version.into(),
        }
    }

    fn base(&self) -> PathBuf {
        self.home.join(&self.application)
    }

    fn app_platform(&self) -> String {
        format!("{}{}", self.application, self.platform)
    }

    /// `{base}/Config/hap{application}{platform}.conf`
    pub fn conf_path(&self) -> PathBuf {
        self.base().join("Config").join(format!("hap{}.conf", self.app_platform()))
    }

    /// `{base}/version-1/hap{application}{platform}.conf`
    pub fn archive_path(&self) -> PathBuf {
        self.base().join("version-1").join(format!("hap{}.conf", self.app_platform()))
    }

    /// `{base}/errors/{timestamp}_{application}{platform}.log`
    pub fn error_dump_path(&self, timestamp: &str) -> PathBuf {
        self.base().join("errors").join(format!("{timestamp}_{}.log", self.app_platform()))
    }

    /// `{base}/dump/{timestamp}_{application}{platform}.log`
    pub fn debug_dump_path(&self, timestamp: &str) -> PathBuf {
        self.base().join("dump").join(format!("{timestamp}_{}.log", self.app_platform()))
    }

    /// `{base}/logs/{application}{platform}/`
    pub fn logs_dir(&self) -> PathBuf {
        self.base().join("logs").join(self.app_platform())
    }

    /// `{base}/scripts/hapctl{application}{platform}` (symlink)
    pub fn reload_script_path(&self) -> PathBuf {
        self.base().join("scripts").join(format!("hapctl{}", self.app_platform()))
    }

    /// `{base}/Config/haproxy` (symlink)
    pub fn lb_binary_link_path(&self) -> PathBuf {
        self.base().join("Config").join("haproxy")
    }

    /// `/export/product/haproxy/product/{version}/bin/haproxy`
    pub fn lb_binary_link_target(&self) -> PathBuf {
        PathBuf::from(format!("/export/product/haproxy/product/{}/bin/haproxy", self.version))
    }

    /// `{home}/SYSLOG/Config/syslog.conf.d/syslog{application}{platform}.conf`
    pub fn syslog_fragment_path(&self) -> PathBuf {
        self.home
            .join("SYSLOG")
            .join("Config")
            .join("syslog.conf.d")
            .join(format!("syslog{}.conf", self.app_platform()))
    }
}

/// Idempotently creates all directories (mode 0755) this context needs and
/// refreshes both symlinks. Directory and symlink failures are logged but
/// never abort the caller — they will resurface at the write step if they
/// matter (spec: "directory and symlink creation errors are logged, not
/// fatal").
pub fn ensure_skeleton(ctx: &CommitContext) {
    let dirs = [
        ctx.conf_path().parent().map(Path::to_path_buf),
        ctx.archive_path().parent().map(Path::to_path_buf),
        Some(ctx.base().join("errors")),
        Some(ctx.base().join("dump")),
        Some(ctx.logs_dir()),
        ctx.reload_script_path().parent().map(Path::to_path_buf),
        ctx.syslog_fragment_path().parent().map(Path::to_path_buf),
    ];
    for dir in dirs.into_iter().flatten() {
        create_directory(&dir);
    }

    update_symlink(Path::new(HAPCTL_SYMLINK_TARGET), &ctx.reload_script_path());
    update_symlink(&ctx.lb_binary_link_target(), &ctx.lb_binary_link_path());
}

fn create_directory(dir: &Path) {
    if dir.is_dir() {
        return;
    }
    if let Err(err) = std::fs::create_dir_all(dir) {
        tracing::warn!(path = %dir.display(), error = %err, "failed to create directory");
    }
}

/// Removes `link` if present, then creates a fresh symlink pointing at
/// `target`. Failures are logged, never fatal.
fn update_symlink(target: &Path, link: &Path) {
    if link.symlink_metadata().is_ok() {
        if let Err(err) = std::fs::remove_file(link) {
            tracing::warn!(path = %link.display(), error = %err, "failed to remove stale symlink");
            return;
        }
    }
    if let Err(err) = symlink(target, link) {
        tracing::warn!(path = %link.display(), target = %target.display(), error = %err, "failed to create symlink");
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(std::io::ErrorKind::Unsupported, "symlinks unsupported on this platform"))
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
