// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability interface for invoking the external LB reload script.
//!
//! Abstracted behind a trait (SPEC_FULL.md §9, "External-script execution")
//! so the LB Controller's reload step can be exercised in tests without
//! shelling out.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Captured output of a reload script invocation.
#[derive(Debug, Clone, Default)]
pub struct ReloadOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Errors from invoking the reload script.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("failed to exec reload script {0}: {1}")]
    Exec(std::path::PathBuf, std::io::Error),
    #[error("reload script {script} exited with status {status}: {stderr}")]
    NonZeroExit { script: std::path::PathBuf, status: i32, stderr: String },
}

/// Invokes the reload script that actually execs the LB binary.
#[async_trait]
pub trait Reloader: Send + Sync + 'static {
    /// Run `script` with `args` via a shell, capturing stdout/stderr.
    /// Non-zero exit or exec failure is a [`ReloadError`].
    async fn invoke(&self, script: &Path, args: &[&str]) -> Result<ReloadOutput, ReloadError>;
}

/// Real reloader: execs `sh {script} {args...}`, matching the original
/// `exec.Command("sh", reloadScript, "reload").Output()` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellReloader;

#[async_trait]
impl Reloader for ShellReloader {
    async fn invoke(&self, script: &Path, args: &[&str]) -> Result<ReloadOutput, ReloadError> {
        let output = tokio::process::Command::new("sh")
            .arg(script)
            .args(args)
            .output()
            .await
            .map_err(|e| ReloadError::Exec(script.to_path_buf(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ReloadError::NonZeroExit {
                script: script.to_path_buf(),
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(ReloadOutput { stdout, stderr })
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// One recorded invocation.
    #[derive(Debug, Clone)]
    pub struct ReloadCall {
        pub script: std::path::PathBuf,
        pub args: Vec<String>,
    }

    struct FakeState {
        calls: Vec<ReloadCall>,
        /// Queue of canned results, consumed in order. When empty, `invoke`
        /// returns `Ok(Default::default())`.
        results: Vec<Result<ReloadOutput, ReloadError>>,
    }

    /// Fake reloader: records invocations and returns canned results.
    #[derive(Clone)]
    pub struct FakeReloader {
        inner: Arc<Mutex<FakeState>>,
    }

    impl Default for FakeReloader {
        fn default() -> Self {
            Self { inner: Arc::new(Mutex::new(FakeState { calls: Vec::new(), results: Vec::new() })) }
        }
    }

    impl FakeReloader {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the next `invoke` call to succeed.
        pub fn push_success(&self) {
            self.inner.lock().results.push(Ok(ReloadOutput::default()));
        }

        /// Queue the next `invoke` call to fail with a non-zero exit.
        pub fn push_failure(&self, stderr: impl Into<String>) {
            self.inner.lock().results.push(Err(ReloadError::NonZeroExit {
                script: std::path::PathBuf::new(),
                status: 1,
                stderr: stderr.into(),
            }));
        }

        /// Always succeed regardless of how many times `invoke` is called.
        pub fn always_succeed(&self) {
            self.inner.lock().results.clear();
        }

        pub fn calls(&self) -> Vec<ReloadCall> {
            self.inner.lock().calls.clone()
        }

        pub fn call_count(&self) -> usize {
            self.inner.lock().calls.len()
        }
    }

    #[async_trait]
    impl Reloader for FakeReloader {
        async fn invoke(&self, script: &Path, args: &[&str]) -> Result<ReloadOutput, ReloadError> {
            let mut state = self.inner.lock();
            state.calls.push(ReloadCall {
                script: script.to_path_buf(),
                args: args.iter().map(|s| s.to_string()).collect(),
            });
            if state.results.is_empty() {
                Ok(ReloadOutput::default())
            } else {
                state.results.remove(0)
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeReloader, ReloadCall};

#[cfg(test)]
#[path = "reloader_tests.rs"]
mod tests;
