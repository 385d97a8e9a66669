// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The embedded administrative HTTP surface. Out of scope per spec.md §1 —
//! this trait exists only so the Lifecycle Supervisor has something concrete
//! to start and stop; no routes are implemented.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminSurfaceError {
    #[error("admin surface failed to start: {0}")]
    Start(String),
}

/// Start/stop lifecycle for the admin HTTP surface.
#[async_trait]
pub trait AdminSurface: Send + Sync + 'static {
    async fn start(&self) -> Result<(), AdminSurfaceError>;
    async fn stop(&self);
}

/// No-op admin surface: starts and stops immediately, no routes served.
#[derive(Debug, Default)]
pub struct NullAdminSurface;

#[async_trait]
impl AdminSurface for NullAdminSurface {
    async fn start(&self) -> Result<(), AdminSurfaceError> {
        tracing::debug!("admin surface start (no routes implemented)");
        Ok(())
    }

    async fn stop(&self) {
        tracing::debug!("admin surface stop");
    }
}
