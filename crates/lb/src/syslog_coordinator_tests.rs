// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use haaas_core::clock::FakeClock;
use haaas_adapters::FakeSyslogCtl;

#[tokio::test]
async fn first_gated_restart_always_runs() {
    let ctl = Arc::new(FakeSyslogCtl::new());
    let coordinator = SyslogCoordinator::new(ctl.clone(), FakeClock::new());

    let issued = coordinator.restart_gated().await;

    assert!(issued);
    assert_eq!(ctl.restart_count(), 1);
}

#[tokio::test]
async fn second_gated_restart_within_window_is_skipped() {
    let ctl = Arc::new(FakeSyslogCtl::new());
    let clock = FakeClock::new();
    let coordinator = SyslogCoordinator::new(ctl.clone(), clock.clone());

    assert!(coordinator.restart_gated().await);
    clock.advance(Duration::from_secs(3));
    assert!(!coordinator.restart_gated().await);

    assert_eq!(ctl.restart_count(), 1);
}

#[tokio::test]
async fn gated_restart_after_window_elapses_runs_again() {
    let ctl = Arc::new(FakeSyslogCtl::new());
    let clock = FakeClock::new();
    let coordinator = SyslogCoordinator::new(ctl.clone(), clock.clone());

    assert!(coordinator.restart_gated().await);
    clock.advance(Duration::from_secs(11));
    assert!(coordinator.restart_gated().await);

    assert_eq!(ctl.restart_count(), 2);
}

#[tokio::test]
async fn unconditional_restart_ignores_the_gate() {
    let ctl = Arc::new(FakeSyslogCtl::new());
    let clock = FakeClock::new();
    let coordinator = SyslogCoordinator::new(ctl.clone(), clock.clone());

    coordinator.restart_unconditional().await;
    coordinator.restart_unconditional().await;

    assert_eq!(ctl.restart_count(), 2);
}

#[tokio::test]
async fn restart_failure_is_logged_not_surfaced() {
    let ctl = Arc::new(FakeSyslogCtl::new());
    ctl.fail_next();
    let coordinator = SyslogCoordinator::new(ctl.clone(), FakeClock::new());

    let issued = coordinator.restart_gated().await;

    assert!(issued);
    assert_eq!(ctl.restart_count(), 1);
}
