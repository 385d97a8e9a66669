// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn shell_syslog_ctl_runs_configured_command() {
    let ctl = ShellSyslogCtl::new(vec!["true".to_string()]);
    ctl.restart().await.unwrap();
}

#[tokio::test]
async fn shell_syslog_ctl_non_zero_exit_is_error() {
    let ctl = ShellSyslogCtl::new(vec!["false".to_string()]);
    let err = ctl.restart().await.unwrap_err();
    assert!(matches!(err, SyslogCtlError::NonZeroExit(_)));
}

#[tokio::test]
async fn fake_syslog_ctl_counts_restarts() {
    let fake = FakeSyslogCtl::new();
    fake.restart().await.unwrap();
    fake.restart().await.unwrap();
    assert_eq!(fake.restart_count(), 2);
}

#[tokio::test]
async fn fake_syslog_ctl_fail_next_only_fails_once() {
    let fake = FakeSyslogCtl::new();
    fake.fail_next();
    assert!(fake.restart().await.is_err());
    assert!(fake.restart().await.is_ok());
    assert_eq!(fake.restart_count(), 2);
}
