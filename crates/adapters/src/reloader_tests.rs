// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;

#[tokio::test]
async fn shell_reloader_runs_script_and_captures_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("reload.sh");
    std::fs::write(&script, "#!/bin/sh\necho reloaded-$1\n").unwrap();

    let reloader = ShellReloader;
    let output = reloader.invoke(&script, &["reload"]).await.unwrap();
    assert_eq!(output.stdout.trim(), "reloaded-reload");
}

#[tokio::test]
async fn shell_reloader_non_zero_exit_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("reload.sh");
    std::fs::write(&script, "#!/bin/sh\necho boom 1>&2\nexit 1\n").unwrap();

    let reloader = ShellReloader;
    let err = reloader.invoke(&script, &["reload"]).await.unwrap_err();
    match err {
        ReloadError::NonZeroExit { status, stderr, .. } => {
            assert_eq!(status, 1);
            assert!(stderr.contains("boom"));
        }
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
}

#[tokio::test]
async fn fake_reloader_records_calls_and_replays_queued_results() {
    let fake = FakeReloader::new();
    fake.push_success();
    fake.push_failure("bad config");

    let first = fake.invoke(Path::new("/script"), &["reload", "-y"]).await;
    assert!(first.is_ok());

    let second = fake.invoke(Path::new("/script"), &["reload", "-y"]).await;
    assert!(second.is_err());

    assert_eq!(fake.call_count(), 2);
    assert_eq!(fake.calls()[0].args, vec!["reload".to_string(), "-y".to_string()]);
}

#[tokio::test]
async fn fake_reloader_defaults_to_success_when_queue_empty() {
    let fake = FakeReloader::new();
    let result = fake.invoke(Path::new("/script"), &["reload"]).await;
    assert!(result.is_ok());
}
