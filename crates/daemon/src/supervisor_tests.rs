// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use haaas_adapters::{FakeBusClient, FakeReloader, FakeSyslogCtl};
use haaas_core::clock::FakeClock;
use haaas_core::Role;

fn sample_config(hap_home: &std::path::Path, status: Role) -> Config {
    Config {
        hap_home: hap_home.to_path_buf(),
        cluster_id: "c1".to_string(),
        status,
        producer_addr: "127.0.0.1:0".to_string(),
        producer_rest_addr: "http://127.0.0.1:0".to_string(),
        lookupd_addr: "127.0.0.1:0".to_string(),
        ip_addr: "4.3.2.1".to_string(),
    }
}

#[tokio::test]
async fn start_bootstraps_topics_and_shutdown_joins_every_task() {
    let dir = tempfile::tempdir().unwrap();
    let bus = Arc::new(FakeBusClient::new());
    let config = sample_config(dir.path(), Role::Slave);

    let supervisor = Supervisor::start(
        &config,
        bus.clone(),
        Arc::new(FakeReloader::new()),
        Arc::new(FakeSyslogCtl::new()),
        FakeClock::new(),
        Arc::new(crate::admin::NullAdminSurface),
    )
    .await
    .unwrap();

    assert!(bus.topic_exists(&format!("commit_slave_completed_{}", config.cluster_id)));
    assert!(bus.topic_exists(&format!("commit_completed_{}", config.cluster_id)));
    assert!(bus.topic_exists(&format!("commit_failed_{}", config.cluster_id)));

    supervisor.shutdown().await;
}
