//! Headless driver over the file-backed environment.

use std::time::Duration;

use wallet_root::app::run_headless;
use wallet_root::env::Timing;
use wallet_root::env::live::{LiveConfig, build_environment};
use wallet_root::state::types::Network;
use wallet_root::test_utils::new_app;

#[tokio::test(flavor = "multi_thread")]
/// What: A scripted session creates a wallet on disk.
///
/// Inputs:
/// - Temp data directory; script: wait, get-started, create, wait, status, quit.
///
/// Output:
/// - `run_headless` returns `Ok`; key file and simulated database exist.
async fn scripted_session_creates_wallet_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");
    let config = LiveConfig {
        data_dir: data_dir.clone(),
        settings_path: dir.path().join("settings.conf"),
        logs_dir: dir.path().join("logs"),
        app_version: "0.0.0-test".into(),
        timing: Timing {
            splash_delay: Duration::ZERO,
            status_poll_interval: Duration::from_secs(3_600),
        },
        min_free_space_bytes: 0,
        sync_step: Duration::from_millis(20),
    };
    let script = dir.path().join("session.txt");
    std::fs::write(
        &script,
        "# scripted session\nwait 500\nget-started\ncreate\nwait 1000\nstatus\nquit\n",
    )
    .expect("write script");

    let handles = build_environment(&config, Network::Testnet);
    let result = tokio::time::timeout(
        Duration::from_secs(10),
        run_headless(new_app(), handles, Some(&script)),
    )
    .await
    .expect("session finished in time");

    assert!(result.is_ok(), "headless session failed: {result:?}");
    assert!(data_dir.join("keystore").join("wallet.json").is_file());
    assert!(data_dir.join("db").join("testnet").join("wallet.db").is_file());
}
