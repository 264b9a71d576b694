//! wallet-root binary entrypoint kept minimal. The runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use clap::Parser;

use wallet_root::app;
use wallet_root::args::{Args, determine_log_level, resolve_network};
use wallet_root::config;
use wallet_root::env::live::{LiveConfig, build_environment};
use wallet_root::i18n;
use wallet_root::state::AppState;

struct WalletRootTimer;

impl tracing_subscriber::fmt::time::FormatTime for WalletRootTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Simulated synchronizer step for headless runs.
const SYNC_STEP: Duration = Duration::from_millis(500);

/// What: Initialize tracing to `<config>/logs/wallet-root.log`, or stderr if the file cannot be opened.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset.
fn init_logging(level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("wallet-root.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(WalletRootTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: log to stderr so startup is never blocked
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(WalletRootTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&determine_log_level(&args));

    let settings_path = config::settings_path();
    if let Err(e) = config::ensure_settings_file(&settings_path) {
        tracing::warn!(path = %settings_path.display(), error = %e, "could not write settings skeleton");
    }
    let settings = config::load_settings(&settings_path);

    let network = match resolve_network(&args, &settings) {
        Ok(network) => network,
        Err(err) => {
            tracing::error!(error = %err, "startup aborted");
            eprintln!("wallet-root: {err}");
            std::process::exit(2);
        }
    };

    let locale = i18n::resolve_locale(args.locale.as_deref().unwrap_or(&settings.locale));
    let locales_dir = config::locales_dir();
    let (translations, fallback) = i18n::load_translations(&locale, Some(&locales_dir));
    let app_state = AppState::with_translations(network, &locale, translations, fallback);

    let app_version = settings
        .current_version
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let live = LiveConfig {
        data_dir: config::data_dir(args.data_dir.as_deref()),
        settings_path,
        logs_dir: config::logs_dir(),
        app_version: app_version.clone(),
        timing: settings.timing(),
        min_free_space_bytes: settings.min_free_space_bytes(),
        sync_step: SYNC_STEP,
    };
    tracing::info!(
        network = network.as_str(),
        version = %app_version,
        data_dir = %live.data_dir.display(),
        locale = %locale,
        "wallet-root starting"
    );
    let handles = build_environment(&live, network);
    if let Err(err) = app::run_headless(app_state, handles, args.headless_script.as_deref()).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("wallet-root: {err}");
    }
    tracing::info!("wallet-root exited");
}
