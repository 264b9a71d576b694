//! In-process stand-ins for the blockchain synchronizer and the OS battery
//! source, used by the headless binary.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::{BatteryMonitor, Synchronizer};
use crate::errors::{ErrorCode, WalletError};
use crate::state::types::{
    BatteryState, ConnectionState, RewindPolicy, SeedPhrase, SynchronizerSnapshot, WalletInitMode,
};

/// Battery source fed by whoever holds the handle.
#[derive(Debug)]
pub struct ChannelBatteryMonitor {
    tx: watch::Sender<BatteryState>,
}

impl ChannelBatteryMonitor {
    /// Monitor starting at `Unknown`.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(BatteryState::Unknown);
        Self { tx }
    }

    /// Publish a new battery state.
    pub fn set(&self, state: BatteryState) {
        self.tx.send_replace(state);
    }
}

impl Default for ChannelBatteryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryMonitor for ChannelBatteryMonitor {
    fn subscribe(&self) -> watch::Receiver<BatteryState> {
        self.tx.subscribe()
    }
}

/// Height the simulated chain starts at.
const START_HEIGHT: u64 = 2_400_000;
/// Progress added per step.
const PROGRESS_STEP: u8 = 10;

/// Synchronizer that creates an empty database file and advances progress on a timer.
#[derive(Debug)]
pub struct SimulatedSynchronizer {
    db_path: PathBuf,
    step: Duration,
    snapshots: Arc<watch::Sender<SynchronizerSnapshot>>,
    ticker: Mutex<Option<AbortHandle>>,
}

impl SimulatedSynchronizer {
    /// Synchronizer writing its database marker to `db_path`, stepping every `step`.
    #[must_use]
    pub fn new(db_path: PathBuf, step: Duration) -> Self {
        let (tx, _) = watch::channel(SynchronizerSnapshot {
            latest_height: START_HEIGHT,
            ..SynchronizerSnapshot::default()
        });
        Self {
            db_path,
            step,
            snapshots: Arc::new(tx),
            ticker: Mutex::new(None),
        }
    }

    /// Force a connection state (headless `sync` command).
    pub fn set_connection(&self, connection: ConnectionState) {
        self.snapshots.send_modify(|s| s.connection = connection);
    }

    fn spawn_ticker(&self) {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if ticker.is_some() {
            return;
        }
        let tx = Arc::clone(&self.snapshots);
        let step = self.step;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(step);
            interval.tick().await;
            loop {
                interval.tick().await;
                tx.send_if_modified(|s| {
                    if s.connection != ConnectionState::Connected || s.sync_progress >= 100 {
                        return false;
                    }
                    s.sync_progress = s.sync_progress.saturating_add(PROGRESS_STEP).min(100);
                    s.latest_height += 1;
                    true
                });
            }
        });
        *ticker = Some(handle.abort_handle());
    }

    fn stop_ticker(&self) {
        if let Some(handle) = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for SimulatedSynchronizer {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[async_trait]
impl Synchronizer for SimulatedSynchronizer {
    async fn prepare_and_start(
        &self,
        _seed: &SeedPhrase,
        _birthday: u64,
        mode: WalletInitMode,
    ) -> Result<(), WalletError> {
        if let Some(dir) = self.db_path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                WalletError::new(ErrorCode::SynchronizerStart, format!("{}: {e}", dir.display()))
            })?;
        }
        if !self.db_path.is_file() {
            tokio::fs::write(&self.db_path, b"").await.map_err(|e| {
                WalletError::new(
                    ErrorCode::SynchronizerStart,
                    format!("{}: {e}", self.db_path.display()),
                )
            })?;
        }
        let progress = if mode == WalletInitMode::NewWallet { 100 } else { 0 };
        self.snapshots.send_modify(|s| s.sync_progress = progress);
        tracing::info!(?mode, "simulated synchronizer prepared");
        self.spawn_ticker();
        Ok(())
    }

    async fn start(&self) -> Result<(), WalletError> {
        if !self.db_path.is_file() {
            return Err(WalletError::new(
                ErrorCode::SynchronizerStart,
                "database missing; prepare the synchronizer first",
            ));
        }
        self.spawn_ticker();
        Ok(())
    }

    async fn stop(&self) {
        self.stop_ticker();
    }

    async fn rewind(&self, policy: RewindPolicy) -> Result<(), WalletError> {
        self.snapshots.send_modify(|s| {
            s.sync_progress = match policy {
                RewindPolicy::Quick => s.sync_progress.saturating_sub(PROGRESS_STEP),
                RewindPolicy::Full => 0,
            };
        });
        Ok(())
    }

    async fn wipe(&self) -> Result<(), WalletError> {
        self.stop_ticker();
        match tokio::fs::remove_file(&self.db_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(WalletError::new(
                    ErrorCode::SynchronizerWipe,
                    format!("{}: {e}", self.db_path.display()),
                ));
            }
        }
        self.snapshots.send_replace(SynchronizerSnapshot {
            latest_height: START_HEIGHT,
            ..SynchronizerSnapshot::default()
        });
        Ok(())
    }

    fn state_stream(&self) -> watch::Receiver<SynchronizerSnapshot> {
        self.snapshots.subscribe()
    }

    fn latest_snapshot(&self) -> SynchronizerSnapshot {
        *self.snapshots.borrow()
    }
}
