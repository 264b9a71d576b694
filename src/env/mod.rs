//! Collaborator interfaces consumed by the root, plus their implementations.
//!
//! - [`live`]: file- and OS-backed implementations used by the binary
//! - [`simulated`]: in-process synchronizer and battery source for headless runs
//! - `mock`: in-memory doubles with inspection handles for tests (hidden, not stable API)
//!
//! Synchronous traits are called directly from the reducer and must return
//! quickly; anything slow is `async` and only ever awaited from spawned tasks.

pub mod live;
#[doc(hidden)]
pub mod mock;
pub mod simulated;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::{WalletError, WalletStorageError};
use crate::state::types::{
    BackgroundTaskKind, BatteryState, DeeplinkRoute, ExportedLogs, Network, RewindPolicy,
    SeedPhrase, StoredWallet, SynchronizerSnapshot, WalletConfig, WalletInitMode,
};

/// Secure storage for the recovery phrase and wallet metadata.
pub trait KeyStorage: Send + Sync {
    /// Whether keys are stored.
    ///
    /// # Errors
    /// - `UninitializedWallet` when storage was never created on this device.
    fn are_keys_present(&self) -> Result<bool, WalletStorageError>;
    /// Read the stored wallet.
    ///
    /// # Errors
    /// - `UninitializedWallet` when nothing is stored, or a read/decode failure.
    fn export_wallet(&self) -> Result<StoredWallet, WalletStorageError>;
    /// Store a wallet, replacing any previous one.
    ///
    /// # Errors
    /// - Storage write failure.
    fn import_wallet(&self, wallet: StoredWallet) -> Result<(), WalletStorageError>;
    /// Persist the "passed backup test" mark.
    ///
    /// # Errors
    /// - Read or write failure.
    fn mark_user_passed_phrase_backup_test(&self, passed: bool) -> Result<(), WalletStorageError>;
    /// Delete the stored wallet.
    ///
    /// # Errors
    /// - Storage delete failure.
    fn nuke_wallet(&self) -> Result<(), WalletStorageError>;
}

/// On-disk synchronizer database presence.
pub trait DatabaseFiles: Send + Sync {
    /// Whether database files exist for `network`.
    fn are_db_files_present(&self, network: Network) -> bool;
    /// Delete database files for `network`.
    ///
    /// # Errors
    /// - Filesystem failure.
    fn nuke_db_files(&self, network: Network) -> Result<(), WalletError>;
}

/// The blockchain synchronizer.
#[async_trait]
pub trait Synchronizer: Send + Sync {
    /// Prepare the wallet database for `seed` and start syncing.
    async fn prepare_and_start(
        &self,
        seed: &SeedPhrase,
        birthday: u64,
        mode: WalletInitMode,
    ) -> Result<(), WalletError>;
    /// Restart a prepared synchronizer.
    async fn start(&self) -> Result<(), WalletError>;
    /// Stop syncing. Idempotent.
    async fn stop(&self);
    /// Rewind scanned state.
    async fn rewind(&self, policy: RewindPolicy) -> Result<(), WalletError>;
    /// Erase synchronizer data.
    async fn wipe(&self) -> Result<(), WalletError>;
    /// Fresh subscription to redacted snapshots. May be called again after cancellation.
    fn state_stream(&self) -> watch::Receiver<SynchronizerSnapshot>;
    /// Most recent snapshot.
    fn latest_snapshot(&self) -> SynchronizerSnapshot;
}

/// Source of feature flags.
#[async_trait]
pub trait WalletConfigProvider: Send + Sync {
    /// Load the current config.
    async fn load(&self) -> Result<WalletConfig, WalletError>;
    /// Persist one flag.
    async fn update(&self, name: &str, enabled: bool) -> Result<(), WalletError>;
}

/// Turns URLs into typed routes.
pub trait DeeplinkResolver: Send + Sync {
    /// Resolve `url`.
    ///
    /// # Errors
    /// - `DeeplinkInvalid` when the URL is not understood.
    fn resolve(&self, url: &str) -> Result<DeeplinkRoute, WalletError>;
}

/// Controls whether the device may auto-lock. Fire-and-forget.
pub trait AutolockHandler: Send + Sync {
    /// Request auto-lock to be enabled (`true`) or suppressed.
    fn set_should_lock(&self, should_lock: bool);
}

/// Schedules OS background work.
#[async_trait]
pub trait BackgroundTaskScheduler: Send + Sync {
    /// Schedule one background task kind.
    async fn schedule(&self, kind: BackgroundTaskKind) -> Result<(), WalletError>;
}

/// Free-space check.
pub trait DiskSpaceChecker: Send + Sync {
    /// Whether enough space is free to keep syncing.
    fn has_enough_free_space(&self) -> bool;
}

/// OS battery state source.
pub trait BatteryMonitor: Send + Sync {
    /// Fresh subscription to battery changes.
    fn subscribe(&self) -> watch::Receiver<BatteryState>;
}

/// Small persisted user preferences.
pub trait UserPreferences: Send + Sync {
    /// Version recorded at the previous launch.
    fn last_launched_version(&self) -> Option<String>;
    /// Record the running version.
    fn set_last_launched_version(&self, version: &str);
}

/// Copies logs somewhere shareable.
#[async_trait]
pub trait LogExporter: Send + Sync {
    /// Export logs.
    async fn export(&self) -> Result<ExportedLogs, WalletError>;
}

/// Generates new recovery phrases.
pub trait MnemonicGenerator: Send + Sync {
    /// A fresh random phrase.
    fn random_seed(&self) -> SeedPhrase;
}

/// Delays and intervals used by the long-running effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Splash delay before initial setup.
    pub splash_delay: Duration,
    /// Disk-space poll interval.
    pub status_poll_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            splash_delay: Duration::from_millis(1_500),
            status_poll_interval: Duration::from_secs(60),
        }
    }
}

/// Everything the root talks to. Cheap to clone.
#[derive(Clone)]
pub struct Environment {
    /// Key storage.
    pub key_storage: Arc<dyn KeyStorage>,
    /// Database presence.
    pub database_files: Arc<dyn DatabaseFiles>,
    /// Synchronizer.
    pub synchronizer: Arc<dyn Synchronizer>,
    /// Feature flags.
    pub wallet_config: Arc<dyn WalletConfigProvider>,
    /// Deep links.
    pub deeplink: Arc<dyn DeeplinkResolver>,
    /// Auto-lock.
    pub autolock: Arc<dyn AutolockHandler>,
    /// Background tasks.
    pub background_tasks: Arc<dyn BackgroundTaskScheduler>,
    /// Disk space.
    pub disk_space: Arc<dyn DiskSpaceChecker>,
    /// Battery.
    pub battery: Arc<dyn BatteryMonitor>,
    /// Preferences.
    pub preferences: Arc<dyn UserPreferences>,
    /// Log export.
    pub log_exporter: Arc<dyn LogExporter>,
    /// Phrase generation.
    pub mnemonic: Arc<dyn MnemonicGenerator>,
    /// Running app version.
    pub app_version: String,
    /// Effect timing.
    pub timing: Timing,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("app_version", &self.app_version)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
