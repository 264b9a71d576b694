//! In-memory collaborator doubles with inspection handles.
//!
//! Used by unit tests and the integration tests under `tests/`. Hidden from
//! the documentation and not part of the supported API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use super::live::UriDeeplinkResolver;
use super::simulated::ChannelBatteryMonitor;
use super::{
    AutolockHandler, BackgroundTaskScheduler, DatabaseFiles, DiskSpaceChecker, Environment,
    KeyStorage, LogExporter, MnemonicGenerator, Synchronizer, Timing, UserPreferences,
    WalletConfigProvider,
};
use crate::errors::{ErrorCode, WalletError, WalletStorageError};
use crate::state::types::{
    BackgroundTaskKind, ExportedLogs, Network, RewindPolicy, SeedPhrase, StoredWallet,
    SynchronizerSnapshot, WalletConfig, WalletInitMode,
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct KeyStorageInner {
    initialized: bool,
    wallet: Option<StoredWallet>,
    read_error: Option<WalletStorageError>,
    write_error: Option<WalletStorageError>,
}

/// Key storage kept in memory.
#[derive(Debug, Default)]
pub struct MockKeyStorage {
    inner: Mutex<KeyStorageInner>,
}

impl MockKeyStorage {
    /// Storage that was never created (`UninitializedWallet` on read).
    #[must_use]
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Store `phrase` with `birthday`.
    pub fn store_seed(&self, phrase: &str, birthday: u64) {
        let mut inner = lock(&self.inner);
        inner.initialized = true;
        inner.wallet = Some(StoredWallet {
            seed: SeedPhrase::new(phrase),
            birthday,
            has_user_passed_phrase_backup_test: false,
        });
    }

    /// Make reads fail with `err` (`None` restores normal behaviour).
    pub fn fail_with(&self, err: Option<WalletStorageError>) {
        lock(&self.inner).read_error = err;
    }

    /// Make writes fail with `err` (`None` restores normal behaviour).
    pub fn fail_writes_with(&self, err: Option<WalletStorageError>) {
        lock(&self.inner).write_error = err;
    }

    /// Stored wallet, if any.
    #[must_use]
    pub fn stored(&self) -> Option<StoredWallet> {
        lock(&self.inner).wallet.clone()
    }
}

impl KeyStorage for MockKeyStorage {
    fn are_keys_present(&self) -> Result<bool, WalletStorageError> {
        let inner = lock(&self.inner);
        if let Some(err) = &inner.read_error {
            return Err(err.clone());
        }
        if !inner.initialized {
            return Err(WalletStorageError::UninitializedWallet);
        }
        Ok(inner.wallet.is_some())
    }

    fn export_wallet(&self) -> Result<StoredWallet, WalletStorageError> {
        let inner = lock(&self.inner);
        if let Some(err) = &inner.read_error {
            return Err(err.clone());
        }
        inner
            .wallet
            .clone()
            .ok_or(WalletStorageError::UninitializedWallet)
    }

    fn import_wallet(&self, wallet: StoredWallet) -> Result<(), WalletStorageError> {
        let mut inner = lock(&self.inner);
        if let Some(err) = &inner.write_error {
            return Err(err.clone());
        }
        inner.initialized = true;
        inner.wallet = Some(wallet);
        Ok(())
    }

    fn mark_user_passed_phrase_backup_test(&self, passed: bool) -> Result<(), WalletStorageError> {
        let mut inner = lock(&self.inner);
        if let Some(err) = &inner.write_error {
            return Err(err.clone());
        }
        let wallet = inner
            .wallet
            .as_mut()
            .ok_or(WalletStorageError::UninitializedWallet)?;
        wallet.has_user_passed_phrase_backup_test = passed;
        Ok(())
    }

    fn nuke_wallet(&self) -> Result<(), WalletStorageError> {
        let mut inner = lock(&self.inner);
        if let Some(err) = &inner.write_error {
            return Err(err.clone());
        }
        inner.wallet = None;
        Ok(())
    }
}

/// Database presence flag.
#[derive(Debug, Default)]
pub struct MockDatabaseFiles {
    present: AtomicBool,
    nuke_error: Mutex<Option<WalletError>>,
}

impl MockDatabaseFiles {
    /// Files present or not.
    #[must_use]
    pub fn new(present: bool) -> Self {
        Self {
            present: AtomicBool::new(present),
            nuke_error: Mutex::new(None),
        }
    }

    /// Change presence.
    pub fn set_present(&self, present: bool) {
        self.present.store(present, Ordering::SeqCst);
    }

    /// Make deletion fail.
    pub fn fail_nuke_with(&self, err: Option<WalletError>) {
        *lock(&self.nuke_error) = err;
    }
}

impl DatabaseFiles for MockDatabaseFiles {
    fn are_db_files_present(&self, _network: Network) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    fn nuke_db_files(&self, _network: Network) -> Result<(), WalletError> {
        if let Some(err) = lock(&self.nuke_error).clone() {
            return Err(err);
        }
        self.set_present(false);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SynchronizerFailures {
    start: Option<WalletError>,
    rewind: Option<WalletError>,
    restart: Option<WalletError>,
    wipe: Option<WalletError>,
}

/// Synchronizer double: snapshots are pushed by the test.
#[derive(Debug)]
pub struct MockSynchronizer {
    snapshots: watch::Sender<SynchronizerSnapshot>,
    files: Arc<MockDatabaseFiles>,
    failures: Mutex<SynchronizerFailures>,
    calls: Mutex<Vec<String>>,
    start_gate: watch::Sender<bool>,
}

impl MockSynchronizer {
    /// Synchronizer that marks `files` present once prepared.
    #[must_use]
    pub fn new(files: Arc<MockDatabaseFiles>) -> Self {
        let (snapshots, _) = watch::channel(SynchronizerSnapshot {
            latest_height: 2_400_000,
            ..SynchronizerSnapshot::default()
        });
        Self {
            snapshots,
            files,
            failures: Mutex::new(SynchronizerFailures::default()),
            calls: Mutex::new(Vec::new()),
            start_gate: watch::channel(true).0,
        }
    }

    /// Publish a snapshot to subscribers.
    pub fn emit(&self, snapshot: SynchronizerSnapshot) {
        self.snapshots.send_replace(snapshot);
    }

    /// Make `prepare_and_start` fail.
    pub fn fail_start_with(&self, err: Option<WalletError>) {
        lock(&self.failures).start = err;
    }

    /// Hold (`false`) or release (`true`) pending `prepare_and_start` calls.
    pub fn set_start_open(&self, open: bool) {
        self.start_gate.send_replace(open);
    }

    /// Make `rewind` fail.
    pub fn fail_rewind_with(&self, err: Option<WalletError>) {
        lock(&self.failures).rewind = err;
    }

    /// Make `start` (restart after rewind) fail.
    pub fn fail_restart_with(&self, err: Option<WalletError>) {
        lock(&self.failures).restart = err;
    }

    /// Make `wipe` fail.
    pub fn fail_wipe_with(&self, err: Option<WalletError>) {
        lock(&self.failures).wipe = err;
    }

    /// Calls received so far, e.g. `prepare_and_start:RestoreWallet`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl Synchronizer for MockSynchronizer {
    async fn prepare_and_start(
        &self,
        _seed: &SeedPhrase,
        _birthday: u64,
        mode: WalletInitMode,
    ) -> Result<(), WalletError> {
        self.record(format!("prepare_and_start:{mode:?}"));
        let mut gate = self.start_gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;
        if let Some(err) = lock(&self.failures).start.clone() {
            return Err(err);
        }
        self.files.set_present(true);
        Ok(())
    }

    async fn start(&self) -> Result<(), WalletError> {
        self.record("start".into());
        lock(&self.failures).restart.clone().map_or(Ok(()), Err)
    }

    async fn stop(&self) {
        self.record("stop".into());
    }

    async fn rewind(&self, policy: RewindPolicy) -> Result<(), WalletError> {
        self.record(format!("rewind:{policy:?}"));
        lock(&self.failures).rewind.clone().map_or(Ok(()), Err)
    }

    async fn wipe(&self) -> Result<(), WalletError> {
        self.record("wipe".into());
        lock(&self.failures).wipe.clone().map_or(Ok(()), Err)
    }

    fn state_stream(&self) -> watch::Receiver<SynchronizerSnapshot> {
        self.snapshots.subscribe()
    }

    fn latest_snapshot(&self) -> SynchronizerSnapshot {
        *self.snapshots.borrow()
    }
}

/// Config held in memory.
#[derive(Debug)]
pub struct MockConfigProvider {
    config: Mutex<WalletConfig>,
}

impl MockConfigProvider {
    /// Provider serving `config`.
    #[must_use]
    pub fn new(config: WalletConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    /// Replace the served config.
    pub fn set(&self, config: WalletConfig) {
        *lock(&self.config) = config;
    }
}

#[async_trait]
impl WalletConfigProvider for MockConfigProvider {
    async fn load(&self) -> Result<WalletConfig, WalletError> {
        Ok(lock(&self.config).clone())
    }

    async fn update(&self, name: &str, enabled: bool) -> Result<(), WalletError> {
        let mut config = lock(&self.config);
        *config = config.with_flag(name, enabled);
        Ok(())
    }
}

/// Records auto-lock requests.
#[derive(Debug, Default)]
pub struct MockAutolock {
    calls: Mutex<Vec<bool>>,
}

impl MockAutolock {
    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<bool> {
        lock(&self.calls).clone()
    }
}

impl AutolockHandler for MockAutolock {
    fn set_should_lock(&self, should_lock: bool) {
        lock(&self.calls).push(should_lock);
    }
}

/// Records scheduled background tasks.
#[derive(Debug, Default)]
pub struct MockScheduler {
    scheduled: Mutex<Vec<BackgroundTaskKind>>,
}

impl MockScheduler {
    /// Kinds scheduled so far.
    #[must_use]
    pub fn scheduled(&self) -> Vec<BackgroundTaskKind> {
        lock(&self.scheduled).clone()
    }
}

#[async_trait]
impl BackgroundTaskScheduler for MockScheduler {
    async fn schedule(&self, kind: BackgroundTaskKind) -> Result<(), WalletError> {
        lock(&self.scheduled).push(kind);
        Ok(())
    }
}

/// Switchable free-space answer.
#[derive(Debug)]
pub struct MockDiskSpace {
    enough: AtomicBool,
}

impl MockDiskSpace {
    /// Change the answer.
    pub fn set_enough(&self, enough: bool) {
        self.enough.store(enough, Ordering::SeqCst);
    }
}

impl Default for MockDiskSpace {
    fn default() -> Self {
        Self {
            enough: AtomicBool::new(true),
        }
    }
}

impl DiskSpaceChecker for MockDiskSpace {
    fn has_enough_free_space(&self) -> bool {
        self.enough.load(Ordering::SeqCst)
    }
}

/// Last launched version in memory.
#[derive(Debug, Default)]
pub struct MockPreferences {
    last_version: Mutex<Option<String>>,
}

impl UserPreferences for MockPreferences {
    fn last_launched_version(&self) -> Option<String> {
        lock(&self.last_version).clone()
    }

    fn set_last_launched_version(&self, version: &str) {
        *lock(&self.last_version) = Some(version.to_string());
    }
}

/// Log exporter answering with a fixed result.
#[derive(Debug, Default)]
pub struct MockLogExporter {
    failure: Mutex<Option<WalletError>>,
}

impl MockLogExporter {
    /// Make exports fail.
    pub fn fail_with(&self, err: Option<WalletError>) {
        *lock(&self.failure) = err;
    }
}

#[async_trait]
impl LogExporter for MockLogExporter {
    async fn export(&self) -> Result<ExportedLogs, WalletError> {
        if let Some(err) = lock(&self.failure).clone() {
            return Err(err);
        }
        Ok(ExportedLogs {
            file_count: 2,
            ..ExportedLogs::default()
        })
    }
}

/// Always produces the same phrase.
#[derive(Debug)]
pub struct FixedMnemonic(pub SeedPhrase);

impl MnemonicGenerator for FixedMnemonic {
    fn random_seed(&self) -> SeedPhrase {
        self.0.clone()
    }
}

/// Phrase produced by the harness mnemonic generator.
pub const HARNESS_PHRASE: &str = "abandon ability able about above absent absorb abstract absurd abuse access accident";

/// An `Environment` wired to in-memory doubles, with typed handles to each.
#[derive(Clone)]
pub struct MockHarness {
    /// Environment to hand to the reducer or runtime.
    pub env: Environment,
    /// Key storage.
    pub keys: Arc<MockKeyStorage>,
    /// Database presence.
    pub files: Arc<MockDatabaseFiles>,
    /// Synchronizer.
    pub synchronizer: Arc<MockSynchronizer>,
    /// Config provider.
    pub config: Arc<MockConfigProvider>,
    /// Auto-lock recorder.
    pub autolock: Arc<MockAutolock>,
    /// Background task recorder.
    pub scheduler: Arc<MockScheduler>,
    /// Free-space switch.
    pub disk: Arc<MockDiskSpace>,
    /// Battery source.
    pub battery: Arc<ChannelBatteryMonitor>,
    /// Preferences.
    pub preferences: Arc<MockPreferences>,
    /// Log exporter.
    pub log_exporter: Arc<MockLogExporter>,
}

impl MockHarness {
    /// Fresh device: storage never created, no files, plenty of space.
    #[must_use]
    pub fn new() -> Self {
        let keys = Arc::new(MockKeyStorage::uninitialized());
        let files = Arc::new(MockDatabaseFiles::new(false));
        let synchronizer = Arc::new(MockSynchronizer::new(Arc::clone(&files)));
        let config = Arc::new(MockConfigProvider::new(WalletConfig::initial()));
        let autolock = Arc::new(MockAutolock::default());
        let scheduler = Arc::new(MockScheduler::default());
        let disk = Arc::new(MockDiskSpace::default());
        let battery = Arc::new(ChannelBatteryMonitor::new());
        let preferences = Arc::new(MockPreferences::default());
        let log_exporter = Arc::new(MockLogExporter::default());
        let env = Environment {
            key_storage: keys.clone(),
            database_files: files.clone(),
            synchronizer: synchronizer.clone(),
            wallet_config: config.clone(),
            deeplink: Arc::new(UriDeeplinkResolver),
            autolock: autolock.clone(),
            background_tasks: scheduler.clone(),
            disk_space: disk.clone(),
            battery: battery.clone(),
            preferences: preferences.clone(),
            log_exporter: log_exporter.clone(),
            mnemonic: Arc::new(FixedMnemonic(SeedPhrase::new(HARNESS_PHRASE))),
            app_version: "1.0.0-test".to_string(),
            timing: Timing {
                splash_delay: Duration::ZERO,
                status_poll_interval: Duration::from_secs(3_600),
            },
        };
        Self {
            env,
            keys,
            files,
            synchronizer,
            config,
            autolock,
            scheduler,
            disk,
            battery,
            preferences,
            log_exporter,
        }
    }

    /// Device with a stored wallet and its database files.
    #[must_use]
    pub fn initialized() -> Self {
        let harness = Self::new();
        harness.keys.store_seed(HARNESS_PHRASE, 2_000_000);
        harness.files.set_present(true);
        harness
    }
}

impl Default for MockHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage error used by tests simulating a locked keychain.
#[must_use]
pub fn locked_storage() -> WalletStorageError {
    WalletStorageError::Unavailable("device locked".into())
}

/// Generic failure for a given code.
#[must_use]
pub fn failure(code: ErrorCode, message: &str) -> WalletError {
    WalletError::new(code, message)
}
