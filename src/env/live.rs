//! File- and OS-backed collaborators used by the binary.
//!
//! These are reference implementations: a JSON key file stands in for the
//! platform keychain and an empty marker file stands in for the synchronizer
//! database.

use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use zeroize::Zeroizing;

use super::simulated::{ChannelBatteryMonitor, SimulatedSynchronizer};
use super::{
    AutolockHandler, BackgroundTaskScheduler, DatabaseFiles, DeeplinkResolver, DiskSpaceChecker,
    Environment, KeyStorage, LogExporter, MnemonicGenerator, Timing, UserPreferences,
    WalletConfigProvider,
};
use crate::config::settings::{load_settings, save_boolean_key};
use crate::errors::{ErrorCode, WalletError, WalletStorageError};
use crate::state::types::{
    BackgroundTaskKind, DeeplinkRoute, ExportedLogs, Network, SeedPhrase, StoredWallet,
    WalletConfig,
};

/// On-disk shape of the key file.
#[derive(serde::Serialize, serde::Deserialize)]
struct WalletFile {
    seed: String,
    birthday: u64,
    #[serde(default)]
    has_user_passed_phrase_backup_test: bool,
}

/// Key storage backed by `<dir>/wallet.json`.
///
/// A missing `dir` means storage was never created on this device.
#[derive(Debug, Clone)]
pub struct FileKeyStorage {
    dir: PathBuf,
}

impl FileKeyStorage {
    /// Storage rooted at `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn file(&self) -> PathBuf {
        self.dir.join("wallet.json")
    }

    fn write(&self, wallet: &StoredWallet) -> Result<(), WalletStorageError> {
        let body = WalletFile {
            seed: wallet.seed.expose().to_string(),
            birthday: wallet.birthday,
            has_user_passed_phrase_backup_test: wallet.has_user_passed_phrase_backup_test,
        };
        let json = Zeroizing::new(
            serde_json::to_vec(&body).map_err(|e| WalletStorageError::Storage(e.to_string()))?,
        );
        drop(Zeroizing::new(body.seed));
        fs::create_dir_all(&self.dir).map_err(|e| WalletStorageError::Storage(e.to_string()))?;
        write_private(&self.file(), &json).map_err(|e| WalletStorageError::Storage(e.to_string()))
    }
}

/// What: Write `bytes` to `path`, readable by the owner only.
///
/// Details:
/// - On unix the file is created with mode `0600`, and an existing file is
///   narrowed to `0600` before it is truncated, so the content is never
///   readable by others.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.set_len(0)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl KeyStorage for FileKeyStorage {
    fn are_keys_present(&self) -> Result<bool, WalletStorageError> {
        if !self.dir.is_dir() {
            return Err(WalletStorageError::UninitializedWallet);
        }
        Ok(self.file().is_file())
    }

    fn export_wallet(&self) -> Result<StoredWallet, WalletStorageError> {
        let raw = match fs::read_to_string(self.file()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WalletStorageError::UninitializedWallet);
            }
            Err(e) => return Err(WalletStorageError::Unavailable(e.to_string())),
        };
        let file: WalletFile = serde_json::from_str(&raw)
            .map_err(|e| WalletStorageError::Decoding(e.to_string()))?;
        Ok(StoredWallet {
            seed: SeedPhrase::new(&file.seed),
            birthday: file.birthday,
            has_user_passed_phrase_backup_test: file.has_user_passed_phrase_backup_test,
        })
    }

    fn import_wallet(&self, wallet: StoredWallet) -> Result<(), WalletStorageError> {
        self.write(&wallet)
    }

    fn mark_user_passed_phrase_backup_test(&self, passed: bool) -> Result<(), WalletStorageError> {
        let mut wallet = self.export_wallet()?;
        wallet.has_user_passed_phrase_backup_test = passed;
        self.write(&wallet)
    }

    fn nuke_wallet(&self) -> Result<(), WalletStorageError> {
        match fs::remove_file(self.file()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WalletStorageError::Storage(e.to_string())),
        }
    }
}

/// Database presence probe over `<root>/<network>/wallet.db`.
#[derive(Debug, Clone)]
pub struct FileDatabaseFiles {
    root: PathBuf,
}

impl FileDatabaseFiles {
    /// Probe rooted at `root`.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Database file path for `network`.
    #[must_use]
    pub fn db_path(&self, network: Network) -> PathBuf {
        self.root.join(network.as_str()).join("wallet.db")
    }
}

impl DatabaseFiles for FileDatabaseFiles {
    fn are_db_files_present(&self, network: Network) -> bool {
        self.db_path(network).is_file()
    }

    fn nuke_db_files(&self, network: Network) -> Result<(), WalletError> {
        let dir = self.root.join(network.as_str());
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WalletError::new(
                ErrorCode::SynchronizerWipe,
                format!("failed to remove {}: {e}", dir.display()),
            )),
        }
    }
}

/// Persisted preference fields.
#[derive(Default, serde::Serialize, serde::Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    last_launched_version: Option<String>,
}

/// Preferences stored as JSON.
#[derive(Debug, Clone)]
pub struct JsonPreferences {
    path: PathBuf,
}

impl JsonPreferences {
    /// Preferences at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> PreferencesFile {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

impl UserPreferences for JsonPreferences {
    fn last_launched_version(&self) -> Option<String> {
        self.read().last_launched_version
    }

    fn set_last_launched_version(&self, version: &str) {
        let mut prefs = self.read();
        prefs.last_launched_version = Some(version.to_string());
        if let Some(dir) = self.path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match serde_json::to_string_pretty(&prefs) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to save preferences");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode preferences"),
        }
    }
}

/// Feature flags read from `feature_<name>` keys in `settings.conf`.
#[derive(Debug, Clone)]
pub struct SettingsConfigProvider {
    path: PathBuf,
}

impl SettingsConfigProvider {
    /// Provider over the settings file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl WalletConfigProvider for SettingsConfigProvider {
    async fn load(&self) -> Result<WalletConfig, WalletError> {
        Ok(load_settings(&self.path).wallet_config())
    }

    async fn update(&self, name: &str, enabled: bool) -> Result<(), WalletError> {
        let key = format!("feature_{}", name.to_lowercase());
        save_boolean_key(&self.path, &key, enabled).map_err(|e| {
            WalletError::new(
                ErrorCode::WalletConfig,
                format!("failed to save {key} to {}: {e}", self.path.display()),
            )
        })
    }
}

/// Compares free bytes on the data volume against a threshold.
#[derive(Debug, Clone)]
pub struct StatvfsDiskChecker {
    path: PathBuf,
    min_free_bytes: u64,
}

impl StatvfsDiskChecker {
    /// Checker for the volume holding `path`.
    #[must_use]
    pub const fn new(path: PathBuf, min_free_bytes: u64) -> Self {
        Self {
            path,
            min_free_bytes,
        }
    }

    /// Free bytes available to unprivileged users, if the volume can be queried.
    #[cfg(unix)]
    fn free_bytes(&self) -> Option<u64> {
        let stat = nix::sys::statvfs::statvfs(self.path.as_path())
            .map_err(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "statvfs failed");
            })
            .ok()?;
        let blocks = u64::try_from(stat.blocks_available()).ok()?;
        let size = u64::try_from(stat.fragment_size()).ok()?;
        Some(blocks.saturating_mul(size))
    }

    #[cfg(not(unix))]
    fn free_bytes(&self) -> Option<u64> {
        None
    }
}

impl DiskSpaceChecker for StatvfsDiskChecker {
    fn has_enough_free_space(&self) -> bool {
        // Unknown free space never blocks the wallet.
        self.free_bytes()
            .is_none_or(|free| free >= self.min_free_bytes)
    }
}

/// Copies every file in the log directory into a timestamped export directory.
#[derive(Debug, Clone)]
pub struct DirLogExporter {
    logs_dir: PathBuf,
    export_root: PathBuf,
}

impl DirLogExporter {
    /// Exporter reading `logs_dir` and writing below `export_root`.
    #[must_use]
    pub const fn new(logs_dir: PathBuf, export_root: PathBuf) -> Self {
        Self {
            logs_dir,
            export_root,
        }
    }
}

fn export_error(e: &std::io::Error, path: &Path) -> WalletError {
    WalletError::new(
        ErrorCode::ExportLogs,
        format!("{}: {e}", path.display()),
    )
}

#[async_trait]
impl LogExporter for DirLogExporter {
    async fn export(&self) -> Result<ExportedLogs, WalletError> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        let base = self.export_root.join(format!("export-{stamp}"));
        let core_dir = base.join("core");
        let sdk_dir = base.join("sdk");
        tokio::fs::create_dir_all(&core_dir)
            .await
            .map_err(|e| export_error(&e, &core_dir))?;
        tokio::fs::create_dir_all(&sdk_dir)
            .await
            .map_err(|e| export_error(&e, &sdk_dir))?;
        let mut entries = tokio::fs::read_dir(&self.logs_dir)
            .await
            .map_err(|e| export_error(&e, &self.logs_dir))?;
        let mut file_count = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| export_error(&e, &self.logs_dir))?
        {
            let from = entry.path();
            if !from.is_file() {
                continue;
            }
            let to = core_dir.join(entry.file_name());
            tokio::fs::copy(&from, &to)
                .await
                .map_err(|e| export_error(&e, &from))?;
            file_count += 1;
        }
        tracing::info!(dir = %base.display(), files = file_count, "logs exported");
        Ok(ExportedLogs {
            core_dir,
            sdk_dir,
            file_count,
        })
    }
}

/// Auto-lock handler that only records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAutolock;

impl AutolockHandler for LoggingAutolock {
    fn set_should_lock(&self, should_lock: bool) {
        tracing::info!(should_lock, "auto-lock");
    }
}

/// Background scheduler that only records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingScheduler;

#[async_trait]
impl BackgroundTaskScheduler for LoggingScheduler {
    async fn schedule(&self, kind: BackgroundTaskKind) -> Result<(), WalletError> {
        tracing::info!(?kind, "background task scheduled");
        Ok(())
    }
}

/// Zatoshi per whole coin.
const ZATOSHI_PER_COIN: u64 = 100_000_000;

/// Parse a decimal coin amount (`"1.5"`) into zatoshi.
fn parse_amount(raw: &str) -> Option<u64> {
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > 8 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: u64 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<8}").parse().ok()?
    };
    whole.checked_mul(ZATOSHI_PER_COIN)?.checked_add(frac)
}

/// Resolves `zcash:` payment URIs and `wallet-root://home`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriDeeplinkResolver;

impl UriDeeplinkResolver {
    fn invalid(url: &str, why: &str) -> WalletError {
        WalletError::new(ErrorCode::DeeplinkInvalid, format!("{url}: {why}"))
    }
}

impl DeeplinkResolver for UriDeeplinkResolver {
    fn resolve(&self, url: &str) -> Result<DeeplinkRoute, WalletError> {
        let parsed = url::Url::parse(url).map_err(|e| Self::invalid(url, &e.to_string()))?;
        match parsed.scheme() {
            "zcash" => {
                let address = parsed.path().trim_matches('/').to_string();
                if address.is_empty() {
                    return Err(Self::invalid(url, "missing address"));
                }
                let mut amount = 0;
                let mut memo = None;
                for (key, value) in parsed.query_pairs() {
                    match key.as_ref() {
                        "amount" => {
                            amount = parse_amount(&value)
                                .ok_or_else(|| Self::invalid(url, "bad amount"))?;
                        }
                        "memo" => memo = Some(value.into_owned()),
                        _ => {}
                    }
                }
                Ok(DeeplinkRoute::Send {
                    address,
                    amount,
                    memo,
                })
            }
            "wallet-root" if parsed.host_str() == Some("home") => Ok(DeeplinkRoute::Home),
            _ => Err(Self::invalid(url, "unsupported link")),
        }
    }
}

/// Words drawn by [`RandomMnemonic`].
const WORDLIST: &[&str] = &[
    "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract", "absurd",
    "abuse", "access", "accident", "account", "accuse", "achieve", "acid", "acoustic", "acquire",
    "across", "act", "action", "actor", "actress", "actual", "adapt", "add", "addict", "address",
    "adjust", "admit", "adult", "advance", "advice", "aerobic", "affair", "afford", "afraid",
    "again", "age", "agent", "agree", "ahead", "aim", "air", "airport", "aisle", "alarm", "album",
    "alcohol", "alert", "alien", "all", "alley", "allow", "almost", "alone", "alpha", "already",
    "also", "alter", "always", "amateur", "amazing", "among",
];

/// Phrase length produced by [`RandomMnemonic`].
const PHRASE_WORDS: usize = 24;

/// Random phrases drawn from a small embedded wordlist.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMnemonic;

impl MnemonicGenerator for RandomMnemonic {
    fn random_seed(&self) -> SeedPhrase {
        let mut rng = rand::thread_rng();
        let words: Vec<&str> = (0..PHRASE_WORDS)
            .filter_map(|_| WORDLIST.choose(&mut rng).copied())
            .collect();
        SeedPhrase::new(&words.join(" "))
    }
}

/// Locations and knobs for [`build_environment`].
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// Wallet data root (keys, databases, preferences, exports).
    pub data_dir: PathBuf,
    /// `settings.conf` path.
    pub settings_path: PathBuf,
    /// Log directory copied by the exporter.
    pub logs_dir: PathBuf,
    /// Running version.
    pub app_version: String,
    /// Effect timing.
    pub timing: Timing,
    /// Free-space threshold.
    pub min_free_space_bytes: u64,
    /// Simulated sync step.
    pub sync_step: std::time::Duration,
}

/// Environment plus the handles the headless driver pokes directly.
#[derive(Debug, Clone)]
pub struct LiveHandles {
    /// Environment for the runtime.
    pub env: Environment,
    /// Battery source.
    pub battery: Arc<ChannelBatteryMonitor>,
    /// Simulated synchronizer.
    pub synchronizer: Arc<SimulatedSynchronizer>,
}

/// What: Wire the file-backed collaborators for one network.
///
/// Inputs:
/// - `config`: Paths and knobs resolved from settings and CLI
/// - `network`: Network the process runs on
///
/// Output:
/// - `LiveHandles` with the environment and direct handles to the simulated parts.
#[must_use]
pub fn build_environment(config: &LiveConfig, network: Network) -> LiveHandles {
    let files = FileDatabaseFiles::new(config.data_dir.join("db"));
    let synchronizer = Arc::new(SimulatedSynchronizer::new(
        files.db_path(network),
        config.sync_step,
    ));
    let battery = Arc::new(ChannelBatteryMonitor::new());
    let env = Environment {
        key_storage: Arc::new(FileKeyStorage::new(config.data_dir.join("keystore"))),
        database_files: Arc::new(files),
        synchronizer: synchronizer.clone(),
        wallet_config: Arc::new(SettingsConfigProvider::new(config.settings_path.clone())),
        deeplink: Arc::new(UriDeeplinkResolver),
        autolock: Arc::new(LoggingAutolock),
        background_tasks: Arc::new(LoggingScheduler),
        disk_space: Arc::new(StatvfsDiskChecker::new(
            config.data_dir.clone(),
            config.min_free_space_bytes,
        )),
        battery: battery.clone(),
        preferences: Arc::new(JsonPreferences::new(config.data_dir.join("preferences.json"))),
        log_exporter: Arc::new(DirLogExporter::new(
            config.logs_dir.clone(),
            config.data_dir.join("exports"),
        )),
        mnemonic: Arc::new(RandomMnemonic),
        app_version: config.app_version.clone(),
        timing: config.timing,
    };
    LiveHandles {
        env,
        battery,
        synchronizer,
    }
}
