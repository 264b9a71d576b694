//! Core value types shared across the root state, actions, and collaborators.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use zeroize::Zeroizing;

/// Chain the wallet is built for. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Network {
    /// Production chain.
    Mainnet,
    /// Public test chain.
    Testnet,
}

impl Network {
    /// Parse a network name as written in `settings.conf` or on the command line.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Some(Self::Mainnet),
            "testnet" | "test" => Some(Self::Testnet),
            _ => None,
        }
    }

    /// Lower-case identifier used for directory names and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Ticker of the native token on this network.
    #[must_use]
    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Mainnet => "ZEC",
            Self::Testnet => "TAZ",
        }
    }
}

/// Result of probing key storage and database files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitializationState {
    /// Neither keys nor database files exist.
    #[default]
    Uninitialized,
    /// Database files exist but the keys are gone.
    KeysMissing,
    /// Keys exist but the database files are gone.
    FilesMissing,
    /// Keys and database files are both present.
    Initialized,
    /// Key storage could not be read.
    Failed,
}

impl InitializationState {
    /// Name used inside localized messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::KeysMissing => "keysMissing",
            Self::FilesMissing => "filesMissing",
            Self::Initialized => "initialized",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for InitializationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How this process came to be running. Set once during startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStartState {
    /// Not yet determined.
    #[default]
    Unknown,
    /// No previous launch recorded and no keys present.
    FirstInstall,
    /// A previous launch of a different version was recorded.
    UpgradedPreviousInstall,
    /// No previous launch recorded, yet keys exist (device restored from backup).
    RestoredFromBackup,
}

/// Status shown by the wallet status panel and read by concurrent effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletStatus {
    /// Nothing to report.
    #[default]
    None,
    /// A restore-from-seed is syncing.
    Restoring,
    /// The synchronizer lost its connection.
    Disconnected,
}

impl WalletStatus {
    /// Translation key for the status panel text, if any text is shown.
    #[must_use]
    pub const fn text_key(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Restoring => Some("wallet_status.restoring"),
            Self::Disconnected => Some("wallet_status.disconnected"),
        }
    }
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destination {
    /// Startup/debug screen, also used as the low-space screen.
    #[default]
    Startup,
    /// Welcome screen offering onboarding or import.
    Welcome,
    /// Create or import a wallet.
    Onboarding,
    /// Recovery phrase display.
    PhraseDisplay,
    /// Recovery phrase backup test.
    PhraseValidation,
    /// Home tabs.
    Home,
    /// Developer sandbox.
    Sandbox,
}

impl Destination {
    /// Whether showing this screen requires keys and database files.
    #[must_use]
    pub const fn requires_initialized_wallet(self) -> bool {
        matches!(self, Self::Home | Self::PhraseDisplay | Self::PhraseValidation)
    }

    /// Parse a destination name used by the headless command driver.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "startup" | "debug" => Some(Self::Startup),
            "welcome" => Some(Self::Welcome),
            "onboarding" => Some(Self::Onboarding),
            "phrasedisplay" => Some(Self::PhraseDisplay),
            "phrasevalidation" => Some(Self::PhraseValidation),
            "home" | "tabs" => Some(Self::Home),
            "sandbox" => Some(Self::Sandbox),
            _ => None,
        }
    }
}

/// Current destination plus one level of back navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestinationState {
    /// Screen currently shown.
    pub destination: Destination,
    /// Screen shown before the last explicit navigation; cleared once consumed.
    pub previous_destination: Option<Destination>,
    /// Set while the device lacks free space; locks routing to `Startup`.
    pub low_space: bool,
}

/// How the synchronizer should be prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletInitMode {
    /// Freshly generated seed; nothing to scan.
    NewWallet,
    /// Keys and database already match.
    ExistingWallet,
    /// Seed imported or database lost; scan from birthday.
    RestoreWallet,
}

/// Connection state reported in a synchronizer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Connected to the light wallet server.
    #[default]
    Connected,
    /// Network connectivity lost.
    Disconnected,
    /// Server reachable at network level but refusing service.
    ServiceUnavailable,
}

/// Redacted synchronizer status: no keys, no balances, no addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynchronizerSnapshot {
    /// Latest scanned block height.
    pub latest_height: u64,
    /// Connectivity.
    pub connection: ConnectionState,
    /// Scan progress in percent (0..=100).
    pub sync_progress: u8,
}

impl SynchronizerSnapshot {
    /// Whether the wallet has caught up with the chain tip.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.sync_progress >= 100 && matches!(self.connection, ConnectionState::Connected)
    }
}

/// Feature flag enabling the recovery phrase backup test.
pub const FLAG_TEST_BACKUP_PHRASE_FLOW: &str = "testBackupPhraseFlow";
/// Feature flag enabling the new onboarding flow copy.
pub const FLAG_ONBOARDING_FLOW: &str = "onboardingFlow";
/// Feature flag enabling fiat conversion in balances.
pub const FLAG_SHOW_FIAT_CONVERSION: &str = "showFiatConversion";

/// Feature-flag mapping. Always replaced wholesale, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletConfig {
    /// Flag name to enabled state.
    pub flags: HashMap<String, bool>,
}

impl WalletConfig {
    /// Default flag set shipped with the app.
    #[must_use]
    pub fn initial() -> Self {
        let flags = [
            (FLAG_ONBOARDING_FLOW, false),
            (FLAG_TEST_BACKUP_PHRASE_FLOW, false),
            (FLAG_SHOW_FIAT_CONVERSION, false),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { flags }
    }

    /// Whether `name` is present and enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Builder-style copy with one flag set; the original is left untouched.
    #[must_use]
    pub fn with_flag(&self, name: &str, enabled: bool) -> Self {
        let mut flags = self.flags.clone();
        flags.insert(name.to_string(), enabled);
        Self { flags }
    }
}

/// Battery state as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatteryState {
    /// Not reported.
    #[default]
    Unknown,
    /// Running on battery.
    Unplugged,
    /// Charging.
    Charging,
    /// Fully charged and plugged in.
    Full,
}

impl BatteryState {
    /// Parse a battery state name used by the headless command driver.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "unplugged" | "battery" => Some(Self::Unplugged),
            "charging" => Some(Self::Charging),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// OS background work the app asks to be scheduled when backgrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundTaskKind {
    /// Background blockchain sync.
    Sync,
    /// Periodic scheduler wake-up.
    Scheduler,
}

/// Rescan depth chosen in the debug rescan dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewindPolicy {
    /// Rewind to the last checkpoint.
    Quick,
    /// Rewind to the wallet birthday.
    Full,
}

/// Typed destination request produced by the deeplink resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeeplinkRoute {
    /// Open the home tabs.
    Home,
    /// Open the send tab prefilled from a payment URI.
    Send {
        /// Recipient address.
        address: String,
        /// Amount in zatoshi.
        amount: u64,
        /// Optional memo.
        memo: Option<String>,
    },
}

impl DeeplinkRoute {
    /// Screen this route lands on.
    #[must_use]
    pub const fn destination(&self) -> Destination {
        match self {
            Self::Home | Self::Send { .. } => Destination::Home,
        }
    }
}

/// Recovery phrase held in memory. Zeroed on drop and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedPhrase(Zeroizing<String>);

impl SeedPhrase {
    /// Wrap a phrase, normalising whitespace between words.
    #[must_use]
    pub fn new(phrase: &str) -> Self {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(Zeroizing::new(normalized))
    }

    /// Phrase as a single space-separated string.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Individual words in order.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.0.split(' ').filter(|w| !w.is_empty()).collect()
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase(<{} words redacted>)", self.words().len())
    }
}

/// Wallet material persisted by the key storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWallet {
    /// Recovery phrase.
    pub seed: SeedPhrase,
    /// Block height at which the wallet was created.
    pub birthday: u64,
    /// Whether the user passed the recovery phrase backup test.
    pub has_user_passed_phrase_backup_test: bool,
}

/// Wallet creation or import deferred until a pending wipe completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWalletSetup {
    /// Create a fresh wallet.
    CreateNew,
    /// Import the given seed.
    Import {
        /// Seed to import.
        seed: SeedPhrase,
        /// Birthday height supplied with the seed.
        birthday: u64,
    },
}

/// Result of exporting logs for sharing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportedLogs {
    /// Directory holding exported core logs.
    pub core_dir: PathBuf,
    /// Directory holding exported synchronizer logs.
    pub sdk_dir: PathBuf,
    /// Number of files copied.
    pub file_count: usize,
}
