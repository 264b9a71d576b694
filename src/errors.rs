//! Error types shared by the orchestration core and its collaborators.
//!
//! Failures never crash the root state machine. They are carried as data into
//! alerts (see `crate::state::modal::ErrorDetail`) and left to explicit user action.

use std::fmt;

/// Failures reported by the secure key storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletStorageError {
    /// No storage has ever been created on this device.
    #[error("wallet storage is uninitialized")]
    UninitializedWallet,
    /// Stored wallet data exists but could not be decoded.
    #[error("stored wallet data could not be decoded: {0}")]
    Decoding(String),
    /// The keychain refused access (e.g. device locked).
    #[error("secure storage unavailable: {0}")]
    Unavailable(String),
    /// A write or delete against storage failed.
    #[error("failed to write wallet data: {0}")]
    Storage(String),
}

impl WalletStorageError {
    /// Stable error code used in alert details and logs.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UninitializedWallet => ErrorCode::StorageUninitialized,
            Self::Decoding(_) => ErrorCode::StorageDecoding,
            Self::Unavailable(_) => ErrorCode::StorageUnavailable,
            Self::Storage(_) => ErrorCode::StorageWrite,
        }
    }
}

/// Stable error codes surfaced to the user next to the human-readable detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Key storage has never been created.
    StorageUninitialized,
    /// Key storage content is corrupt.
    StorageDecoding,
    /// Key storage is locked or otherwise unreachable.
    StorageUnavailable,
    /// Key storage write failed.
    StorageWrite,
    /// Synchronizer could not be prepared or started.
    SynchronizerStart,
    /// Synchronizer rewind failed.
    SynchronizerRewind,
    /// Synchronizer data wipe failed.
    SynchronizerWipe,
    /// Lightwalletd endpoint unreachable.
    ServiceUnavailable,
    /// Deep link could not be parsed into a route.
    DeeplinkInvalid,
    /// Deep link requires an initialized wallet.
    DeeplinkWalletNotInitialized,
    /// Wallet-config load or update failed.
    WalletConfig,
    /// Log export failed.
    ExportLogs,
    /// Wallet initialization probe reported a failure.
    WalletStateFailed,
}

impl ErrorCode {
    /// Short code string rendered into alert messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StorageUninitialized => "WSTO0001",
            Self::StorageDecoding => "WSTO0002",
            Self::StorageUnavailable => "WSTO0003",
            Self::StorageWrite => "WSTO0004",
            Self::SynchronizerStart => "WSYN0001",
            Self::SynchronizerRewind => "WSYN0002",
            Self::SynchronizerWipe => "WSYN0003",
            Self::ServiceUnavailable => "WSYN0004",
            Self::DeeplinkInvalid => "WDLK0001",
            Self::DeeplinkWalletNotInitialized => "WDLK0002",
            Self::WalletConfig => "WCFG0001",
            Self::ExportLogs => "WLOG0001",
            Self::WalletStateFailed => "WINI0001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic failure from an asynchronous collaborator, carrying a code and a
/// detailed human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct WalletError {
    /// Stable code.
    pub code: ErrorCode,
    /// Detailed message (never contains secrets).
    pub message: String,
}

impl WalletError {
    /// What: Build a `WalletError` from a code and a message.
    ///
    /// Inputs:
    /// - `code`: Stable error code
    /// - `message`: Human-readable detail
    ///
    /// Output:
    /// - New `WalletError`
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<WalletStorageError> for WalletError {
    fn from(err: WalletStorageError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Startup configuration failures. These abort the binary before the runtime
/// loop is created and never occur inside the state machine.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither the command line nor `settings.conf` selected a network.
    #[error("no network selected: pass --network or set `network = mainnet|testnet` in settings.conf")]
    MissingNetwork,
    /// Network name is not recognised.
    #[error("unknown network `{0}` (expected mainnet or testnet)")]
    UnknownNetwork(String),
    /// Filesystem failure while preparing config or data directories.
    #[error("configuration I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
