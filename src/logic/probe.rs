//! Initialization prober: keys + database files -> `InitializationState`.

use crate::env::{DatabaseFiles, KeyStorage};
use crate::errors::{WalletError, WalletStorageError};
use crate::state::types::{InitializationState, Network};

/// Total mapping of key/file presence onto an initialization state.
#[must_use]
pub const fn probe(keys_present: bool, files_present: bool) -> InitializationState {
    match (keys_present, files_present) {
        (false, false) => InitializationState::Uninitialized,
        (false, true) => InitializationState::KeysMissing,
        (true, false) => InitializationState::FilesMissing,
        (true, true) => InitializationState::Initialized,
    }
}

/// Probe result together with the storage error behind a `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Derived state.
    pub state: InitializationState,
    /// Present only when `state` is `Failed`.
    pub error: Option<WalletError>,
}

/// What: Probe the collaborators and derive the wallet's initialization state.
///
/// Inputs:
/// - `keys`: Key storage
/// - `files`: Database presence
/// - `network`: Active network
///
/// Output:
/// - `ProbeOutcome` with the state and, for `Failed`, the storage error.
///
/// Details:
/// - `UninitializedWallet` from key storage counts as "no keys".
/// - Any other key storage error yields `Failed` without looking at the files.
/// - Never cached; every call reads the collaborators again.
pub fn probe_wallet(
    keys: &dyn KeyStorage,
    files: &dyn DatabaseFiles,
    network: Network,
) -> ProbeOutcome {
    let keys_present = match keys.are_keys_present() {
        Ok(present) => present,
        Err(WalletStorageError::UninitializedWallet) => false,
        Err(err) => {
            tracing::warn!(error = %err, "key storage probe failed");
            return ProbeOutcome {
                state: InitializationState::Failed,
                error: Some(err.into()),
            };
        }
    };
    let files_present = files.are_db_files_present(network);
    let state = probe(keys_present, files_present);
    tracing::debug!(keys_present, files_present, state = %state, "wallet probed");
    ProbeOutcome { state, error: None }
}

/// State-only convenience over [`probe_wallet`].
pub fn wallet_initialization_state(
    keys: &dyn KeyStorage,
    files: &dyn DatabaseFiles,
    network: Network,
) -> InitializationState {
    probe_wallet(keys, files, network).state
}
