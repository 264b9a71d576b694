//! Effect requests returned by the reducer and the registry that runs the
//! long-lived ones.
//!
//! The reducer never spawns anything. It returns `Effect` values; the runtime
//! loop turns `Start`/`Cancel`/`CancelAll` into registry calls, spawns `Run`
//! tasks, and feeds `Dispatch` actions back into the reducer before reading the
//! next queued message.

pub mod registry;

pub use registry::EffectRegistry;

use crate::actions::Action;
use crate::state::types::{Network, RewindPolicy, SeedPhrase, WalletInitMode};

/// Names of the long-running operations. At most one registration per name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectId {
    /// Synchronizer snapshot subscription.
    SyncStream,
    /// Periodic disk-space poll.
    StatusPoll,
    /// OS battery state subscription.
    BatteryStream,
    /// OS background task scheduling.
    BackgroundTask,
    /// Wallet-config load.
    ConfigRefresh,
    /// Splash delay before the one-time initial setup.
    DidFinishLaunching,
}

impl EffectId {
    /// Every id, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::SyncStream,
        Self::StatusPoll,
        Self::BatteryStream,
        Self::BackgroundTask,
        Self::ConfigRefresh,
        Self::DidFinishLaunching,
    ];
}

/// One-shot asynchronous work. Each task reports back with at most one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Prepare and start the synchronizer with the stored seed.
    StartSynchronizer {
        /// Seed loaded from key storage.
        seed: SeedPhrase,
        /// Birthday height.
        birthday: u64,
        /// Preparation mode.
        mode: WalletInitMode,
    },
    /// Stop the synchronizer and erase synchronizer data, keys and database files.
    NukeWallet {
        /// Network whose database files are removed.
        network: Network,
    },
    /// Stop, rewind and restart the synchronizer.
    Rewind(RewindPolicy),
    /// Copy logs to a shareable location.
    ExportLogs,
    /// Persist a flag change and reload the wallet config.
    UpdateWalletConfigFlag {
        /// Flag name.
        name: String,
        /// New value.
        enabled: bool,
    },
}

/// Work requested by a reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the named effect unless it is already running.
    Start(EffectId),
    /// Cancel the named effect if running.
    Cancel(EffectId),
    /// Cancel every running effect.
    CancelAll,
    /// Feed an action back into the reducer.
    Dispatch(Action),
    /// Run a one-shot task.
    Run(Task),
}
