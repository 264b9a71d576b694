//! Startup/debug screen actions: rescans, flag toggles, crash reporter test.

use crate::errors::WalletError;
use crate::state::types::RewindPolicy;

/// Debug screen state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugState {
    /// Rewind currently running, if any.
    pub rewind_in_progress: Option<RewindPolicy>,
}

/// Debug screen actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugAction {
    /// Ask which kind of rescan to run.
    RescanBlockchain,
    /// Run a rewind with the chosen policy.
    Rewind(RewindPolicy),
    /// Rewind task finished.
    RewindDone(Result<(), WalletError>),
    /// Synchronizer could not be restarted after a successful rewind.
    SyncRestartFailed(WalletError),
    /// Trigger a crash-reporter test event.
    TestCrashReporter,
    /// Set a wallet-config flag.
    UpdateFlag {
        /// Flag name.
        name: String,
        /// New value.
        enabled: bool,
    },
}

/// Reduce the parts of a debug action that touch debug state.
pub fn reduce(state: &mut DebugState, action: &DebugAction) {
    match action {
        DebugAction::Rewind(policy) => state.rewind_in_progress = Some(*policy),
        DebugAction::RewindDone(_) | DebugAction::SyncRestartFailed(_) => {
            state.rewind_in_progress = None;
        }
        DebugAction::RescanBlockchain
        | DebugAction::TestCrashReporter
        | DebugAction::UpdateFlag { .. } => {}
    }
}
