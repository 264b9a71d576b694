//! Alert and confirmation-dialog values presented by the root.
//!
//! Alerts are plain data: a title, an optional message built from a localized
//! template, optional structured error detail, and buttons that each carry the
//! concrete follow-up action to dispatch.

use crate::actions::{Action, AlertAction, DialogAction, DialogChoice};
use crate::errors::WalletError;

/// Visual/semantic role of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    /// Regular action.
    Default,
    /// Cancels or acknowledges.
    Cancel,
    /// Irreversible action.
    Destructive,
}

/// Structured error detail attached to an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Stable error code (e.g. `WSYN0001`).
    pub code: String,
    /// Human-readable detail.
    pub message: String,
}

impl From<&WalletError> for ErrorDetail {
    fn from(err: &WalletError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}

/// Identifies which alert is presented; tests and the headless driver match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Seed phrase unreadable from secure storage.
    CantLoadSeedPhrase,
    /// Synchronizer failed to restart after a rewind.
    CantStartSync,
    /// Backup test passed but persisting the mark failed.
    CantStoreThatUserPassedPhraseBackupTest,
    /// Deep link dropped.
    FailedToProcessDeeplink,
    /// SDK initialization or wallet state probe failed.
    InitializationFailed,
    /// Rewind failed.
    RewindFailed,
    /// Probe produced a state the current flow cannot handle.
    WalletStateFailed,
    /// Wallet wipe failed.
    WipeFailed,
    /// Confirm wiping the wallet.
    WipeRequest,
    /// Restore finished.
    SuccessfullyRecovered,
    /// Imported seed differs from the stored one.
    DifferentSeed,
    /// A wallet already exists on this device.
    ExistingWallet,
    /// Synchronizer server unreachable.
    ServiceUnavailable,
}

/// One alert button.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertButton {
    /// Localized label.
    pub label: String,
    /// Role.
    pub role: ButtonRole,
    /// Follow-up action; `None` only dismisses.
    pub action: Option<Action>,
}

/// A presented alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Which alert this is.
    pub kind: AlertKind,
    /// Localized title.
    pub title: String,
    /// Localized message, if any.
    pub message: Option<String>,
    /// Structured error detail, if the alert reports a failure.
    pub error: Option<ErrorDetail>,
    /// Buttons. Empty means a single implicit acknowledgement.
    pub buttons: Vec<AlertButton>,
}

impl Alert {
    /// What: Resolve the root action a tap on button `index` dispatches.
    ///
    /// Inputs:
    /// - `index`: Zero-based button index.
    ///
    /// Output:
    /// - `Some(Action::Alert(..))` for a valid index, or the acknowledgement dismissal
    ///   when the alert has no buttons and `index == 0`; `None` otherwise.
    ///
    /// Details:
    /// - Buttons without a follow-up map to `AlertAction::Dismiss`.
    #[must_use]
    pub fn action_for(&self, index: usize) -> Option<Action> {
        if self.buttons.is_empty() {
            return (index == 0).then_some(Action::Alert(AlertAction::Dismiss));
        }
        let button = self.buttons.get(index)?;
        Some(match &button.action {
            Some(action) => Action::Alert(AlertAction::Presented(Box::new(action.clone()))),
            None => Action::Alert(AlertAction::Dismiss),
        })
    }
}

/// Identifies which confirmation dialog is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Choose quick or full blockchain rescan.
    RescanRequest,
    /// Leave the phrase backup test during a restore.
    LeavePhraseValidation,
}

/// One dialog button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    /// Localized label.
    pub label: String,
    /// Role.
    pub role: ButtonRole,
    /// Choice dispatched; `None` cancels.
    pub choice: Option<DialogChoice>,
}

/// A presented confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog {
    /// Which dialog this is.
    pub kind: DialogKind,
    /// Localized title.
    pub title: String,
    /// Localized message.
    pub message: String,
    /// Buttons.
    pub buttons: Vec<DialogButton>,
}

impl ConfirmationDialog {
    /// Resolve the root action a tap on button `index` dispatches.
    #[must_use]
    pub fn action_for(&self, index: usize) -> Option<Action> {
        let button = self.buttons.get(index)?;
        Some(match button.choice {
            Some(choice) => Action::ConfirmationDialog(DialogAction::Presented(choice)),
            None => Action::ConfirmationDialog(DialogAction::Dismiss),
        })
    }
}
