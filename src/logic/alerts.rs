//! Alert and confirmation-dialog coordinator.
//!
//! One alert slot and one dialog slot. Presenting overwrites whatever is shown
//! (last write wins). Every constructor resolves its strings through i18n so
//! the state only ever holds display-ready text.

use crate::actions::{Action, AlertAction, DestinationAction, DialogChoice, InitializationAction};
use crate::effects::Effect;
use crate::errors::{ErrorCode, WalletError};
use crate::i18n::{t, t_fmt, t_fmt1};
use crate::state::AppState;
use crate::state::modal::{
    Alert, AlertButton, AlertKind, ButtonRole, ConfirmationDialog, DialogButton, DialogKind,
    ErrorDetail,
};
use crate::state::types::{Destination, InitializationState};

/// Present `alert`, replacing any alert already shown.
pub fn present(app: &mut AppState, alert: Alert) {
    if let Some(previous) = &app.alert {
        tracing::debug!(replaced = ?previous.kind, with = ?alert.kind, "alert replaced");
    }
    tracing::info!(alert = ?alert.kind, "alert presented");
    app.alert = Some(alert);
}

/// Present `dialog`, replacing any dialog already shown.
pub fn present_dialog(app: &mut AppState, dialog: ConfirmationDialog) {
    tracing::info!(dialog = ?dialog.kind, "confirmation dialog presented");
    app.confirmation_dialog = Some(dialog);
}

/// What: Apply an alert slot action.
///
/// Inputs:
/// - `app`: Root state
/// - `action`: `Presented` (a button with a follow-up) or `Dismiss`
///
/// Output:
/// - The button's follow-up as a `Dispatch`, or nothing for a dismissal.
///
/// Details:
/// - The slot is cleared in both cases before the follow-up runs, so a follow-up
///   that presents a new alert is not wiped.
pub fn reduce_alert(app: &mut AppState, action: AlertAction) -> Vec<Effect> {
    app.alert = None;
    match action {
        AlertAction::Presented(follow_up) => vec![Effect::Dispatch(*follow_up)],
        AlertAction::Dismiss => Vec::new(),
    }
}

fn ok_button(app: &AppState) -> AlertButton {
    AlertButton {
        label: t(app, "common.ok"),
        role: ButtonRole::Cancel,
        action: None,
    }
}

/// Error alert: localized title, message template filled with the error detail,
/// single acknowledgement button.
fn error_alert(app: &AppState, kind: AlertKind, key: &str, err: &WalletError) -> Alert {
    Alert {
        kind,
        title: t(app, &format!("{key}.title")),
        message: Some(t_fmt1(app, &format!("{key}.message"), &err.message)),
        error: Some(ErrorDetail::from(err)),
        buttons: vec![ok_button(app)],
    }
}

/// Seed phrase could not be read from key storage.
pub fn cant_load_seed_phrase(app: &AppState, err: &WalletError) -> Alert {
    error_alert(app, AlertKind::CantLoadSeedPhrase, "alerts.cant_load_seed_phrase", err)
}

/// Synchronizer could not be restarted.
pub fn cant_start_sync(app: &AppState, err: &WalletError) -> Alert {
    error_alert(app, AlertKind::CantStartSync, "alerts.cant_start_sync", err)
}

/// The backup test mark could not be stored.
pub fn cant_store_backup_test_mark(app: &AppState, err: &WalletError) -> Alert {
    error_alert(
        app,
        AlertKind::CantStoreThatUserPassedPhraseBackupTest,
        "alerts.cant_store_backup",
        err,
    )
}

/// What: Deep link dropped.
///
/// Inputs:
/// - `url`: Offending link as received
/// - `err`: Resolution or precondition failure
///
/// Output:
/// - Alert quoting the link and the error detail.
pub fn failed_to_process_deeplink(app: &AppState, url: &str, err: &WalletError) -> Alert {
    Alert {
        kind: AlertKind::FailedToProcessDeeplink,
        title: t(app, "alerts.failed_to_process_deeplink.title"),
        message: Some(t_fmt(
            app,
            "alerts.failed_to_process_deeplink.message",
            &[&url, &err.message],
        )),
        error: Some(ErrorDetail::from(err)),
        buttons: vec![ok_button(app)],
    }
}

/// Wallet could not be initialized.
pub fn initialization_failed(app: &AppState, err: &WalletError) -> Alert {
    error_alert(app, AlertKind::InitializationFailed, "alerts.initialization_failed", err)
}

/// Rewind failed.
pub fn rewind_failed(app: &AppState, err: &WalletError) -> Alert {
    error_alert(app, AlertKind::RewindFailed, "alerts.rewind_failed", err)
}

/// Probe produced a state without an underlying storage error.
pub fn wallet_state_failed(app: &AppState, state: InitializationState) -> Alert {
    let err = WalletError::new(
        ErrorCode::WalletStateFailed,
        format!("wallet initialization state is {state}"),
    );
    Alert {
        kind: AlertKind::WalletStateFailed,
        title: t(app, "alerts.wallet_state_failed.title"),
        message: Some(t_fmt1(app, "alerts.wallet_state_failed.message", state)),
        error: Some(ErrorDetail::from(&err)),
        buttons: vec![ok_button(app)],
    }
}

/// Wallet wipe failed.
pub fn wipe_failed(app: &AppState, err: &WalletError) -> Alert {
    error_alert(app, AlertKind::WipeFailed, "alerts.wipe_failed", err)
}

/// Confirm wiping the wallet: yes wipes, no dismisses.
pub fn wipe_request(app: &AppState) -> Alert {
    Alert {
        kind: AlertKind::WipeRequest,
        title: t(app, "alerts.wipe_request.title"),
        message: Some(t(app, "alerts.wipe_request.message")),
        error: None,
        buttons: vec![
            AlertButton {
                label: t(app, "alerts.wipe_request.yes"),
                role: ButtonRole::Destructive,
                action: Some(Action::Initialization(InitializationAction::NukeWallet)),
            },
            AlertButton {
                label: t(app, "alerts.wipe_request.no"),
                role: ButtonRole::Cancel,
                action: None,
            },
        ],
    }
}

/// Restore finished syncing.
pub fn successfully_recovered(app: &AppState) -> Alert {
    Alert {
        kind: AlertKind::SuccessfullyRecovered,
        title: t(app, "alerts.successfully_recovered.title"),
        message: Some(t(app, "alerts.successfully_recovered.message")),
        error: None,
        buttons: vec![ok_button(app)],
    }
}

/// Imported phrase differs from the stored one: try again dismisses, continue wipes.
pub fn different_seed(app: &AppState) -> Alert {
    Alert {
        kind: AlertKind::DifferentSeed,
        title: t(app, "alerts.different_seed.title"),
        message: Some(t(app, "alerts.different_seed.message")),
        error: None,
        buttons: vec![
            AlertButton {
                label: t(app, "alerts.different_seed.try_again"),
                role: ButtonRole::Cancel,
                action: None,
            },
            AlertButton {
                label: t(app, "alerts.different_seed.continue"),
                role: ButtonRole::Destructive,
                action: Some(Action::Initialization(InitializationAction::NukeWallet)),
            },
        ],
    }
}

/// A wallet already exists: restore keeps it, continue wipes it.
pub fn existing_wallet(app: &AppState) -> Alert {
    Alert {
        kind: AlertKind::ExistingWallet,
        title: t(app, "alerts.existing_wallet.title"),
        message: Some(t(app, "alerts.existing_wallet.message")),
        error: None,
        buttons: vec![
            AlertButton {
                label: t(app, "alerts.existing_wallet.restore"),
                role: ButtonRole::Default,
                action: Some(Action::Initialization(
                    InitializationAction::RestoreExistingWallet,
                )),
            },
            AlertButton {
                label: t(app, "alerts.existing_wallet.continue"),
                role: ButtonRole::Destructive,
                action: Some(Action::Initialization(InitializationAction::NukeWallet)),
            },
        ],
    }
}

/// Server refuses service: ignore dismisses, switch opens server selection.
pub fn service_unavailable(app: &AppState) -> Alert {
    let err = WalletError::new(
        ErrorCode::ServiceUnavailable,
        "light wallet server reported service unavailable",
    );
    Alert {
        kind: AlertKind::ServiceUnavailable,
        title: t(app, "alerts.service_unavailable.title"),
        message: Some(t(app, "alerts.service_unavailable.message")),
        error: Some(ErrorDetail::from(&err)),
        buttons: vec![
            AlertButton {
                label: t(app, "alerts.service_unavailable.ignore"),
                role: ButtonRole::Cancel,
                action: None,
            },
            AlertButton {
                label: t(app, "alerts.service_unavailable.switch_server"),
                role: ButtonRole::Default,
                action: Some(Action::Destination(DestinationAction::ServerSwitch)),
            },
        ],
    }
}

/// Quick or full rescan.
pub fn rescan_request(app: &AppState) -> ConfirmationDialog {
    ConfirmationDialog {
        kind: DialogKind::RescanRequest,
        title: t(app, "dialogs.rescan.title"),
        message: t(app, "dialogs.rescan.message"),
        buttons: vec![
            DialogButton {
                label: t(app, "dialogs.rescan.quick"),
                role: ButtonRole::Default,
                choice: Some(DialogChoice::QuickRescan),
            },
            DialogButton {
                label: t(app, "dialogs.rescan.full"),
                role: ButtonRole::Destructive,
                choice: Some(DialogChoice::FullRescan),
            },
            DialogButton {
                label: t(app, "common.cancel"),
                role: ButtonRole::Cancel,
                choice: None,
            },
        ],
    }
}

/// Leave the backup test while a restore runs; leaving navigates to `target`.
pub fn leave_phrase_validation(app: &AppState, target: Destination) -> ConfirmationDialog {
    ConfirmationDialog {
        kind: DialogKind::LeavePhraseValidation,
        title: t(app, "dialogs.leave_phrase_validation.title"),
        message: t(app, "dialogs.leave_phrase_validation.message"),
        buttons: vec![
            DialogButton {
                label: t(app, "dialogs.leave_phrase_validation.leave"),
                role: ButtonRole::Destructive,
                choice: Some(DialogChoice::LeavePhraseValidation(target)),
            },
            DialogButton {
                label: t(app, "dialogs.leave_phrase_validation.stay"),
                role: ButtonRole::Cancel,
                choice: None,
            },
        ],
    }
}
