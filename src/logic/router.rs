//! Destination router: top-level screen, one-level back slot, guards.
//!
//! Rules applied to every routing request, in order:
//! 1. low-space lock: while `low_space` is set only `Startup` is reachable
//!    (the disk-space handler itself bypasses this through [`enter_low_space`]);
//! 2. restore guard: leaving `PhraseValidation` during an unfinished restore
//!    asks for confirmation instead of navigating;
//! 3. feature gating: `PhraseValidation` requires the backup test flag.

use crate::actions::{Action, DestinationAction};
use crate::effects::Effect;
use crate::env::Environment;
use crate::errors::{ErrorCode, WalletError};
use crate::features::phrase_display::PhraseDisplayAction;
use crate::features::phrase_validation::PhraseValidationAction;
use crate::features::tabs::{SendPrefill, TabsAction};
use crate::logic::alerts;
use crate::state::AppState;
use crate::state::types::{
    DeeplinkRoute, Destination, FLAG_TEST_BACKUP_PHRASE_FLOW, InitializationState,
};

/// How a routing request fills the back slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackSlot {
    /// Remember the screen being left.
    Push,
    /// Clear the back slot (flow outcomes and back navigation).
    Clear,
}

/// What: Apply a navigation action.
///
/// Inputs:
/// - `app`: Root state
/// - `action`: Navigation request
/// - `env`: Collaborators (deeplink resolver, key storage for on-enter loads)
///
/// Output:
/// - Effects requested by the destination being entered.
pub fn reduce(app: &mut AppState, action: DestinationAction, env: &Environment) -> Vec<Effect> {
    match action {
        DestinationAction::GoTo(target) => go_to(app, target, env),
        DestinationAction::Back => back(app, env),
        DestinationAction::Deeplink(url) => deeplink(app, &url, env),
        DestinationAction::ServerSwitch => {
            app.server_setup_binding = true;
            Vec::new()
        }
    }
}

/// Explicit navigation: remembers the current screen in the back slot.
pub fn go_to(app: &mut AppState, target: Destination, env: &Environment) -> Vec<Effect> {
    if guard_leaving_phrase_validation(app, target) {
        return Vec::new();
    }
    navigate(app, target, BackSlot::Push, env)
}

/// One-level back navigation; consumes the back slot.
pub fn back(app: &mut AppState, env: &Environment) -> Vec<Effect> {
    let Some(target) = app.destination_state.previous_destination else {
        tracing::debug!("back requested with empty back slot");
        return Vec::new();
    };
    if guard_leaving_phrase_validation(app, target) {
        return Vec::new();
    }
    navigate(app, target, BackSlot::Clear, env)
}

/// Routing decided by a flow outcome (initialization, wipe, setup): the back slot is cleared.
pub fn route(app: &mut AppState, target: Destination, env: &Environment) -> Vec<Effect> {
    navigate(app, target, BackSlot::Clear, env)
}

/// Navigation confirmed through the leave-backup-test dialog; skips the restore guard.
pub fn leave_phrase_validation_confirmed(
    app: &mut AppState,
    target: Destination,
    env: &Environment,
) -> Vec<Effect> {
    navigate(app, target, BackSlot::Push, env)
}

/// Lock routing to `Startup` while the device lacks free space.
pub fn enter_low_space(app: &mut AppState) {
    let ds = &mut app.destination_state;
    if !ds.low_space {
        tracing::warn!(from = ?ds.destination, "not enough free space, routing to startup");
    }
    ds.low_space = true;
    ds.destination = Destination::Startup;
    ds.previous_destination = None;
}

/// Release the low-space lock. The caller re-probes to pick the real destination.
pub fn leave_low_space(app: &mut AppState) {
    app.destination_state.low_space = false;
    tracing::info!("free space recovered, routing unlocked");
}

/// What: Resolve and honour a deep link.
///
/// Inputs:
/// - `url`: Link as received
///
/// Output:
/// - Navigation effects, plus a send-form prefill for payment links.
///
/// Details:
/// - Resolution failure, or a wallet-only target while the wallet is not
///   `Initialized`, leaves the destination untouched and presents
///   `FailedToProcessDeeplink` with the error code and detail.
pub fn deeplink(app: &mut AppState, url: &str, env: &Environment) -> Vec<Effect> {
    let route = match env.deeplink.resolve(url) {
        Ok(route) => route,
        Err(err) => {
            tracing::warn!(error = %err, "deeplink rejected");
            let alert = alerts::failed_to_process_deeplink(app, url, &err);
            alerts::present(app, alert);
            return Vec::new();
        }
    };
    let target = route.destination();
    if target.requires_initialized_wallet()
        && app.initialization_state != InitializationState::Initialized
    {
        let err = WalletError::new(
            ErrorCode::DeeplinkWalletNotInitialized,
            format!(
                "deeplink needs an initialized wallet, state is {}",
                app.initialization_state
            ),
        );
        tracing::warn!(target = ?target, state = %app.initialization_state, "deeplink dropped");
        let alert = alerts::failed_to_process_deeplink(app, url, &err);
        alerts::present(app, alert);
        return Vec::new();
    }
    let mut effects = go_to(app, target, env);
    if app.destination() != target {
        return effects;
    }
    if let DeeplinkRoute::Send {
        address,
        amount,
        memo,
    } = route
    {
        effects.push(Effect::Dispatch(Action::Tabs(TabsAction::PrefillSend(
            SendPrefill {
                address,
                amount,
                memo,
            },
        ))));
    }
    effects
}

/// Present the leave dialog instead of navigating when the guard applies.
fn guard_leaving_phrase_validation(app: &mut AppState, target: Destination) -> bool {
    let guarded = app.destination() == Destination::PhraseValidation
        && target != Destination::PhraseValidation
        && app.is_restoring_wallet
        && !app.phrase_validation.is_validated();
    if guarded {
        tracing::info!(target = ?target, "leaving backup test during restore needs confirmation");
        let dialog = alerts::leave_phrase_validation(app, target);
        alerts::present_dialog(app, dialog);
    }
    guarded
}

fn navigate(
    app: &mut AppState,
    target: Destination,
    slot: BackSlot,
    env: &Environment,
) -> Vec<Effect> {
    if app.destination_state.low_space && target != Destination::Startup {
        tracing::info!(target = ?target, "routing dropped while space is low");
        return Vec::new();
    }
    if target == Destination::PhraseValidation
        && !app.wallet_config.is_enabled(FLAG_TEST_BACKUP_PHRASE_FLOW)
    {
        tracing::info!("backup test disabled by config, routing dropped");
        return Vec::new();
    }
    let current = app.destination();
    if current == target {
        tracing::debug!(destination = ?target, "already on destination");
        return Vec::new();
    }
    let ds = &mut app.destination_state;
    ds.previous_destination = match slot {
        BackSlot::Push => Some(current),
        BackSlot::Clear => None,
    };
    ds.destination = target;
    tracing::info!(from = ?current, to = ?target, "destination changed");
    on_enter(app, target, env)
}

/// Loads needed when a screen is entered.
fn on_enter(app: &mut AppState, target: Destination, env: &Environment) -> Vec<Effect> {
    match target {
        Destination::PhraseDisplay | Destination::PhraseValidation => {
            match env.key_storage.export_wallet() {
                Ok(wallet) => {
                    let action = if target == Destination::PhraseDisplay {
                        Action::PhraseDisplay(PhraseDisplayAction::PhraseLoaded {
                            phrase: wallet.seed,
                            birthday: wallet.birthday,
                        })
                    } else {
                        Action::PhraseValidation(PhraseValidationAction::Prepare(wallet.seed))
                    };
                    vec![Effect::Dispatch(action)]
                }
                Err(err) => {
                    let err = WalletError::from(err);
                    tracing::warn!(error = %err, "seed phrase unavailable");
                    let alert = alerts::cant_load_seed_phrase(app, &err);
                    alerts::present(app, alert);
                    Vec::new()
                }
            }
        }
        Destination::Startup
        | Destination::Welcome
        | Destination::Onboarding
        | Destination::Home
        | Destination::Sandbox => Vec::new(),
    }
}
