//! Lifecycle event aggregator: app foreground/background, battery,
//! synchronizer snapshots, config reloads and disk-space results.

use crate::actions::{Action, AppDelegateAction, InitializationAction};
use crate::effects::{Effect, EffectId};
use crate::env::Environment;
use crate::features::not_enough_free_space::{self, NotEnoughFreeSpaceAction};
use crate::logic::{alerts, probe, router};
use crate::state::AppState;
use crate::state::types::{
    BatteryState, ConnectionState, SynchronizerSnapshot, WalletConfig, WalletStatus,
};

/// What: React to a platform lifecycle notification.
///
/// Inputs:
/// - `app`: Root state
/// - `event`: Lifecycle notification
/// - `env`: Collaborators (probe on foreground)
///
/// Output:
/// - Effects to start, plus a re-route when the wallet state changed while away.
///
/// Details:
/// - Synchronization effects keep running in the background; only the OS task
///   scheduling is added.
pub fn app_delegate(app: &AppState, event: AppDelegateAction, env: &Environment) -> Vec<Effect> {
    match event {
        AppDelegateAction::DidFinishLaunching => {
            tracing::info!(version = %env.app_version, "did finish launching");
            vec![Effect::Start(EffectId::DidFinishLaunching)]
        }
        AppDelegateAction::WillEnterForeground => {
            let mut effects = Vec::new();
            let outcome =
                probe::probe_wallet(&*env.key_storage, &*env.database_files, app.network);
            if outcome.state == app.initialization_state {
                tracing::debug!(state = %outcome.state, "foreground probe unchanged");
            } else {
                tracing::info!(
                    from = %app.initialization_state,
                    to = %outcome.state,
                    "wallet state changed while in background"
                );
                effects.push(Effect::Dispatch(Action::Initialization(
                    InitializationAction::RespondToWalletInitializationState {
                        state: outcome.state,
                        error: outcome.error,
                    },
                )));
            }
            effects.push(Effect::Start(EffectId::BatteryStream));
            effects.push(Effect::Start(EffectId::StatusPoll));
            effects
        }
        AppDelegateAction::DidEnterBackground => vec![Effect::Start(EffectId::BackgroundTask)],
    }
}

/// Battery changes only re-evaluate auto-lock: the device should lock while a restore syncs.
pub fn battery_changed(app: &AppState, battery: BatteryState, env: &Environment) {
    let should_lock = app.wallet_status == WalletStatus::Restoring;
    tracing::debug!(battery = ?battery, should_lock, "battery state changed");
    env.autolock.set_should_lock(should_lock);
}

/// What: Fold a synchronizer snapshot into the root state.
///
/// Inputs:
/// - `app`: Root state
/// - `snapshot`: Redacted snapshot
///
/// Details:
/// - Status is derived fresh each time and replaces the previous value.
/// - A disconnect during a restore sets the latch; only the next connected
///   snapshot clears it and the restore status resumes.
/// - A synced snapshot during a restore finishes it and presents `SuccessfullyRecovered`.
/// - `ServiceUnavailable` presents its alert once per transition into that state.
pub fn synchronizer_changed(app: &mut AppState, snapshot: SynchronizerSnapshot) {
    let previous = app.last_connection;
    app.last_connection = snapshot.connection;

    if snapshot.connection == ConnectionState::Disconnected {
        if app.is_restoring_wallet && !app.was_restoring_when_disconnected {
            tracing::info!("disconnected during restore");
            app.was_restoring_when_disconnected = true;
        }
        app.wallet_status = WalletStatus::Disconnected;
        return;
    }

    if snapshot.connection == ConnectionState::Connected && app.was_restoring_when_disconnected {
        tracing::info!("reconnected, resuming restore");
        app.was_restoring_when_disconnected = false;
    }

    if app.is_restoring_wallet && snapshot.is_synced() {
        tracing::info!(height = snapshot.latest_height, "restore finished");
        app.is_restoring_wallet = false;
        let alert = alerts::successfully_recovered(app);
        alerts::present(app, alert);
    }
    app.wallet_status = if app.is_restoring_wallet {
        WalletStatus::Restoring
    } else {
        WalletStatus::None
    };

    if snapshot.connection == ConnectionState::ServiceUnavailable
        && previous != ConnectionState::ServiceUnavailable
    {
        tracing::warn!("light wallet server unavailable");
        let alert = alerts::service_unavailable(app);
        alerts::present(app, alert);
    }
}

/// Replace the wallet config wholesale. Never navigates.
pub fn config_loaded(app: &mut AppState, config: WalletConfig) {
    if app.wallet_config != config {
        tracing::info!(flags = config.flags.len(), "wallet config replaced");
    }
    app.wallet_config = config;
}

/// What: Apply a disk-space check result.
///
/// Inputs:
/// - `enough`: Whether enough space is free
///
/// Output:
/// - A re-probe when space just recovered.
///
/// Details:
/// - Insufficient: lock routing to `Startup` and show the low-space screen.
/// - Sufficient after insufficient: unlock and re-probe to pick the real destination.
pub fn disk_space_checked(app: &mut AppState, enough: bool) -> Vec<Effect> {
    let locked = app.destination_state.low_space;
    match (enough, locked) {
        (false, _) => {
            router::enter_low_space(app);
            not_enough_free_space::reduce(
                &mut app.not_enough_free_space,
                NotEnoughFreeSpaceAction::Activate,
            );
            Vec::new()
        }
        (true, true) => {
            router::leave_low_space(app);
            not_enough_free_space::reduce(
                &mut app.not_enough_free_space,
                NotEnoughFreeSpaceAction::Deactivate,
            );
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::CheckWalletInitialization,
            ))]
        }
        (true, false) => Vec::new(),
    }
}
