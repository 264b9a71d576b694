//! Root reducer: the single entry point applying an `Action` to `AppState`.
//!
//! The reducer never blocks on anything slow and never spawns. Everything
//! asynchronous is returned as `Effect` values for the runtime loop.

use crate::actions::{Action, DialogAction, DialogChoice, InitializationAction};
use crate::effects::{Effect, EffectId, Task};
use crate::env::Environment;
use crate::features::debug::{self, DebugAction};
use crate::features::onboarding::{self, OnboardingDelegate};
use crate::features::phrase_display::{self, PhraseDisplayDelegate};
use crate::features::phrase_validation::{self, PhraseValidationDelegate};
use crate::features::welcome::{self, WelcomeDelegate};
use crate::features::{export_logs, not_enough_free_space, sandbox, server_setup, tabs};
use crate::logic::{alerts, initialization, lifecycle, router};
use crate::state::AppState;
use crate::state::types::{Destination, FLAG_TEST_BACKUP_PHRASE_FLOW, RewindPolicy};

/// What: Apply an action and every follow-up it dispatches, depth-first.
///
/// Inputs:
/// - `app`: Root state, mutated in place
/// - `action`: Action to apply
/// - `env`: Collaborators
///
/// Output:
/// - The remaining `Start`/`Cancel`/`CancelAll`/`Run` effects in execution order.
///
/// Details:
/// - A dispatched action is fully applied before the next effect of the same
///   reduction, so a check dispatched first (disk space) is settled before a
///   later one (wallet probe) runs.
pub fn reduce_all(app: &mut AppState, action: Action, env: &Environment) -> Vec<Effect> {
    let mut out = Vec::new();
    for effect in reduce(app, action, env) {
        match effect {
            Effect::Dispatch(next) => out.extend(reduce_all(app, next, env)),
            other => out.push(other),
        }
    }
    out
}

/// What: Apply one action.
///
/// Inputs:
/// - `app`: Root state, mutated in place
/// - `action`: Action to apply
/// - `env`: Collaborators
///
/// Output:
/// - Effects for the runtime loop, in the order they must be executed.
pub fn reduce(app: &mut AppState, action: Action, env: &Environment) -> Vec<Effect> {
    tracing::trace!(action = action.tag(), "reduce");
    match action {
        Action::Alert(alert_action) => alerts::reduce_alert(app, alert_action),
        Action::BatteryStateChanged(battery) => {
            lifecycle::battery_changed(app, battery, env);
            Vec::new()
        }
        Action::CancelAllRunningEffects => vec![Effect::CancelAll],
        Action::ConfirmationDialog(dialog_action) => reduce_dialog(app, dialog_action, env),
        Action::Debug(debug_action) => reduce_debug(app, debug_action),
        Action::Destination(destination_action) => router::reduce(app, destination_action, env),
        Action::ExportLogs(export_action) => {
            if export_logs::reduce(&mut app.export_logs, export_action) {
                vec![Effect::Run(Task::ExportLogs)]
            } else {
                Vec::new()
            }
        }
        Action::Initialization(init_action) => initialization::reduce(app, init_action, env),
        Action::NotEnoughFreeSpace(space_action) => {
            if not_enough_free_space::reduce(&mut app.not_enough_free_space, space_action) {
                vec![Effect::Dispatch(Action::Initialization(
                    InitializationAction::CheckDiskSpace,
                ))]
            } else {
                Vec::new()
            }
        }
        Action::NukeWalletFailed(err) => {
            initialization::nuke_failed(app, &err);
            Vec::new()
        }
        Action::NukeWalletSucceeded => initialization::nuke_succeeded(app),
        Action::Onboarding(onboarding_action) => {
            match onboarding::reduce(&mut app.onboarding, onboarding_action) {
                Some(OnboardingDelegate::CreateNewWallet) => vec![Effect::Dispatch(
                    Action::Initialization(InitializationAction::CreateNewWallet),
                )],
                Some(OnboardingDelegate::ImportWallet { seed, birthday }) => {
                    vec![Effect::Dispatch(Action::Initialization(
                        InitializationAction::ImportWallet { seed, birthday },
                    ))]
                }
                None => Vec::new(),
            }
        }
        Action::PhraseDisplay(display_action) => {
            match phrase_display::reduce(&mut app.phrase_display, display_action) {
                Some(PhraseDisplayDelegate::Finished) => {
                    let target = if app.wallet_config.is_enabled(FLAG_TEST_BACKUP_PHRASE_FLOW) {
                        Destination::PhraseValidation
                    } else {
                        Destination::Home
                    };
                    router::go_to(app, target, env)
                }
                Some(PhraseDisplayDelegate::Back) => router::back(app, env),
                None => Vec::new(),
            }
        }
        Action::PhraseValidation(validation_action) => {
            match phrase_validation::reduce(&mut app.phrase_validation, validation_action) {
                Some(PhraseValidationDelegate::Validated) => vec![Effect::Dispatch(
                    Action::Initialization(InitializationAction::BackupPhraseValidated),
                )],
                Some(PhraseValidationDelegate::Failed) => {
                    tracing::info!(
                        attempts = app.phrase_validation.failed_attempts,
                        "backup test failed"
                    );
                    Vec::new()
                }
                None => Vec::new(),
            }
        }
        Action::Sandbox(sandbox_action) => {
            if sandbox::reduce(&mut app.sandbox, sandbox_action) {
                router::route(app, Destination::Startup, env)
            } else {
                Vec::new()
            }
        }
        Action::ServerSetup(setup_action) => {
            if server_setup::reduce(&mut app.server_setup, setup_action) {
                app.server_setup_binding = false;
            }
            Vec::new()
        }
        Action::ServerSetupBindingUpdated(shown) => {
            app.server_setup_binding = shown;
            Vec::new()
        }
        Action::SplashFinished => {
            app.splash_appeared = true;
            Vec::new()
        }
        Action::SplashRemovalRequested => {
            if app.splash_appeared {
                Vec::new()
            } else {
                vec![Effect::Dispatch(Action::SplashFinished)]
            }
        }
        Action::SynchronizerStateChanged(snapshot) => {
            lifecycle::synchronizer_changed(app, snapshot);
            Vec::new()
        }
        Action::Tabs(tabs_action) => {
            tabs::reduce(&mut app.tabs, tabs_action);
            Vec::new()
        }
        Action::UpdateStateAfterConfigUpdate(config) => {
            lifecycle::config_loaded(app, config);
            vec![
                Effect::Cancel(EffectId::ConfigRefresh),
                Effect::Start(EffectId::ConfigRefresh),
            ]
        }
        Action::WalletConfigLoaded(config) => {
            lifecycle::config_loaded(app, config);
            Vec::new()
        }
        Action::Welcome(welcome_action) => match welcome::reduce(&mut app.welcome, welcome_action) {
            Some(WelcomeDelegate::StartOnboarding) => router::go_to(app, Destination::Onboarding, env),
            Some(WelcomeDelegate::OpenDebugMenu) => router::go_to(app, Destination::Startup, env),
            None => Vec::new(),
        },
    }
}

fn reduce_dialog(app: &mut AppState, action: DialogAction, env: &Environment) -> Vec<Effect> {
    app.confirmation_dialog = None;
    match action {
        DialogAction::Dismiss => Vec::new(),
        DialogAction::Presented(DialogChoice::QuickRescan) => vec![Effect::Dispatch(
            Action::Debug(DebugAction::Rewind(RewindPolicy::Quick)),
        )],
        DialogAction::Presented(DialogChoice::FullRescan) => vec![Effect::Dispatch(
            Action::Debug(DebugAction::Rewind(RewindPolicy::Full)),
        )],
        DialogAction::Presented(DialogChoice::LeavePhraseValidation(target)) => {
            router::leave_phrase_validation_confirmed(app, target, env)
        }
    }
}

fn reduce_debug(app: &mut AppState, action: DebugAction) -> Vec<Effect> {
    let already_rewinding = app.debug.rewind_in_progress.is_some();
    debug::reduce(&mut app.debug, &action);
    match action {
        DebugAction::RescanBlockchain => {
            let dialog = alerts::rescan_request(app);
            alerts::present_dialog(app, dialog);
            Vec::new()
        }
        DebugAction::Rewind(policy) => {
            if already_rewinding {
                tracing::info!(policy = ?policy, "rewind already running");
                return Vec::new();
            }
            tracing::info!(policy = ?policy, "rewind requested");
            vec![Effect::Run(Task::Rewind(policy))]
        }
        DebugAction::RewindDone(Ok(())) => {
            tracing::info!("rewind finished");
            Vec::new()
        }
        DebugAction::RewindDone(Err(err)) => {
            tracing::error!(error = %err, "rewind failed");
            let alert = alerts::rewind_failed(app, &err);
            alerts::present(app, alert);
            Vec::new()
        }
        DebugAction::SyncRestartFailed(err) => {
            tracing::error!(error = %err, "synchronizer restart failed");
            let alert = alerts::cant_start_sync(app, &err);
            alerts::present(app, alert);
            Vec::new()
        }
        DebugAction::TestCrashReporter => {
            tracing::error!(test = true, "crash reporter test event requested");
            Vec::new()
        }
        DebugAction::UpdateFlag { name, enabled } => {
            tracing::info!(flag = %name, enabled, "wallet config flag update requested");
            vec![Effect::Run(Task::UpdateWalletConfigFlag { name, enabled })]
        }
    }
}
