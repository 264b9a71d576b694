//! Lifecycle notifications: foreground/background, synchronizer, battery, config.

use wallet_root::actions::{Action, AppDelegateAction, InitializationAction};
use wallet_root::effects::{Effect, EffectId, Task};
use wallet_root::env::mock::MockHarness;
use wallet_root::state::types::{
    BatteryState, ConnectionState, SynchronizerSnapshot, WalletConfig, WalletInitMode,
};
use wallet_root::state::{AlertKind, AppState, Destination, InitializationState, WalletStatus};
use wallet_root::test_utils::{drive, first_task, new_app};

fn delegate(event: AppDelegateAction) -> Action {
    Action::Initialization(InitializationAction::AppDelegate(event))
}

fn sync(connection: ConnectionState, progress: u8) -> Action {
    Action::SynchronizerStateChanged(SynchronizerSnapshot {
        latest_height: 2_400_000,
        connection,
        sync_progress: progress,
    })
}

fn home(state: InitializationState) -> AppState {
    let mut app = new_app();
    app.initialization_state = state;
    app.destination_state.destination = Destination::Home;
    app
}

#[test]
/// What: Losing the connection during a restore is remembered until reconnect.
///
/// Inputs:
/// - Restoring wallet; disconnected snapshot, then a connected one at 40%.
///
/// Output:
/// - Flag set and status `Disconnected`; cleared again with status `Restoring`.
fn disconnect_during_restore_is_latched_until_reconnect() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    app.is_restoring_wallet = true;

    drive(&mut app, [sync(ConnectionState::Disconnected, 30)], &h.env);
    assert!(app.was_restoring_when_disconnected);
    assert_eq!(app.wallet_status, WalletStatus::Disconnected);

    drive(&mut app, [sync(ConnectionState::Connected, 40)], &h.env);
    assert!(!app.was_restoring_when_disconnected);
    assert_eq!(app.wallet_status, WalletStatus::Restoring);

    drive(&mut app, [sync(ConnectionState::Connected, 100)], &h.env);
    assert!(!app.is_restoring_wallet);
    assert_eq!(app.wallet_status, WalletStatus::None);
    assert_eq!(
        app.alert.as_ref().map(|a| a.kind),
        Some(AlertKind::SuccessfullyRecovered)
    );
}

#[test]
/// What: Returning to the foreground re-probes and reacts to changes.
///
/// Inputs:
/// - Initialized wallet on Home whose database files vanished in the background.
///
/// Output:
/// - Restore started; battery stream and status poll (re)started.
fn foreground_with_missing_files_restores() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    h.files.set_present(false);

    let effects = drive(&mut app, [delegate(AppDelegateAction::WillEnterForeground)], &h.env);

    assert_eq!(app.initialization_state, InitializationState::FilesMissing);
    assert!(app.is_restoring_wallet);
    assert!(matches!(
        first_task(&effects),
        Some(Task::StartSynchronizer {
            mode: WalletInitMode::RestoreWallet,
            ..
        })
    ));
    assert!(effects.contains(&Effect::Start(EffectId::BatteryStream)));
    assert!(effects.contains(&Effect::Start(EffectId::StatusPoll)));
}

#[test]
/// What: An unchanged foreground probe only restarts the streams.
///
/// Inputs:
/// - Initialized wallet, nothing changed.
///
/// Output:
/// - Exactly the two stream starts; destination unchanged.
fn foreground_without_changes_only_restarts_streams() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    let effects = drive(&mut app, [delegate(AppDelegateAction::WillEnterForeground)], &h.env);
    assert_eq!(
        effects,
        vec![
            Effect::Start(EffectId::BatteryStream),
            Effect::Start(EffectId::StatusPoll),
        ]
    );
    assert_eq!(app.destination(), Destination::Home);
}

#[test]
fn background_schedules_os_task() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    assert_eq!(
        drive(&mut app, [delegate(AppDelegateAction::DidEnterBackground)], &h.env),
        vec![Effect::Start(EffectId::BackgroundTask)]
    );
}

#[test]
/// What: The device is asked to lock only while a restore syncs.
///
/// Inputs:
/// - Battery change with status `Restoring`, then with status `None`.
///
/// Output:
/// - Auto-lock calls `true` then `false`.
fn battery_change_reevaluates_autolock() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    app.wallet_status = WalletStatus::Restoring;
    drive(&mut app, [Action::BatteryStateChanged(BatteryState::Unplugged)], &h.env);
    app.wallet_status = WalletStatus::None;
    drive(&mut app, [Action::BatteryStateChanged(BatteryState::Charging)], &h.env);
    assert_eq!(h.autolock.calls(), vec![true, false]);
}

#[test]
/// What: A config reload never navigates.
///
/// Inputs:
/// - Home; `WalletConfigLoaded` with a flag flipped.
///
/// Output:
/// - Config replaced; destination, back slot and effects unchanged.
fn config_reload_keeps_destination() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    let config = WalletConfig::initial().with_flag("showFiatConversion", true);
    let effects = drive(&mut app, [Action::WalletConfigLoaded(config.clone())], &h.env);
    assert!(effects.is_empty());
    assert_eq!(app.wallet_config, config);
    assert_eq!(app.destination(), Destination::Home);
    assert_eq!(app.destination_state.previous_destination, None);
}

#[test]
/// What: A debug flag update restarts the config refresh once stored.
///
/// Inputs:
/// - `UpdateStateAfterConfigUpdate`.
///
/// Output:
/// - Cancel then start of `ConfigRefresh`.
fn config_update_restarts_refresh() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    let effects = drive(
        &mut app,
        [Action::UpdateStateAfterConfigUpdate(WalletConfig::initial())],
        &h.env,
    );
    assert_eq!(
        effects,
        vec![
            Effect::Cancel(EffectId::ConfigRefresh),
            Effect::Start(EffectId::ConfigRefresh),
        ]
    );
}

#[test]
/// What: Running out of space mid-session locks routing on Startup.
///
/// Inputs:
/// - Home; `DiskSpaceChecked { enough: false }`, then a navigation attempt.
///
/// Output:
/// - Startup with the lock set and an empty back slot; navigation dropped.
fn low_space_mid_session_takes_priority() {
    let h = MockHarness::initialized();
    let mut app = home(InitializationState::Initialized);
    app.destination_state.previous_destination = Some(Destination::Welcome);

    drive(
        &mut app,
        [
            Action::Initialization(InitializationAction::DiskSpaceChecked { enough: false }),
            Action::Destination(wallet_root::actions::DestinationAction::GoTo(
                Destination::Home,
            )),
        ],
        &h.env,
    );
    assert!(app.destination_state.low_space);
    assert_eq!(app.destination(), Destination::Startup);
    assert_eq!(app.destination_state.previous_destination, None);
}
