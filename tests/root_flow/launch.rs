//! Launch and initialization probing.

use wallet_root::actions::{Action, InitializationAction};
use wallet_root::effects::{Effect, EffectId, Task};
use wallet_root::env::UserPreferences;
use wallet_root::env::mock::{MockHarness, locked_storage};
use wallet_root::state::types::WalletInitMode;
use wallet_root::state::{AlertKind, AppStartState, Destination, InitializationState};
use wallet_root::test_utils::{drive, first_task, launch, new_app, settle};

#[test]
/// What: A fresh device lands on Welcome after launch.
///
/// Inputs:
/// - No keys, no database files, enough disk space.
///
/// Output:
/// - Probe yields `Uninitialized`; router moves Startup -> Welcome.
/// - Launch starts the splash effect and the long-running streams.
fn fresh_device_routes_startup_to_welcome() {
    let h = MockHarness::new();
    let mut app = new_app();
    assert_eq!(app.destination(), Destination::Startup);

    let effects = launch(&mut app, &h.env);

    assert_eq!(app.initialization_state, InitializationState::Uninitialized);
    assert_eq!(app.destination(), Destination::Welcome);
    assert_eq!(app.destination_state.previous_destination, None);
    assert_eq!(app.start_state, AppStartState::FirstInstall);
    for id in [
        EffectId::DidFinishLaunching,
        EffectId::ConfigRefresh,
        EffectId::BatteryStream,
        EffectId::StatusPoll,
    ] {
        assert!(effects.contains(&Effect::Start(id)), "missing start of {id:?}");
    }
    assert_eq!(
        h.preferences.last_launched_version().as_deref(),
        Some("1.0.0-test")
    );
}

#[tokio::test]
/// What: An initialized device starts the synchronizer and lands on Home.
///
/// Inputs:
/// - Stored wallet and database files.
///
/// Output:
/// - `StartSynchronizer` in existing-wallet mode, then the sync stream starts and
///   Home is shown.
async fn initialized_device_starts_sync_and_lands_home() {
    let h = MockHarness::initialized();
    let mut app = new_app();

    let effects = launch(&mut app, &h.env);
    assert!(matches!(
        first_task(&effects),
        Some(Task::StartSynchronizer {
            mode: WalletInitMode::ExistingWallet,
            birthday: 2_000_000,
            ..
        })
    ));
    assert_eq!(app.destination(), Destination::Startup);

    let rest = settle(&mut app, effects, &h.env).await;
    assert!(rest.contains(&Effect::Start(EffectId::SyncStream)));
    assert_eq!(app.destination(), Destination::Home);
    assert_eq!(app.initialization_state, InitializationState::Initialized);
    assert_eq!(
        h.synchronizer.calls(),
        vec!["prepare_and_start:ExistingWallet".to_string()]
    );
}

#[tokio::test]
/// What: Keys without database files trigger a restore.
///
/// Inputs:
/// - Stored wallet, no database files.
///
/// Output:
/// - Restore mode start, `is_restoring_wallet` set, Home shown, re-probe sees files.
async fn missing_files_restore_the_wallet() {
    let h = MockHarness::new();
    h.keys.store_seed("abandon ability able", 1_700_000);
    let mut app = new_app();

    let effects = launch(&mut app, &h.env);
    assert_eq!(app.initialization_state, InitializationState::FilesMissing);
    assert!(app.is_restoring_wallet);

    settle(&mut app, effects, &h.env).await;
    assert_eq!(app.destination(), Destination::Home);
    assert_eq!(app.initialization_state, InitializationState::Initialized);
    assert_eq!(
        h.synchronizer.calls(),
        vec!["prepare_and_start:RestoreWallet".to_string()]
    );
}

#[test]
/// What: A failing key store keeps the user on Startup with an alert.
///
/// Inputs:
/// - Key storage reads fail with "device locked".
///
/// Output:
/// - `Failed` state, Startup destination, `InitializationFailed` alert with the
///   storage error code.
fn probe_failure_presents_initialization_alert() {
    let h = MockHarness::initialized();
    h.keys.fail_with(Some(locked_storage()));
    let mut app = new_app();

    launch(&mut app, &h.env);

    assert_eq!(app.initialization_state, InitializationState::Failed);
    assert_eq!(app.destination(), Destination::Startup);
    let alert = app.alert.as_ref().expect("alert presented");
    assert_eq!(alert.kind, AlertKind::InitializationFailed);
    assert_eq!(
        alert.error.as_ref().map(|e| e.code.as_str()),
        Some("WSTO0003")
    );
}

#[test]
/// What: Low disk space at launch wins over the probe result.
///
/// Inputs:
/// - Fresh device, not enough space; later space recovers.
///
/// Output:
/// - Startup stays locked while space is low; recovery re-probes and routes to Welcome.
fn low_space_blocks_routing_until_recovered() {
    let h = MockHarness::new();
    h.disk.set_enough(false);
    let mut app = new_app();

    launch(&mut app, &h.env);
    assert!(app.destination_state.low_space);
    assert_eq!(app.destination(), Destination::Startup);
    assert_eq!(app.initialization_state, InitializationState::Uninitialized);

    drive(
        &mut app,
        [Action::Destination(
            wallet_root::actions::DestinationAction::GoTo(Destination::Sandbox),
        )],
        &h.env,
    );
    assert_eq!(app.destination(), Destination::Startup);

    h.disk.set_enough(true);
    drive(
        &mut app,
        [Action::Initialization(InitializationAction::CheckDiskSpace)],
        &h.env,
    );
    assert!(!app.destination_state.low_space);
    assert_eq!(app.destination(), Destination::Welcome);
}

#[test]
/// What: Relaunching the same version leaves the start state unknown.
///
/// Inputs:
/// - Preferences already hold the running version.
///
/// Output:
/// - `AppStartState::Unknown`.
fn same_version_relaunch_keeps_unknown_start_state() {
    let h = MockHarness::initialized();
    h.preferences.set_last_launched_version("1.0.0-test");
    let mut app = new_app();
    launch(&mut app, &h.env);
    assert_eq!(app.start_state, AppStartState::Unknown);
}
