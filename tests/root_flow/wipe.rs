//! Wallet wipe.

use wallet_root::actions::{Action, InitializationAction};
use wallet_root::effects::{Effect, EffectId, Task};
use wallet_root::env::mock::{MockHarness, failure};
use wallet_root::errors::ErrorCode;
use wallet_root::state::types::{Network, WalletConfig, WalletInitMode};
use wallet_root::state::{AlertKind, AppState, Destination, InitializationState};
use wallet_root::test_utils::{drive, launch, new_app, settle};

/// Initialized device driven to Home.
async fn at_home(h: &MockHarness) -> AppState {
    let mut app = new_app();
    let effects = launch(&mut app, &h.env);
    settle(&mut app, effects, &h.env).await;
    assert_eq!(app.destination(), Destination::Home);
    app
}

#[test]
/// What: The wipe confirmation's destructive button dispatches the wipe.
///
/// Inputs:
/// - `NukeWalletRequest`, then button 0 of the presented alert.
///
/// Output:
/// - Alert slot empty; effects cancel everything and run the wipe task.
fn wipe_confirmation_dispatches_wipe_and_clears_alert() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    drive(
        &mut app,
        [Action::Initialization(InitializationAction::NukeWalletRequest)],
        &h.env,
    );
    let alert = app.alert.clone().expect("wipe request");
    assert_eq!(alert.kind, AlertKind::WipeRequest);

    let effects = drive(&mut app, [alert.action_for(0).expect("yes")], &h.env);
    assert!(app.alert.is_none());
    assert_eq!(
        effects,
        vec![
            Effect::CancelAll,
            Effect::Run(Task::NukeWallet {
                network: Network::Testnet
            }),
        ]
    );
}

#[test]
/// What: Declining the wipe only closes the alert.
///
/// Inputs:
/// - `NukeWalletRequest`, then the cancel button.
///
/// Output:
/// - No effects; alert slot empty.
fn wipe_declined_does_nothing() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    drive(
        &mut app,
        [Action::Initialization(InitializationAction::NukeWalletRequest)],
        &h.env,
    );
    let no = app.alert.as_ref().and_then(|a| a.action_for(1)).expect("no");
    assert!(drive(&mut app, [no], &h.env).is_empty());
    assert!(app.alert.is_none());
}

#[tokio::test]
/// What: A successful wipe resets the root and lands on Welcome.
///
/// Inputs:
/// - Initialized wallet on Home with a custom config; confirmed wipe.
///
/// Output:
/// - Keys and files gone, state reset (network and config kept), Welcome shown,
///   config refresh restarted.
async fn wipe_success_resets_to_welcome() {
    let h = MockHarness::initialized();
    let mut app = at_home(&h).await;
    let config = WalletConfig::initial().with_flag("onboardingFlow", true);
    app.wallet_config = config.clone();
    app.is_restoring_wallet = true;

    let effects = drive(
        &mut app,
        [Action::Initialization(InitializationAction::NukeWallet)],
        &h.env,
    );
    let rest = settle(&mut app, effects, &h.env).await;

    assert_eq!(rest, vec![Effect::CancelAll, Effect::Start(EffectId::ConfigRefresh)]);
    assert!(h.keys.stored().is_none());
    assert_eq!(app.destination(), Destination::Welcome);
    assert_eq!(app.initialization_state, InitializationState::Uninitialized);
    assert_eq!(app.network, Network::Testnet);
    assert_eq!(app.wallet_config, config);
    assert!(!app.is_restoring_wallet);
}

#[tokio::test]
/// What: A failed wipe is reported and the pending setup dropped.
///
/// Inputs:
/// - Synchronizer wipe fails; wipe triggered from the existing-wallet alert.
///
/// Output:
/// - `WipeFailed` alert with the synchronizer error code; wallet still stored.
async fn wipe_failure_alerts() {
    let h = MockHarness::initialized();
    h.synchronizer
        .fail_wipe_with(Some(failure(ErrorCode::SynchronizerWipe, "disk busy")));
    let mut app = new_app();
    drive(
        &mut app,
        [Action::Initialization(InitializationAction::CreateNewWallet)],
        &h.env,
    );
    let press = app
        .alert
        .as_ref()
        .and_then(|a| a.action_for(1))
        .expect("continue");
    let effects = drive(&mut app, [press], &h.env);
    settle(&mut app, effects, &h.env).await;

    let alert = app.alert.as_ref().expect("wipe failed alert");
    assert_eq!(alert.kind, AlertKind::WipeFailed);
    assert_eq!(
        alert.error.as_ref().map(|e| e.code.as_str()),
        Some("WSYN0003")
    );
    assert_eq!(app.pending_setup, None);
    assert!(h.keys.stored().is_some());
}

#[tokio::test]
/// What: A synchronizer start reported after a wipe does not revive the wallet.
///
/// Inputs:
/// - Initialized wallet wiped back to Welcome, then a late
///   `SynchronizerStarted(ExistingWallet)`.
///
/// Output:
/// - Still on Welcome and `Uninitialized`; no snapshot stream started.
async fn late_synchronizer_start_after_wipe_is_ignored() {
    let h = MockHarness::initialized();
    let mut app = at_home(&h).await;
    let effects = drive(
        &mut app,
        [Action::Initialization(InitializationAction::NukeWallet)],
        &h.env,
    );
    settle(&mut app, effects, &h.env).await;
    assert_eq!(app.destination(), Destination::Welcome);

    let effects = drive(
        &mut app,
        [Action::Initialization(InitializationAction::SynchronizerStarted(
            WalletInitMode::ExistingWallet,
        ))],
        &h.env,
    );
    assert!(!effects.contains(&Effect::Start(EffectId::SyncStream)));
    assert_eq!(app.destination(), Destination::Welcome);
    assert_eq!(app.initialization_state, InitializationState::Uninitialized);
}
