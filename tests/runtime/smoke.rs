//! End-to-end runtime smoke tests (headless, no filesystem).

use std::time::Duration;

use wallet_root::actions::{Action, InitializationAction};
use wallet_root::effects::EffectId;
use wallet_root::env::mock::MockHarness;
use wallet_root::features::debug::DebugAction;
use wallet_root::state::types::{ConnectionState, FLAG_SHOW_FIAT_CONVERSION, SynchronizerSnapshot};
use wallet_root::state::{AlertKind, Destination, WalletStatus};

use super::{launch, stop, wait_view};

#[tokio::test(flavor = "multi_thread")]
/// What: A fresh device boots to Welcome through the real effects.
///
/// Inputs:
/// - Empty mock device; `DidFinishLaunching`.
///
/// Output:
/// - Welcome shown; streams registered while running and cleaned up on exit.
async fn fresh_device_boots_to_welcome() {
    let h = MockHarness::new();
    let (store, handle) = launch(&h);

    wait_view(&store, |v| v.destination == Destination::Welcome).await;
    let active = store.active_effects();
    assert!(active.contains(&EffectId::BatteryStream));
    assert!(active.contains(&EffectId::StatusPoll));

    let app = stop(&store, handle).await;
    assert_eq!(app.destination(), Destination::Welcome);
    assert!(store.active_effects().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
/// What: Synchronizer snapshots reach the shared wallet status.
///
/// Inputs:
/// - Initialized device; a disconnected snapshot after Home is shown.
///
/// Output:
/// - View and `wallet_status` watch report `Disconnected`.
async fn synchronizer_updates_reach_wallet_status() {
    let h = MockHarness::initialized();
    let (store, handle) = launch(&h);
    wait_view(&store, |v| v.destination == Destination::Home).await;
    let mut status = store.wallet_status();

    h.synchronizer.emit(SynchronizerSnapshot {
        latest_height: 2_400_001,
        connection: ConnectionState::Disconnected,
        sync_progress: 10,
    });
    wait_view(&store, |v| v.wallet_status == WalletStatus::Disconnected).await;
    tokio::time::timeout(
        Duration::from_secs(5),
        status.wait_for(|s| *s == WalletStatus::Disconnected),
    )
    .await
    .expect("status in time")
    .expect("status channel open");

    stop(&store, handle).await;
}

#[tokio::test(flavor = "multi_thread")]
/// What: Wiping through the alert buttons lands on Welcome.
///
/// Inputs:
/// - Initialized device on Home; wipe request; destructive button.
///
/// Output:
/// - Welcome shown; key storage empty.
async fn wipe_through_alert_lands_on_welcome() {
    let h = MockHarness::initialized();
    let (store, handle) = launch(&h);
    wait_view(&store, |v| v.destination == Destination::Home).await;

    store.send(Action::Initialization(InitializationAction::NukeWalletRequest));
    wait_view(&store, |v| v.alert == Some(AlertKind::WipeRequest)).await;
    assert!(store.press_alert(0));

    let view = wait_view(&store, |v| v.destination == Destination::Welcome).await;
    assert_eq!(view.alert, None);
    assert!(h.keys.stored().is_none());
    stop(&store, handle).await;
}

#[tokio::test(flavor = "multi_thread")]
/// What: A debug flag update is stored and reloaded into the shared config.
///
/// Inputs:
/// - `UpdateFlag { showFiatConversion, true }`.
///
/// Output:
/// - `wallet_config` watch sees the flag enabled.
async fn flag_update_reaches_shared_config() {
    let h = MockHarness::initialized();
    let (store, handle) = launch(&h);
    wait_view(&store, |v| v.destination == Destination::Home).await;
    let mut config = store.wallet_config();

    store.send(Action::Debug(DebugAction::UpdateFlag {
        name: FLAG_SHOW_FIAT_CONVERSION.to_string(),
        enabled: true,
    }));
    tokio::time::timeout(
        Duration::from_secs(5),
        config.wait_for(|c| c.is_enabled(FLAG_SHOW_FIAT_CONVERSION)),
    )
    .await
    .expect("config in time")
    .expect("config channel open");

    stop(&store, handle).await;
}
