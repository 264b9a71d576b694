//! Named effects under the runtime: cancellation and stale results.

use std::time::Duration;

use wallet_root::actions::Action;
use wallet_root::effects::EffectId;
use wallet_root::env::mock::MockHarness;
use wallet_root::state::types::{ConnectionState, SynchronizerSnapshot};
use wallet_root::state::{Destination, WalletStatus};

use super::{launch, stop, wait_view};

#[tokio::test(flavor = "multi_thread")]
/// What: After cancel-all, synchronizer changes no longer reach the state.
///
/// Inputs:
/// - Initialized device on Home; `CancelAllRunningEffects`; disconnected snapshot.
///
/// Output:
/// - Registry empty; wallet status stays `None`.
async fn cancelled_stream_stops_delivering() {
    let h = MockHarness::initialized();
    let (store, handle) = launch(&h);
    wait_view(&store, |v| v.destination == Destination::Home).await;
    assert!(store.active_effects().contains(&EffectId::SyncStream));

    store.send(Action::CancelAllRunningEffects);
    for _ in 0..200 {
        if store.active_effects().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(store.active_effects().is_empty());

    h.synchronizer.emit(SynchronizerSnapshot {
        latest_height: 2_400_002,
        connection: ConnectionState::Disconnected,
        sync_progress: 0,
    });
    // A later action is applied after anything the stream could have queued.
    store.send(Action::ServerSetupBindingUpdated(true));
    let view = wait_view(&store, |v| v.server_setup_shown).await;
    assert_eq!(view.wallet_status, WalletStatus::None);

    stop(&store, handle).await;
}

#[tokio::test(flavor = "multi_thread")]
/// What: Re-entering the foreground does not duplicate running streams.
///
/// Inputs:
/// - Fresh device on Welcome; two foreground notifications.
///
/// Output:
/// - Streams still registered; launch state untouched.
async fn foreground_twice_keeps_single_streams() {
    use wallet_root::actions::{AppDelegateAction, InitializationAction};

    let h = MockHarness::new();
    let (store, handle) = launch(&h);
    wait_view(&store, |v| v.destination == Destination::Welcome).await;
    for _ in 0..2 {
        store.send(Action::Initialization(InitializationAction::AppDelegate(
            AppDelegateAction::WillEnterForeground,
        )));
    }
    store.send(Action::ServerSetupBindingUpdated(true));
    wait_view(&store, |v| v.server_setup_shown).await;

    let active = store.active_effects();
    assert!(active.contains(&EffectId::BatteryStream));
    assert!(active.contains(&EffectId::StatusPoll));
    let app = stop(&store, handle).await;
    assert_eq!(app.destination(), Destination::Welcome);
}

#[tokio::test(flavor = "multi_thread")]
/// What: A synchronizer start that outlives cancel-all is not applied.
///
/// Inputs:
/// - Initialized device whose synchronizer start is held; `CancelAllRunningEffects`
///   while it is pending; the start is then released.
///
/// Output:
/// - The late start neither routes to Home nor subscribes to snapshots.
async fn task_result_after_cancel_all_is_dropped() {
    let h = MockHarness::initialized();
    h.synchronizer.set_start_open(false);
    let (store, handle) = launch(&h);
    for _ in 0..400 {
        if !h.synchronizer.calls().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(h.synchronizer.calls(), vec!["prepare_and_start:ExistingWallet"]);

    store.send(Action::CancelAllRunningEffects);
    store.send(Action::ServerSetupBindingUpdated(true));
    wait_view(&store, |v| v.server_setup_shown).await;

    h.synchronizer.set_start_open(true);
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.send(Action::ServerSetupBindingUpdated(false));
    let view = wait_view(&store, |v| !v.server_setup_shown).await;

    assert_eq!(view.destination, Destination::Startup);
    assert!(!store.active_effects().contains(&EffectId::SyncStream));
    stop(&store, handle).await;
}
