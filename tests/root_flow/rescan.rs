//! Blockchain rescan from the debug screen.

use wallet_root::actions::{Action, AlertAction};
use wallet_root::effects::Effect;
use wallet_root::env::mock::{MockHarness, failure};
use wallet_root::errors::ErrorCode;
use wallet_root::features::debug::DebugAction;
use wallet_root::state::modal::ButtonRole;
use wallet_root::state::{AlertKind, AppState, Destination, DialogKind};
use wallet_root::test_utils::{drive, launch, new_app, settle};

/// Initialized device driven to Home.
async fn at_home(h: &MockHarness) -> AppState {
    let mut app = new_app();
    let effects = launch(&mut app, &h.env);
    settle(&mut app, effects, &h.env).await;
    assert_eq!(app.destination(), Destination::Home);
    app
}

/// Ask for a rescan and press dialog button `index`, running the rewind inline.
async fn rescan(h: &MockHarness, app: &mut AppState, index: usize) -> Vec<Effect> {
    drive(app, [Action::Debug(DebugAction::RescanBlockchain)], &h.env);
    let dialog = app.confirmation_dialog.clone().expect("rescan dialog");
    assert_eq!(dialog.kind, DialogKind::RescanRequest);
    let effects = drive(app, [dialog.action_for(index).expect("button")], &h.env);
    settle(app, effects, &h.env).await
}

#[tokio::test]
/// What: A synchronizer that will not restart after a rewind is reported.
///
/// Inputs:
/// - Home; restart fails with a `SynchronizerStart` error; quick rescan chosen.
///
/// Output:
/// - `CantStartSync` alert with code and detail, a single acknowledging button,
///   no retry effect, and the rewind no longer marked running.
async fn restart_failure_after_rewind_alerts() {
    let h = MockHarness::initialized();
    let mut app = at_home(&h).await;
    h.synchronizer
        .fail_restart_with(Some(failure(ErrorCode::SynchronizerStart, "lightwalletd refused")));

    let rest = rescan(&h, &mut app, 0).await;

    assert!(rest.is_empty());
    let calls = h.synchronizer.calls();
    assert_eq!(calls[calls.len() - 3..], ["stop", "rewind:Quick", "start"]);
    let alert = app.alert.clone().expect("cant start sync");
    assert_eq!(alert.kind, AlertKind::CantStartSync);
    let detail = alert.error.expect("error detail");
    assert_eq!(detail.code, "WSYN0001");
    assert_eq!(detail.message, "lightwalletd refused");
    assert!(alert.message.unwrap_or_default().contains("lightwalletd refused"));
    assert_eq!(alert.buttons.len(), 1);
    assert_eq!(alert.buttons[0].role, ButtonRole::Cancel);
    assert_eq!(alert.buttons[0].action, None);
    assert!(app.debug.rewind_in_progress.is_none());
    assert_eq!(app.destination(), Destination::Home);

    let ok = app.alert.as_ref().and_then(|a| a.action_for(0)).expect("ok");
    assert_eq!(ok, Action::Alert(AlertAction::Dismiss));
    assert!(drive(&mut app, [ok], &h.env).is_empty());
    assert!(app.alert.is_none());
}

#[tokio::test]
async fn rewind_failure_alerts_without_restart() {
    let h = MockHarness::initialized();
    let mut app = at_home(&h).await;
    h.synchronizer
        .fail_rewind_with(Some(failure(ErrorCode::SynchronizerRewind, "bad height")));

    let rest = rescan(&h, &mut app, 1).await;

    assert!(rest.is_empty());
    assert_eq!(h.synchronizer.calls().last().map(String::as_str), Some("rewind:Full"));
    let alert = app.alert.expect("rewind failed");
    assert_eq!(alert.kind, AlertKind::RewindFailed);
    assert_eq!(alert.error.map(|e| e.code), Some("WSYN0002".to_string()));
}
