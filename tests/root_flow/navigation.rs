//! Destination routing, deep links and the alert slot.

use wallet_root::actions::{Action, DestinationAction, InitializationAction};
use wallet_root::env::mock::MockHarness;
use wallet_root::features::tabs::{SendPrefill, Tab};
use wallet_root::state::types::{FLAG_TEST_BACKUP_PHRASE_FLOW, WalletConfig};
use wallet_root::state::{AlertKind, AppState, Destination, DialogKind, InitializationState};
use wallet_root::test_utils::{drive, new_app};

fn goto(target: Destination) -> Action {
    Action::Destination(DestinationAction::GoTo(target))
}

fn deeplink(url: &str) -> Action {
    Action::Destination(DestinationAction::Deeplink(url.to_string()))
}

/// Restore in progress with the backup test on screen.
fn validating_during_restore() -> AppState {
    let mut app = new_app();
    app.wallet_config = WalletConfig::initial().with_flag(FLAG_TEST_BACKUP_PHRASE_FLOW, true);
    app.initialization_state = InitializationState::Initialized;
    app.is_restoring_wallet = true;
    app.destination_state.destination = Destination::PhraseValidation;
    app
}

#[test]
/// What: A deep link into Home is dropped while keys are missing.
///
/// Inputs:
/// - Welcome shown, state `KeysMissing`, `wallet-root://home`.
///
/// Output:
/// - Destination unchanged; `FailedToProcessDeeplink` alert presented.
fn deeplink_home_with_keys_missing_is_dropped() {
    let h = MockHarness::new();
    let mut app = new_app();
    app.initialization_state = InitializationState::KeysMissing;
    app.destination_state.destination = Destination::Welcome;

    drive(&mut app, [deeplink("wallet-root://home")], &h.env);

    assert_eq!(app.destination(), Destination::Welcome);
    let alert = app.alert.as_ref().expect("deeplink alert");
    assert_eq!(alert.kind, AlertKind::FailedToProcessDeeplink);
    assert_eq!(
        alert.error.as_ref().map(|e| e.code.as_str()),
        Some("WDLK0002")
    );
}

#[test]
/// What: A payment link opens Home with the send form prefilled.
///
/// Inputs:
/// - Initialized wallet on Startup; `zcash:` URI with amount and memo.
///
/// Output:
/// - Home shown, back slot holds Startup, send tab selected with the prefill.
fn payment_deeplink_prefills_send() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    app.initialization_state = InitializationState::Initialized;

    drive(&mut app, [deeplink("zcash:t1abc?amount=1.5&memo=hi")], &h.env);

    assert_eq!(app.destination(), Destination::Home);
    assert_eq!(
        app.destination_state.previous_destination,
        Some(Destination::Startup)
    );
    assert_eq!(app.tabs.selected, Tab::Send);
    assert_eq!(
        app.tabs.send_prefill,
        Some(SendPrefill {
            address: "t1abc".into(),
            amount: 150_000_000,
            memo: Some("hi".into()),
        })
    );
    assert!(app.alert.is_none());
}

#[test]
/// What: A link nobody understands keeps the screen and explains why.
///
/// Inputs:
/// - `https://example.com`.
///
/// Output:
/// - Destination unchanged; alert carries the invalid-link code.
fn unknown_deeplink_is_reported() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    app.initialization_state = InitializationState::Initialized;
    drive(&mut app, [deeplink("https://example.com")], &h.env);
    assert_eq!(app.destination(), Destination::Startup);
    assert_eq!(
        app.alert
            .as_ref()
            .and_then(|a| a.error.as_ref())
            .map(|e| e.code.as_str()),
        Some("WDLK0001")
    );
}

#[test]
/// What: Leaving the backup test during a restore needs confirmation.
///
/// Inputs:
/// - PhraseValidation during restore; `GoTo(Home)`, then "leave".
///
/// Output:
/// - First a dialog with no navigation; after confirming, Home.
fn leaving_backup_test_during_restore_asks_first() {
    let h = MockHarness::initialized();
    let mut app = validating_during_restore();

    drive(&mut app, [goto(Destination::Home)], &h.env);
    assert_eq!(app.destination(), Destination::PhraseValidation);
    let dialog = app.confirmation_dialog.clone().expect("guard dialog");
    assert_eq!(dialog.kind, DialogKind::LeavePhraseValidation);

    drive(&mut app, [dialog.action_for(0).expect("leave")], &h.env);
    assert!(app.confirmation_dialog.is_none());
    assert_eq!(app.destination(), Destination::Home);
}

#[test]
/// What: Staying on the backup test keeps everything as it was.
///
/// Inputs:
/// - Guard dialog answered with "stay".
///
/// Output:
/// - Still on PhraseValidation; dialog closed.
fn staying_on_backup_test_keeps_destination() {
    let h = MockHarness::initialized();
    let mut app = validating_during_restore();
    drive(&mut app, [goto(Destination::Home)], &h.env);
    let stay = app
        .confirmation_dialog
        .as_ref()
        .and_then(|d| d.action_for(1))
        .expect("stay");
    drive(&mut app, [stay], &h.env);
    assert!(app.confirmation_dialog.is_none());
    assert_eq!(app.destination(), Destination::PhraseValidation);
}

#[test]
/// What: Explicit navigation fills the back slot and back empties it.
///
/// Inputs:
/// - Welcome; `GoTo(Sandbox)`; `Back`; `Back` again.
///
/// Output:
/// - Sandbox with Welcome behind it, then Welcome with an empty slot; the
///   second back is a no-op.
fn back_returns_one_level() {
    let h = MockHarness::new();
    let mut app = new_app();
    app.destination_state.destination = Destination::Welcome;

    drive(&mut app, [goto(Destination::Sandbox)], &h.env);
    assert_eq!(app.destination(), Destination::Sandbox);
    assert_eq!(
        app.destination_state.previous_destination,
        Some(Destination::Welcome)
    );

    let back = Action::Destination(DestinationAction::Back);
    drive(&mut app, [back.clone(), back], &h.env);
    assert_eq!(app.destination(), Destination::Welcome);
    assert_eq!(app.destination_state.previous_destination, None);
}

#[test]
/// What: The alert slot holds only the latest alert.
///
/// Inputs:
/// - Wipe request, then an unresolvable deep link.
///
/// Output:
/// - Only the deep-link alert is visible.
fn newer_alert_replaces_older() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    drive(
        &mut app,
        [
            Action::Initialization(InitializationAction::NukeWalletRequest),
            deeplink("nonsense"),
        ],
        &h.env,
    );
    assert_eq!(
        app.alert.as_ref().map(|a| a.kind),
        Some(AlertKind::FailedToProcessDeeplink)
    );
}

#[test]
/// What: Server switch opens the server sheet without navigating.
///
/// Inputs:
/// - Home; `ServerSwitch`.
///
/// Output:
/// - Binding on; destination unchanged.
fn server_switch_opens_sheet() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    app.destination_state.destination = Destination::Home;
    drive(
        &mut app,
        [Action::Destination(DestinationAction::ServerSwitch)],
        &h.env,
    );
    assert!(app.server_setup_binding);
    assert_eq!(app.destination(), Destination::Home);
}
