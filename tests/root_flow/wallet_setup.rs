//! Creating, importing and backing up a wallet.

use wallet_root::actions::{Action, InitializationAction};
use wallet_root::effects::{Effect, EffectId, Task};
use wallet_root::env::mock::{HARNESS_PHRASE, MockHarness, locked_storage};
use wallet_root::features::onboarding::OnboardingAction;
use wallet_root::features::phrase_display::PhraseDisplayAction;
use wallet_root::features::phrase_validation::PhraseValidationAction;
use wallet_root::features::welcome::WelcomeAction;
use wallet_root::state::types::{
    FLAG_TEST_BACKUP_PHRASE_FLOW, PendingWalletSetup, SeedPhrase, WalletConfig, WalletInitMode,
};
use wallet_root::state::{AlertKind, AppState, Destination};
use wallet_root::test_utils::{drive, first_task, launch, new_app, settle};

/// Fresh device driven to the new wallet's phrase display.
async fn created_wallet(h: &MockHarness) -> AppState {
    let mut app = new_app();
    launch(&mut app, &h.env);
    let effects = drive(
        &mut app,
        [
            Action::Welcome(WelcomeAction::GetStarted),
            Action::Onboarding(OnboardingAction::CreateNewWallet),
        ],
        &h.env,
    );
    settle(&mut app, effects, &h.env).await;
    app
}

#[tokio::test]
/// What: Creating a wallet stores a fresh phrase and shows it.
///
/// Inputs:
/// - Fresh device: Welcome -> Onboarding -> create.
///
/// Output:
/// - Stored wallet with the generated phrase and the synchronizer's height as
///   birthday; PhraseDisplay shown with the phrase loaded.
async fn create_new_wallet_shows_phrase() {
    let h = MockHarness::new();
    let app = created_wallet(&h).await;

    let stored = h.keys.stored().expect("wallet stored");
    assert_eq!(stored.seed, SeedPhrase::new(HARNESS_PHRASE));
    assert_eq!(stored.birthday, 2_400_000);
    assert_eq!(app.destination(), Destination::PhraseDisplay);
    assert_eq!(app.phrase_display.phrase, Some(SeedPhrase::new(HARNESS_PHRASE)));
    assert!(!app.is_restoring_wallet);
    assert_eq!(
        h.synchronizer.calls(),
        vec!["prepare_and_start:NewWallet".to_string()]
    );
}

#[tokio::test]
/// What: Finishing the phrase display runs the backup test when enabled.
///
/// Inputs:
/// - Created wallet, backup test flag on, correct answers for words 3 and 9.
///
/// Output:
/// - PhraseValidation, then Home with the backup mark stored.
async fn backup_test_pass_is_persisted() {
    let h = MockHarness::new();
    let mut app = created_wallet(&h).await;
    app.wallet_config = WalletConfig::initial().with_flag(FLAG_TEST_BACKUP_PHRASE_FLOW, true);

    drive(
        &mut app,
        [Action::PhraseDisplay(PhraseDisplayAction::Finished)],
        &h.env,
    );
    assert_eq!(app.destination(), Destination::PhraseValidation);
    assert_eq!(app.phrase_validation.asked_positions(), vec![3, 9]);

    drive(
        &mut app,
        [Action::PhraseValidation(PhraseValidationAction::Submit(vec![
            "able".into(),
            "absurd".into(),
        ]))],
        &h.env,
    );
    assert_eq!(app.destination(), Destination::Home);
    assert!(
        h.keys
            .stored()
            .is_some_and(|w| w.has_user_passed_phrase_backup_test)
    );
}

#[tokio::test]
/// What: A storage failure while saving the backup mark is reported.
///
/// Inputs:
/// - Backup test passed while key storage writes fail.
///
/// Output:
/// - `CantStoreThatUserPassedPhraseBackupTest` alert; destination unchanged.
async fn backup_mark_failure_alerts() {
    let h = MockHarness::new();
    let mut app = created_wallet(&h).await;
    app.wallet_config = WalletConfig::initial().with_flag(FLAG_TEST_BACKUP_PHRASE_FLOW, true);
    drive(
        &mut app,
        [Action::PhraseDisplay(PhraseDisplayAction::Finished)],
        &h.env,
    );
    h.keys.fail_writes_with(Some(locked_storage()));

    drive(
        &mut app,
        [Action::PhraseValidation(PhraseValidationAction::Submit(vec![
            "able".into(),
            "absurd".into(),
        ]))],
        &h.env,
    );
    assert_eq!(app.destination(), Destination::PhraseValidation);
    assert_eq!(
        app.alert.as_ref().map(|a| a.kind),
        Some(AlertKind::CantStoreThatUserPassedPhraseBackupTest)
    );
}

#[test]
/// What: Creating over an existing wallet asks first.
///
/// Inputs:
/// - Stored wallet; `CreateNewWallet`.
///
/// Output:
/// - `ExistingWallet` alert, creation kept pending, nothing overwritten.
fn create_over_existing_wallet_asks_first() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    let effects = drive(
        &mut app,
        [Action::Initialization(InitializationAction::CreateNewWallet)],
        &h.env,
    );
    assert!(effects.is_empty());
    assert_eq!(app.alert.as_ref().map(|a| a.kind), Some(AlertKind::ExistingWallet));
    assert_eq!(app.pending_setup, Some(PendingWalletSetup::CreateNew));
    assert_eq!(h.keys.stored().map(|w| w.birthday), Some(2_000_000));
}

#[tokio::test]
/// What: Choosing "continue" on the existing-wallet alert wipes, then creates.
///
/// Inputs:
/// - Stored wallet; `CreateNewWallet`; destructive alert button.
///
/// Output:
/// - Effects cancelled, wallet wiped, new wallet created and its phrase shown.
async fn existing_wallet_continue_wipes_then_creates() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    drive(
        &mut app,
        [Action::Initialization(InitializationAction::CreateNewWallet)],
        &h.env,
    );
    let press = app
        .alert
        .as_ref()
        .and_then(|alert| alert.action_for(1))
        .expect("continue button");

    let effects = drive(&mut app, [press], &h.env);
    assert!(app.alert.is_none());
    assert_eq!(effects.first(), Some(&Effect::CancelAll));

    let rest = settle(&mut app, effects, &h.env).await;
    assert!(rest.contains(&Effect::Start(EffectId::ConfigRefresh)));
    assert!(rest.contains(&Effect::Start(EffectId::SyncStream)));
    assert_eq!(app.pending_setup, None);
    assert_eq!(app.destination(), Destination::PhraseDisplay);
    assert_eq!(h.keys.stored().map(|w| w.birthday), Some(2_400_000));
    assert_eq!(
        h.synchronizer.calls(),
        vec![
            "stop".to_string(),
            "wipe".to_string(),
            "prepare_and_start:NewWallet".to_string(),
        ]
    );
}

#[test]
/// What: Importing the phrase already stored keeps the wallet.
///
/// Inputs:
/// - Stored wallet; import of the same phrase with extra whitespace.
///
/// Output:
/// - No alert; synchronizer start in existing-wallet mode.
fn import_same_phrase_keeps_existing_wallet() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    let phrase = format!("  {HARNESS_PHRASE}  ");
    let effects = drive(
        &mut app,
        [Action::Initialization(InitializationAction::ImportWallet {
            seed: SeedPhrase::new(&phrase),
            birthday: 1,
        })],
        &h.env,
    );
    assert!(app.alert.is_none());
    assert!(matches!(
        first_task(&effects),
        Some(Task::StartSynchronizer {
            mode: WalletInitMode::ExistingWallet,
            ..
        })
    ));
}

#[test]
/// What: Importing a different phrase asks before replacing the wallet.
///
/// Inputs:
/// - Stored wallet; import of another phrase.
///
/// Output:
/// - `DifferentSeed` alert with the import kept pending.
fn import_different_phrase_asks_first() {
    let h = MockHarness::initialized();
    let mut app = new_app();
    let seed = SeedPhrase::new("zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong");
    drive(
        &mut app,
        [Action::Initialization(InitializationAction::ImportWallet {
            seed: seed.clone(),
            birthday: 1_500_000,
        })],
        &h.env,
    );
    assert_eq!(app.alert.as_ref().map(|a| a.kind), Some(AlertKind::DifferentSeed));
    assert_eq!(
        app.pending_setup,
        Some(PendingWalletSetup::Import {
            seed,
            birthday: 1_500_000,
        })
    );
}

#[tokio::test]
/// What: Importing on a fresh device restores from the given birthday.
///
/// Inputs:
/// - No stored wallet; import through onboarding.
///
/// Output:
/// - Wallet stored, restore flag set, Home shown.
async fn import_on_fresh_device_restores() {
    let h = MockHarness::new();
    let mut app = new_app();
    launch(&mut app, &h.env);
    let effects = drive(
        &mut app,
        [Action::Onboarding(OnboardingAction::ImportWallet {
            seed: SeedPhrase::new(HARNESS_PHRASE),
            birthday: 1_800_000,
        })],
        &h.env,
    );
    assert!(app.is_restoring_wallet);
    settle(&mut app, effects, &h.env).await;

    assert_eq!(app.destination(), Destination::Home);
    assert_eq!(h.keys.stored().map(|w| w.birthday), Some(1_800_000));
    assert_eq!(
        h.synchronizer.calls(),
        vec!["prepare_and_start:RestoreWallet".to_string()]
    );
}
