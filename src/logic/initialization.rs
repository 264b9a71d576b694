//! Launch, wallet setup and wipe flows.

use crate::actions::{Action, InitializationAction};
use crate::effects::{Effect, EffectId, Task};
use crate::env::Environment;
use crate::errors::{WalletError, WalletStorageError};
use crate::logic::{alerts, lifecycle, probe, router};
use crate::state::AppState;
use crate::state::types::{
    AppStartState, Destination, InitializationState, PendingWalletSetup, SeedPhrase,
    StoredWallet, WalletInitMode,
};

/// What: Classify how this process came to be running.
///
/// Inputs:
/// - `previous_version`: Version recorded at the previous launch, if any
/// - `current_version`: Running version
/// - `keys_present`: Whether key storage holds a wallet
///
/// Output:
/// - `FirstInstall`, `RestoredFromBackup`, `UpgradedPreviousInstall`, or `Unknown`
///   for a plain relaunch of the same version.
#[must_use]
pub fn determine_start_state(
    previous_version: Option<&str>,
    current_version: &str,
    keys_present: bool,
) -> AppStartState {
    match previous_version {
        None if keys_present => AppStartState::RestoredFromBackup,
        None => AppStartState::FirstInstall,
        Some(previous) if previous != current_version => AppStartState::UpgradedPreviousInstall,
        Some(_) => AppStartState::Unknown,
    }
}

/// What: Apply an initialization action.
///
/// Inputs:
/// - `app`: Root state
/// - `action`: Initialization action
/// - `env`: Collaborators
///
/// Output:
/// - Effects for the runtime loop.
pub fn reduce(app: &mut AppState, action: InitializationAction, env: &Environment) -> Vec<Effect> {
    match action {
        InitializationAction::AppDelegate(event) => lifecycle::app_delegate(app, event, env),
        InitializationAction::InitialSetups => initial_setups(app, env),
        InitializationAction::CheckDiskSpace => {
            let enough = env.disk_space.has_enough_free_space();
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::DiskSpaceChecked { enough },
            ))]
        }
        InitializationAction::DiskSpaceChecked { enough } => {
            lifecycle::disk_space_checked(app, enough)
        }
        InitializationAction::CheckWalletInitialization => {
            let outcome =
                probe::probe_wallet(&*env.key_storage, &*env.database_files, app.network);
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::RespondToWalletInitializationState {
                    state: outcome.state,
                    error: outcome.error,
                },
            ))]
        }
        InitializationAction::RespondToWalletInitializationState { state, error } => {
            respond_to_state(app, state, error, env)
        }
        InitializationAction::InitializeSdk(mode) => initialize_sdk(app, mode, env),
        InitializationAction::SynchronizerStarted(mode) => synchronizer_started(app, mode, env),
        InitializationAction::SynchronizerStartFailed(err) => {
            tracing::error!(error = %err, "synchronizer failed to start");
            let alert = alerts::initialization_failed(app, &err);
            alerts::present(app, alert);
            Vec::new()
        }
        InitializationAction::CreateNewWallet => create_new_wallet(app, env),
        InitializationAction::ImportWallet { seed, birthday } => {
            import_wallet(app, seed, birthday, env)
        }
        InitializationAction::RestoreExistingWallet => {
            tracing::info!("keeping the wallet already on this device");
            app.pending_setup = None;
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::InitializeSdk(WalletInitMode::ExistingWallet),
            ))]
        }
        InitializationAction::NukeWalletRequest => {
            let alert = alerts::wipe_request(app);
            alerts::present(app, alert);
            Vec::new()
        }
        InitializationAction::NukeWallet => {
            tracing::warn!(network = app.network.as_str(), "wiping wallet");
            vec![
                Effect::CancelAll,
                Effect::Run(Task::NukeWallet {
                    network: app.network,
                }),
            ]
        }
        InitializationAction::BackupPhraseValidated => {
            match env.key_storage.mark_user_passed_phrase_backup_test(true) {
                Ok(()) => {
                    tracing::info!("backup test passed and stored");
                    router::route(app, Destination::Home, env)
                }
                Err(err) => {
                    let err = WalletError::from(err);
                    tracing::warn!(error = %err, "storing backup test mark failed");
                    let alert = alerts::cant_store_backup_test_mark(app, &err);
                    alerts::present(app, alert);
                    Vec::new()
                }
            }
        }
    }
}

/// One-time setup after the splash delay.
fn initial_setups(app: &mut AppState, env: &Environment) -> Vec<Effect> {
    if app.start_state == AppStartState::Unknown {
        let previous = env.preferences.last_launched_version();
        let keys_present = env.key_storage.are_keys_present().unwrap_or(false);
        app.start_state =
            determine_start_state(previous.as_deref(), &env.app_version, keys_present);
        env.preferences.set_last_launched_version(&env.app_version);
        tracing::info!(start_state = ?app.start_state, previous = ?previous, "start state determined");
    }
    vec![
        Effect::Start(EffectId::ConfigRefresh),
        Effect::Start(EffectId::BatteryStream),
        Effect::Start(EffectId::StatusPoll),
        Effect::Dispatch(Action::Initialization(InitializationAction::CheckDiskSpace)),
        Effect::Dispatch(Action::Initialization(
            InitializationAction::CheckWalletInitialization,
        )),
    ]
}

/// Route according to a probe result. The state is recorded even when routing is locked.
fn respond_to_state(
    app: &mut AppState,
    state: InitializationState,
    error: Option<WalletError>,
    env: &Environment,
) -> Vec<Effect> {
    app.initialization_state = state;
    tracing::info!(state = %state, "wallet initialization state");
    if app.destination_state.low_space {
        // Recovery from low space re-probes and resumes from here.
        return Vec::new();
    }
    match state {
        InitializationState::Uninitialized | InitializationState::KeysMissing => {
            router::route(app, Destination::Welcome, env)
        }
        InitializationState::Initialized => vec![Effect::Dispatch(Action::Initialization(
            InitializationAction::InitializeSdk(WalletInitMode::ExistingWallet),
        ))],
        InitializationState::FilesMissing => {
            app.is_restoring_wallet = true;
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::InitializeSdk(WalletInitMode::RestoreWallet),
            ))]
        }
        InitializationState::Failed => {
            let effects = router::route(app, Destination::Startup, env);
            let alert = match &error {
                Some(err) => alerts::initialization_failed(app, err),
                None => alerts::wallet_state_failed(app, state),
            };
            alerts::present(app, alert);
            effects
        }
    }
}

/// Load the stored wallet and ask for the synchronizer to be started with it.
fn initialize_sdk(app: &mut AppState, mode: WalletInitMode, env: &Environment) -> Vec<Effect> {
    match env.key_storage.export_wallet() {
        Ok(wallet) => {
            tracing::info!(mode = ?mode, birthday = wallet.birthday, "initializing synchronizer");
            vec![Effect::Run(Task::StartSynchronizer {
                seed: wallet.seed,
                birthday: wallet.birthday,
                mode,
            })]
        }
        Err(err) => {
            let err = WalletError::from(err);
            tracing::error!(error = %err, "cannot load seed phrase");
            let alert = alerts::cant_load_seed_phrase(app, &err);
            alerts::present(app, alert);
            Vec::new()
        }
    }
}

/// What: Synchronizer is running: subscribe to snapshots and show the wallet.
///
/// Details:
/// - The wallet is re-probed first. A start that no longer matches a set-up
///   wallet (e.g. it raced a wipe) routes by the probe result instead.
fn synchronizer_started(
    app: &mut AppState,
    mode: WalletInitMode,
    env: &Environment,
) -> Vec<Effect> {
    let outcome = probe::probe_wallet(&*env.key_storage, &*env.database_files, app.network);
    if !matches!(
        outcome.state,
        InitializationState::Initialized | InitializationState::FilesMissing
    ) {
        tracing::warn!(mode = ?mode, state = %outcome.state, "synchronizer started without a wallet");
        return vec![Effect::Dispatch(Action::Initialization(
            InitializationAction::RespondToWalletInitializationState {
                state: outcome.state,
                error: outcome.error,
            },
        ))];
    }
    app.initialization_state = outcome.state;
    let target = match mode {
        WalletInitMode::NewWallet => Destination::PhraseDisplay,
        WalletInitMode::ExistingWallet | WalletInitMode::RestoreWallet => Destination::Home,
    };
    tracing::info!(mode = ?mode, state = %app.initialization_state, "synchronizer started");
    let mut effects = vec![Effect::Start(EffectId::SyncStream)];
    effects.extend(router::route(app, target, env));
    effects
}

/// What: Create and store a fresh wallet.
///
/// Details:
/// - An existing wallet is never overwritten silently: `ExistingWallet` is
///   presented and the creation is kept pending until the user decides.
fn create_new_wallet(app: &mut AppState, env: &Environment) -> Vec<Effect> {
    match env.key_storage.are_keys_present() {
        Ok(true) => {
            tracing::info!("wallet already exists, asking before replacing it");
            app.pending_setup = Some(PendingWalletSetup::CreateNew);
            let alert = alerts::existing_wallet(app);
            alerts::present(app, alert);
            return Vec::new();
        }
        Ok(false) | Err(WalletStorageError::UninitializedWallet) => {}
        Err(err) => {
            let err = WalletError::from(err);
            tracing::error!(error = %err, "key storage unavailable");
            let alert = alerts::initialization_failed(app, &err);
            alerts::present(app, alert);
            return Vec::new();
        }
    }
    let wallet = StoredWallet {
        seed: env.mnemonic.random_seed(),
        birthday: env.synchronizer.latest_snapshot().latest_height,
        has_user_passed_phrase_backup_test: false,
    };
    let birthday = wallet.birthday;
    if let Err(err) = env.key_storage.import_wallet(wallet) {
        let err = WalletError::from(err);
        tracing::error!(error = %err, "storing new wallet failed");
        let alert = alerts::initialization_failed(app, &err);
        alerts::present(app, alert);
        return Vec::new();
    }
    tracing::info!(birthday, "new wallet stored");
    app.pending_setup = None;
    app.is_restoring_wallet = false;
    vec![Effect::Dispatch(Action::Initialization(
        InitializationAction::InitializeSdk(WalletInitMode::NewWallet),
    ))]
}

/// What: Import a wallet from a recovery phrase.
///
/// Details:
/// - Same phrase as stored: keep the existing wallet.
/// - Different phrase: present `DifferentSeed`; the import stays pending for a wipe.
/// - Nothing stored: store it and start a restore.
fn import_wallet(
    app: &mut AppState,
    seed: SeedPhrase,
    birthday: u64,
    env: &Environment,
) -> Vec<Effect> {
    match env.key_storage.export_wallet() {
        Ok(stored) if stored.seed == seed => {
            tracing::info!("imported phrase matches the stored wallet");
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::RestoreExistingWallet,
            ))]
        }
        Ok(_) => {
            tracing::info!("imported phrase differs from the stored wallet");
            app.pending_setup = Some(PendingWalletSetup::Import { seed, birthday });
            let alert = alerts::different_seed(app);
            alerts::present(app, alert);
            Vec::new()
        }
        Err(WalletStorageError::UninitializedWallet) => {
            let wallet = StoredWallet {
                seed,
                birthday,
                has_user_passed_phrase_backup_test: false,
            };
            if let Err(err) = env.key_storage.import_wallet(wallet) {
                let err = WalletError::from(err);
                tracing::error!(error = %err, "storing imported wallet failed");
                let alert = alerts::initialization_failed(app, &err);
                alerts::present(app, alert);
                return Vec::new();
            }
            tracing::info!(birthday, "imported wallet stored, restoring");
            app.pending_setup = None;
            app.is_restoring_wallet = true;
            vec![Effect::Dispatch(Action::Initialization(
                InitializationAction::InitializeSdk(WalletInitMode::RestoreWallet),
            ))]
        }
        Err(err) => {
            let err = WalletError::from(err);
            tracing::error!(error = %err, "cannot read stored wallet");
            let alert = alerts::cant_load_seed_phrase(app, &err);
            alerts::present(app, alert);
            Vec::new()
        }
    }
}

/// What: Wipe finished: reset, then resume a pending setup or re-probe.
///
/// Output:
/// - `ConfigRefresh` restart plus the pending setup action or a re-probe.
pub fn nuke_succeeded(app: &mut AppState) -> Vec<Effect> {
    let pending = app.pending_setup.take();
    app.reset_after_wipe();
    tracing::info!(pending = pending.is_some(), "wallet wiped");
    let next = match pending {
        Some(PendingWalletSetup::CreateNew) => InitializationAction::CreateNewWallet,
        Some(PendingWalletSetup::Import { seed, birthday }) => {
            InitializationAction::ImportWallet { seed, birthday }
        }
        None => InitializationAction::CheckWalletInitialization,
    };
    vec![
        Effect::Start(EffectId::ConfigRefresh),
        Effect::Dispatch(Action::Initialization(next)),
    ]
}

/// Wipe failed: the pending setup is dropped and the failure shown.
pub fn nuke_failed(app: &mut AppState, err: &WalletError) {
    tracing::error!(error = %err, "wallet wipe failed");
    app.pending_setup = None;
    let alert = alerts::wipe_failed(app, err);
    alerts::present(app, alert);
}
