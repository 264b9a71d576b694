//! The single action enumeration driving the root state machine.
//!
//! Every external event and every asynchronous result enters the system as one
//! of these values and is applied in FIFO order by the runtime loop.

use crate::errors::WalletError;
use crate::features::debug::DebugAction;
use crate::features::export_logs::ExportLogsAction;
use crate::features::not_enough_free_space::NotEnoughFreeSpaceAction;
use crate::features::onboarding::OnboardingAction;
use crate::features::phrase_display::PhraseDisplayAction;
use crate::features::phrase_validation::PhraseValidationAction;
use crate::features::sandbox::SandboxAction;
use crate::features::server_setup::ServerSetupAction;
use crate::features::tabs::TabsAction;
use crate::features::welcome::WelcomeAction;
use crate::state::types::{
    BatteryState, Destination, InitializationState, SeedPhrase, SynchronizerSnapshot,
    WalletConfig, WalletInitMode,
};

/// Root action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Alert slot interaction.
    Alert(AlertAction),
    /// OS battery state changed.
    BatteryStateChanged(BatteryState),
    /// Cancel every registered effect (teardown/reset).
    CancelAllRunningEffects,
    /// Confirmation dialog slot interaction.
    ConfirmationDialog(DialogAction),
    /// Debug screen.
    Debug(DebugAction),
    /// Navigation.
    Destination(DestinationAction),
    /// Log export.
    ExportLogs(ExportLogsAction),
    /// Launch, probing and wallet setup flows.
    Initialization(InitializationAction),
    /// Low disk space screen.
    NotEnoughFreeSpace(NotEnoughFreeSpaceAction),
    /// Wallet wipe failed.
    NukeWalletFailed(WalletError),
    /// Wallet wipe finished.
    NukeWalletSucceeded,
    /// Onboarding screen.
    Onboarding(OnboardingAction),
    /// Recovery phrase display.
    PhraseDisplay(PhraseDisplayAction),
    /// Recovery phrase backup test.
    PhraseValidation(PhraseValidationAction),
    /// Developer sandbox.
    Sandbox(SandboxAction),
    /// Server selection sheet.
    ServerSetup(ServerSetupAction),
    /// Server selection sheet shown/hidden by the UI.
    ServerSetupBindingUpdated(bool),
    /// Splash animation completed.
    SplashFinished,
    /// UI asks to remove the splash.
    SplashRemovalRequested,
    /// Redacted synchronizer snapshot received.
    SynchronizerStateChanged(SynchronizerSnapshot),
    /// Home tabs.
    Tabs(TabsAction),
    /// Config updated through the debug screen.
    UpdateStateAfterConfigUpdate(WalletConfig),
    /// Config provider delivered a reload.
    WalletConfigLoaded(WalletConfig),
    /// Welcome screen.
    Welcome(WelcomeAction),
}

/// Alert slot actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertAction {
    /// A button with a follow-up was chosen; the slot clears and the action is dispatched.
    Presented(Box<Action>),
    /// The alert was dismissed.
    Dismiss,
}

/// Choices offered by confirmation dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    /// Rewind to the last checkpoint.
    QuickRescan,
    /// Rewind to the wallet birthday.
    FullRescan,
    /// Leave the backup test for the given destination.
    LeavePhraseValidation(Destination),
}

/// Confirmation dialog slot actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// A choice was made.
    Presented(DialogChoice),
    /// The dialog was cancelled.
    Dismiss,
}

/// Navigation actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationAction {
    /// Explicit navigation (debug menu, flow completion).
    GoTo(Destination),
    /// One-level back navigation.
    Back,
    /// Incoming URL to resolve and honour if valid.
    Deeplink(String),
    /// Open server selection.
    ServerSwitch,
}

/// Process lifecycle notifications delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDelegateAction {
    /// Process finished launching.
    DidFinishLaunching,
    /// App returns to the foreground.
    WillEnterForeground,
    /// App moved to the background.
    DidEnterBackground,
}

/// Launch, probing and wallet setup flows.
#[derive(Debug, Clone, PartialEq)]
pub enum InitializationAction {
    /// Platform lifecycle notification.
    AppDelegate(AppDelegateAction),
    /// One-time setup after the splash delay.
    InitialSetups,
    /// Request a disk-space check.
    CheckDiskSpace,
    /// Disk-space check result.
    DiskSpaceChecked {
        /// Whether enough space is free.
        enough: bool,
    },
    /// Probe keys and database files.
    CheckWalletInitialization,
    /// Route according to a probe result.
    RespondToWalletInitializationState {
        /// Probe result.
        state: InitializationState,
        /// Storage failure behind a `Failed` result.
        error: Option<WalletError>,
    },
    /// Load the stored wallet and start the synchronizer.
    InitializeSdk(WalletInitMode),
    /// Synchronizer started.
    SynchronizerStarted(WalletInitMode),
    /// Synchronizer failed to start.
    SynchronizerStartFailed(WalletError),
    /// Create and store a new wallet.
    CreateNewWallet,
    /// Import a wallet from a recovery phrase.
    ImportWallet {
        /// Phrase.
        seed: SeedPhrase,
        /// Birthday height.
        birthday: u64,
    },
    /// Keep the wallet already on the device.
    RestoreExistingWallet,
    /// Ask for wipe confirmation.
    NukeWalletRequest,
    /// Wipe the wallet.
    NukeWallet,
    /// Backup test passed; persist the mark.
    BackupPhraseValidated,
}

impl Action {
    /// Log-safe action tag (never includes seed phrases or URLs).
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Alert(AlertAction::Presented(_)) => "Alert.Presented",
            Self::Alert(AlertAction::Dismiss) => "Alert.Dismiss",
            Self::BatteryStateChanged(_) => "BatteryStateChanged",
            Self::CancelAllRunningEffects => "CancelAllRunningEffects",
            Self::ConfirmationDialog(_) => "ConfirmationDialog",
            Self::Debug(_) => "Debug",
            Self::Destination(DestinationAction::GoTo(_)) => "Destination.GoTo",
            Self::Destination(DestinationAction::Back) => "Destination.Back",
            Self::Destination(DestinationAction::Deeplink(_)) => "Destination.Deeplink",
            Self::Destination(DestinationAction::ServerSwitch) => "Destination.ServerSwitch",
            Self::ExportLogs(_) => "ExportLogs",
            Self::Initialization(action) => action.tag(),
            Self::NotEnoughFreeSpace(_) => "NotEnoughFreeSpace",
            Self::NukeWalletFailed(_) => "NukeWalletFailed",
            Self::NukeWalletSucceeded => "NukeWalletSucceeded",
            Self::Onboarding(_) => "Onboarding",
            Self::PhraseDisplay(_) => "PhraseDisplay",
            Self::PhraseValidation(_) => "PhraseValidation",
            Self::Sandbox(_) => "Sandbox",
            Self::ServerSetup(_) => "ServerSetup",
            Self::ServerSetupBindingUpdated(_) => "ServerSetupBindingUpdated",
            Self::SplashFinished => "SplashFinished",
            Self::SplashRemovalRequested => "SplashRemovalRequested",
            Self::SynchronizerStateChanged(_) => "SynchronizerStateChanged",
            Self::Tabs(_) => "Tabs",
            Self::UpdateStateAfterConfigUpdate(_) => "UpdateStateAfterConfigUpdate",
            Self::WalletConfigLoaded(_) => "WalletConfigLoaded",
            Self::Welcome(_) => "Welcome",
        }
    }
}

impl InitializationAction {
    /// Log-safe tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::AppDelegate(AppDelegateAction::DidFinishLaunching) => {
                "Initialization.DidFinishLaunching"
            }
            Self::AppDelegate(AppDelegateAction::WillEnterForeground) => {
                "Initialization.WillEnterForeground"
            }
            Self::AppDelegate(AppDelegateAction::DidEnterBackground) => {
                "Initialization.DidEnterBackground"
            }
            Self::InitialSetups => "Initialization.InitialSetups",
            Self::CheckDiskSpace => "Initialization.CheckDiskSpace",
            Self::DiskSpaceChecked { .. } => "Initialization.DiskSpaceChecked",
            Self::CheckWalletInitialization => "Initialization.CheckWalletInitialization",
            Self::RespondToWalletInitializationState { .. } => {
                "Initialization.RespondToWalletInitializationState"
            }
            Self::InitializeSdk(_) => "Initialization.InitializeSdk",
            Self::SynchronizerStarted(_) => "Initialization.SynchronizerStarted",
            Self::SynchronizerStartFailed(_) => "Initialization.SynchronizerStartFailed",
            Self::CreateNewWallet => "Initialization.CreateNewWallet",
            Self::ImportWallet { .. } => "Initialization.ImportWallet",
            Self::RestoreExistingWallet => "Initialization.RestoreExistingWallet",
            Self::NukeWalletRequest => "Initialization.NukeWalletRequest",
            Self::NukeWallet => "Initialization.NukeWallet",
            Self::BackupPhraseValidated => "Initialization.BackupPhraseValidated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Tags never leak the phrase carried by an import.
    ///
    /// Inputs:
    /// - `ImportWallet` with a recognisable phrase.
    ///
    /// Output:
    /// - Tag is the static variant name.
    fn tag_is_log_safe() {
        let action = Action::Initialization(InitializationAction::ImportWallet {
            seed: SeedPhrase::new("secret words here"),
            birthday: 1,
        });
        assert_eq!(action.tag(), "Initialization.ImportWallet");
        assert!(!action.tag().contains("secret"));
    }
}
