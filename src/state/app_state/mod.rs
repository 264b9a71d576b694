//! Central `AppState` container owned by the runtime loop.

use crate::features::debug::DebugState;
use crate::features::export_logs::ExportLogsState;
use crate::features::not_enough_free_space::NotEnoughFreeSpaceState;
use crate::features::onboarding::OnboardingState;
use crate::features::phrase_display::PhraseDisplayState;
use crate::features::phrase_validation::PhraseValidationState;
use crate::features::sandbox::SandboxState;
use crate::features::server_setup::ServerSetupState;
use crate::features::tabs::TabsState;
use crate::features::welcome::WelcomeState;
use crate::i18n::TranslationMap;
use crate::state::modal::{Alert, AlertKind, ConfirmationDialog, DialogKind};
use crate::state::types::{
    AppStartState, ConnectionState, Destination, DestinationState, InitializationState, Network,
    PendingWalletSetup, WalletConfig, WalletStatus,
};

/// Root application state.
///
/// Mutated only by `crate::logic::reducer::reduce` on the runtime loop. Shared
/// values (`wallet_status`, `wallet_config`) are mirrored to observers after
/// every reduction; nothing outside the loop writes them.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppState {
    /// Chain selected at startup; never changes.
    pub network: Network,
    /// Latest probe result.
    pub initialization_state: InitializationState,
    /// How this process came to be running. Set once.
    pub start_state: AppStartState,
    /// A user-triggered restore is syncing.
    pub is_restoring_wallet: bool,
    /// A disconnect happened while restoring; consumed on reconnect.
    pub was_restoring_when_disconnected: bool,
    /// Current screen, back slot and low-space lock.
    pub destination_state: DestinationState,
    /// Presented alert.
    pub alert: Option<Alert>,
    /// Presented confirmation dialog.
    pub confirmation_dialog: Option<ConfirmationDialog>,
    /// Feature flags, replaced wholesale.
    pub wallet_config: WalletConfig,
    /// Status last derived from a synchronizer snapshot.
    pub wallet_status: WalletStatus,
    /// Connection reported by the last snapshot.
    pub last_connection: ConnectionState,
    /// Splash finished.
    pub splash_appeared: bool,
    /// Server selection sheet shown.
    pub server_setup_binding: bool,
    /// Wallet creation or import waiting for a wipe to finish.
    pub pending_setup: Option<PendingWalletSetup>,
    /// Active locale code.
    pub locale: String,
    /// Translations for the active locale.
    pub translations: TranslationMap,
    /// English translations used when a key is missing.
    pub translations_fallback: TranslationMap,

    /// Welcome screen.
    pub welcome: WelcomeState,
    /// Onboarding.
    pub onboarding: OnboardingState,
    /// Recovery phrase display.
    pub phrase_display: PhraseDisplayState,
    /// Recovery phrase backup test.
    pub phrase_validation: PhraseValidationState,
    /// Log export.
    pub export_logs: ExportLogsState,
    /// Startup/debug screen.
    pub debug: DebugState,
    /// Developer sandbox.
    pub sandbox: SandboxState,
    /// Home tabs.
    pub tabs: TabsState,
    /// Server selection.
    pub server_setup: ServerSetupState,
    /// Low disk space screen.
    pub not_enough_free_space: NotEnoughFreeSpaceState,
}

impl AppState {
    /// What: Build the explicit initial state for `network` with the embedded English strings.
    ///
    /// Inputs:
    /// - `network`: Chain selected at startup
    ///
    /// Output:
    /// - `AppState` on `Startup`, nothing probed, no alert.
    #[must_use]
    pub fn initial(network: Network) -> Self {
        let fallback = crate::i18n::embedded_fallback();
        Self::with_translations(network, "en-US", fallback.clone(), fallback)
    }

    /// What: Build the initial state with explicit translation maps.
    ///
    /// Inputs:
    /// - `network`: Chain selected at startup
    /// - `locale`: Active locale code
    /// - `translations`: Strings for `locale`
    /// - `translations_fallback`: English strings
    ///
    /// Output:
    /// - Initial `AppState`.
    #[must_use]
    pub fn with_translations(
        network: Network,
        locale: &str,
        translations: TranslationMap,
        translations_fallback: TranslationMap,
    ) -> Self {
        Self {
            network,
            initialization_state: InitializationState::Uninitialized,
            start_state: AppStartState::Unknown,
            is_restoring_wallet: false,
            was_restoring_when_disconnected: false,
            destination_state: DestinationState::default(),
            alert: None,
            confirmation_dialog: None,
            wallet_config: WalletConfig::initial(),
            wallet_status: WalletStatus::None,
            last_connection: ConnectionState::Connected,
            splash_appeared: false,
            server_setup_binding: false,
            pending_setup: None,
            locale: locale.to_string(),
            translations,
            translations_fallback,
            welcome: WelcomeState::default(),
            onboarding: OnboardingState::default(),
            phrase_display: PhraseDisplayState::default(),
            phrase_validation: PhraseValidationState::default(),
            export_logs: ExportLogsState::default(),
            debug: DebugState::default(),
            sandbox: SandboxState::default(),
            tabs: TabsState::default(),
            server_setup: ServerSetupState::default(),
            not_enough_free_space: NotEnoughFreeSpaceState::default(),
        }
    }

    /// What: Return to the initial state after a wallet wipe.
    ///
    /// Details:
    /// - Keeps the network, wallet config, translations, start state and splash flag.
    /// - Anything tied to the wiped wallet (restore flags, sub-states, modals) is dropped.
    pub fn reset_after_wipe(&mut self) {
        let mut fresh = Self::with_translations(
            self.network,
            &self.locale,
            std::mem::take(&mut self.translations),
            std::mem::take(&mut self.translations_fallback),
        );
        fresh.wallet_config = std::mem::take(&mut self.wallet_config);
        fresh.start_state = self.start_state;
        fresh.splash_appeared = self.splash_appeared;
        *self = fresh;
    }

    /// Screen currently shown.
    #[must_use]
    pub const fn destination(&self) -> Destination {
        self.destination_state.destination
    }

    /// Observer-facing projection of this state.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            destination: self.destination_state.destination,
            previous_destination: self.destination_state.previous_destination,
            low_space: self.destination_state.low_space,
            initialization_state: self.initialization_state,
            start_state: self.start_state,
            wallet_status: self.wallet_status,
            is_restoring_wallet: self.is_restoring_wallet,
            alert: self.alert.as_ref().map(|a| a.kind),
            alert_title: self.alert.as_ref().map(|a| a.title.clone()),
            dialog: self.confirmation_dialog.as_ref().map(|d| d.kind),
            splash_appeared: self.splash_appeared,
            server_setup_shown: self.server_setup_binding,
        }
    }
}

/// What a UI (or the headless driver) renders: no secrets, cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ViewSnapshot {
    /// Current screen.
    pub destination: Destination,
    /// Back slot.
    pub previous_destination: Option<Destination>,
    /// Low-space lock active.
    pub low_space: bool,
    /// Latest probe result.
    pub initialization_state: InitializationState,
    /// Start state.
    pub start_state: AppStartState,
    /// Wallet status panel value.
    pub wallet_status: WalletStatus,
    /// Restore running.
    pub is_restoring_wallet: bool,
    /// Presented alert kind.
    pub alert: Option<AlertKind>,
    /// Presented alert title.
    pub alert_title: Option<String>,
    /// Presented dialog kind.
    pub dialog: Option<DialogKind>,
    /// Splash finished.
    pub splash_appeared: bool,
    /// Server selection sheet shown.
    pub server_setup_shown: bool,
}
