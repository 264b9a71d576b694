//! Welcome screen.

/// Welcome screen state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WelcomeState {
    /// Set once the screen has been shown.
    pub appeared: bool,
}

/// Welcome screen actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeAction {
    /// Screen became visible.
    OnAppear,
    /// User chose to create or import a wallet.
    GetStarted,
    /// Hidden gesture opening the startup/debug screen.
    DebugMenuStartup,
}

/// Requests the root handles on behalf of the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeDelegate {
    /// Navigate to onboarding.
    StartOnboarding,
    /// Navigate to the startup/debug screen.
    OpenDebugMenu,
}

/// Reduce a welcome action.
pub fn reduce(state: &mut WelcomeState, action: WelcomeAction) -> Option<WelcomeDelegate> {
    match action {
        WelcomeAction::OnAppear => {
            state.appeared = true;
            None
        }
        WelcomeAction::GetStarted => Some(WelcomeDelegate::StartOnboarding),
        WelcomeAction::DebugMenuStartup => Some(WelcomeDelegate::OpenDebugMenu),
    }
}
