//! Recovery phrase display.

use crate::state::types::SeedPhrase;

/// Phrase display state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseDisplayState {
    /// Phrase loaded from key storage.
    pub phrase: Option<SeedPhrase>,
    /// Wallet birthday shown under the phrase.
    pub birthday: Option<u64>,
    /// Whether a back button is offered (reached from settings, not onboarding).
    pub show_back_button: bool,
}

/// Phrase display actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseDisplayAction {
    /// Root loaded the phrase from storage.
    PhraseLoaded {
        /// Phrase.
        phrase: SeedPhrase,
        /// Birthday height.
        birthday: u64,
    },
    /// User confirmed they wrote the phrase down.
    Finished,
    /// User pressed back.
    Back,
}

/// Requests the root handles on behalf of the phrase display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseDisplayDelegate {
    /// Move on (backup test or home).
    Finished,
    /// Go back one level.
    Back,
}

/// Reduce a phrase display action. The phrase is dropped from memory on leave.
pub fn reduce(
    state: &mut PhraseDisplayState,
    action: PhraseDisplayAction,
) -> Option<PhraseDisplayDelegate> {
    match action {
        PhraseDisplayAction::PhraseLoaded { phrase, birthday } => {
            state.phrase = Some(phrase);
            state.birthday = Some(birthday);
            None
        }
        PhraseDisplayAction::Finished => {
            state.phrase = None;
            Some(PhraseDisplayDelegate::Finished)
        }
        PhraseDisplayAction::Back => {
            state.phrase = None;
            Some(PhraseDisplayDelegate::Back)
        }
    }
}
