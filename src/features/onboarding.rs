//! Onboarding: create a new wallet or import one from a recovery phrase.

use crate::state::types::SeedPhrase;

/// Minimum and maximum accepted recovery phrase lengths.
const PHRASE_WORD_COUNTS: [usize; 2] = [12, 24];

/// Onboarding step currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnboardingStep {
    /// Create or import choice.
    #[default]
    Intro,
    /// Seed phrase import form.
    Import,
}

/// Onboarding state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingState {
    /// Visible step.
    pub step: OnboardingStep,
    /// Last validation problem with an entered phrase.
    pub import_error: Option<String>,
}

/// Onboarding actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingAction {
    /// Show the import form.
    ShowImport,
    /// Back to the intro step.
    Back,
    /// Create a new wallet.
    CreateNewWallet,
    /// Import a wallet from its phrase.
    ImportWallet {
        /// Entered phrase.
        seed: SeedPhrase,
        /// Entered birthday height.
        birthday: u64,
    },
}

/// Requests the root handles on behalf of onboarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingDelegate {
    /// Start new wallet creation.
    CreateNewWallet,
    /// Start an import with a phrase that passed local validation.
    ImportWallet {
        /// Seed to import.
        seed: SeedPhrase,
        /// Birthday height.
        birthday: u64,
    },
}

/// What: Reduce an onboarding action.
///
/// Inputs:
/// - `state`: Onboarding state
/// - `action`: Action to apply
///
/// Output:
/// - A delegate for the root when a wallet flow must start, else `None`.
///
/// Details:
/// - Imports are checked for word count locally; invalid phrases never reach the root.
pub fn reduce(state: &mut OnboardingState, action: OnboardingAction) -> Option<OnboardingDelegate> {
    match action {
        OnboardingAction::ShowImport => {
            state.step = OnboardingStep::Import;
            state.import_error = None;
            None
        }
        OnboardingAction::Back => {
            state.step = OnboardingStep::Intro;
            state.import_error = None;
            None
        }
        OnboardingAction::CreateNewWallet => Some(OnboardingDelegate::CreateNewWallet),
        OnboardingAction::ImportWallet { seed, birthday } => {
            let count = seed.words().len();
            if PHRASE_WORD_COUNTS.contains(&count) {
                state.import_error = None;
                Some(OnboardingDelegate::ImportWallet { seed, birthday })
            } else {
                tracing::debug!(words = count, "rejected recovery phrase with wrong length");
                state.import_error = Some(format!(
                    "expected {} or {} words, got {count}",
                    PHRASE_WORD_COUNTS[0], PHRASE_WORD_COUNTS[1]
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Phrases with the wrong word count stay in onboarding.
    ///
    /// Inputs:
    /// - Import with 3 words, then with 12 words.
    ///
    /// Output:
    /// - First sets `import_error` and returns no delegate; second delegates the import.
    fn import_validates_word_count() {
        let mut state = OnboardingState::default();
        let short = OnboardingAction::ImportWallet {
            seed: SeedPhrase::new("one two three"),
            birthday: 1,
        };
        assert_eq!(reduce(&mut state, short), None);
        assert!(state.import_error.is_some());

        let twelve = SeedPhrase::new(&["word"; 12].join(" "));
        let delegate = reduce(
            &mut state,
            OnboardingAction::ImportWallet {
                seed: twelve.clone(),
                birthday: 419_200,
            },
        );
        assert_eq!(
            delegate,
            Some(OnboardingDelegate::ImportWallet {
                seed: twelve,
                birthday: 419_200
            })
        );
        assert!(state.import_error.is_none());
    }
}
