//! Recovery phrase backup test.
//!
//! The user is asked for a fixed subset of the phrase's words. Passing the test
//! is reported to the root, which persists the mark in key storage.

use crate::state::types::SeedPhrase;

/// Positions asked for, spread across a 24-word phrase (shorter phrases use the
/// positions that exist).
const CHALLENGE_POSITIONS: [usize; 4] = [2, 8, 14, 20];

/// Phrase validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseValidationState {
    /// Expected `(position, word)` pairs.
    challenge: Vec<(usize, String)>,
    /// Whether the user passed the test.
    validated: bool,
    /// Failed attempts so far.
    pub failed_attempts: u32,
}

impl PhraseValidationState {
    /// Whether the test was passed.
    #[must_use]
    pub const fn is_validated(&self) -> bool {
        self.validated
    }

    /// Word positions the user is asked for (one-based, as shown on screen).
    #[must_use]
    pub fn asked_positions(&self) -> Vec<usize> {
        self.challenge.iter().map(|(pos, _)| pos + 1).collect()
    }
}

/// Phrase validation actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseValidationAction {
    /// Prepare a challenge from the stored phrase.
    Prepare(SeedPhrase),
    /// User submitted the requested words in order.
    Submit(Vec<String>),
    /// Start over after a failure.
    Reset,
}

/// Requests the root handles on behalf of the backup test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseValidationDelegate {
    /// Test passed.
    Validated,
    /// Test failed.
    Failed,
}

/// What: Reduce a phrase validation action.
///
/// Inputs:
/// - `state`: Validation state
/// - `action`: Action to apply
///
/// Output:
/// - `Validated` or `Failed` after a submission, else `None`.
///
/// Details:
/// - Words compare case-insensitively after trimming.
/// - A submission before any challenge was prepared counts as a failure.
pub fn reduce(
    state: &mut PhraseValidationState,
    action: PhraseValidationAction,
) -> Option<PhraseValidationDelegate> {
    match action {
        PhraseValidationAction::Prepare(phrase) => {
            let words = phrase.words();
            state.challenge = CHALLENGE_POSITIONS
                .iter()
                .filter_map(|&pos| words.get(pos).map(|w| (pos, (*w).to_string())))
                .collect();
            state.validated = false;
            None
        }
        PhraseValidationAction::Submit(answers) => {
            let matches = !state.challenge.is_empty()
                && answers.len() == state.challenge.len()
                && state
                    .challenge
                    .iter()
                    .zip(answers.iter())
                    .all(|((_, expected), given)| expected.eq_ignore_ascii_case(given.trim()));
            if matches {
                state.validated = true;
                state.challenge.clear();
                Some(PhraseValidationDelegate::Validated)
            } else {
                state.failed_attempts = state.failed_attempts.saturating_add(1);
                Some(PhraseValidationDelegate::Failed)
            }
        }
        PhraseValidationAction::Reset => {
            state.validated = false;
            state.failed_attempts = 0;
            None
        }
    }
}
