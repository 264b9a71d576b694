//! Test utilities for common test setup.
//!
//! Shared by unit tests and the integration tests under `tests/`; nothing here
//! touches the filesystem or spawns tasks. Hidden from the documentation.

use std::collections::VecDeque;

use crate::actions::{Action, AppDelegateAction, InitializationAction};
use crate::app::runtime::tasks;
use crate::effects::{Effect, Task};
use crate::env::Environment;
use crate::logic;
use crate::state::AppState;
use crate::state::types::Network;

/// What: Provide a baseline `AppState` for handler tests.
///
/// Inputs: None
///
/// Output: Fresh testnet `AppState` with the embedded English strings
#[must_use]
pub fn new_app() -> AppState {
    AppState::initial(Network::Testnet)
}

/// What: Apply `actions` in order, following dispatched actions depth-first.
///
/// Inputs:
/// - `app`: State to mutate
/// - `actions`: Actions to apply
/// - `env`: Collaborators
///
/// Output:
/// - Every non-dispatch effect produced, in order.
pub fn drive(
    app: &mut AppState,
    actions: impl IntoIterator<Item = Action>,
    env: &Environment,
) -> Vec<Effect> {
    actions
        .into_iter()
        .flat_map(|action| logic::reduce_all(app, action, env))
        .collect()
}

/// What: Run the launch sequence the way the splash effect would.
///
/// Inputs:
/// - `app`: State to mutate
/// - `env`: Collaborators
///
/// Output:
/// - Effects from `DidFinishLaunching` followed by `InitialSetups`.
pub fn launch(app: &mut AppState, env: &Environment) -> Vec<Effect> {
    drive(
        app,
        [
            Action::Initialization(InitializationAction::AppDelegate(
                AppDelegateAction::DidFinishLaunching,
            )),
            Action::Initialization(InitializationAction::InitialSetups),
        ],
        env,
    )
}

/// First `Run` task among `effects`, if any.
#[must_use]
pub fn first_task(effects: &[Effect]) -> Option<&Task> {
    effects.iter().find_map(|effect| match effect {
        Effect::Run(task) => Some(task),
        _ => None,
    })
}

/// What: Run every one-shot task in `effects` inline and feed its result back.
///
/// Inputs:
/// - `app`: State to mutate
/// - `effects`: Effects from a previous reduction
/// - `env`: Collaborators
///
/// Output:
/// - The named-effect commands (`Start`/`Cancel`/`CancelAll`) left over, in order.
///
/// Details:
/// - Tasks run one after another on the caller's task, so the outcome is
///   deterministic; follow-up tasks are settled too.
pub async fn settle(app: &mut AppState, effects: Vec<Effect>, env: &Environment) -> Vec<Effect> {
    let mut pending: VecDeque<Effect> = effects.into();
    let mut rest = Vec::new();
    while let Some(effect) = pending.pop_front() {
        match effect {
            Effect::Run(task) => {
                if let Some(action) = tasks::run(task, env).await {
                    pending.extend(logic::reduce_all(app, action, env));
                }
            }
            other => rest.push(other),
        }
    }
    rest
}
