use crate::effects::EffectRegistry;
use crate::state::AppState;

/// What: Tear down runtime resources on exit.
///
/// Inputs:
/// - `app`: Final application state
/// - `registry`: Effect registry
///
/// Output: None
///
/// Details:
/// - Cancels every registered effect so no worker outlives the loop.
pub fn cleanup_on_exit(app: &AppState, registry: &EffectRegistry) {
    let cancelled = registry.cancel_all();
    tracing::debug!(
        cancelled,
        destination = ?app.destination(),
        "[Runtime] loop exited, effects cancelled"
    );
}
