//! Low disk space screen, shown as a flagged variant of the startup destination.

/// Low disk space state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEnoughFreeSpaceState {
    /// Whether the low-space screen is active.
    pub is_active: bool,
    /// How many failed checks were seen this session.
    pub failed_checks: u32,
}

/// Low disk space actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotEnoughFreeSpaceAction {
    /// A disk-space check reported insufficient space.
    Activate,
    /// Space became available again.
    Deactivate,
    /// User asked to check again.
    Retry,
}

/// Reduce a low-space action; returns `true` when the root should re-run the disk check.
pub fn reduce(state: &mut NotEnoughFreeSpaceState, action: NotEnoughFreeSpaceAction) -> bool {
    match action {
        NotEnoughFreeSpaceAction::Activate => {
            state.is_active = true;
            state.failed_checks = state.failed_checks.saturating_add(1);
            false
        }
        NotEnoughFreeSpaceAction::Deactivate => {
            state.is_active = false;
            false
        }
        NotEnoughFreeSpaceAction::Retry => true,
    }
}
