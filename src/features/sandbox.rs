//! Developer sandbox screen used to prove navigation.

/// Sandbox state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SandboxState {
    /// How many times the sandbox was reset this session.
    pub reset_count: u32,
}

/// Sandbox actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxAction {
    /// Leave the sandbox and return to startup.
    Reset,
}

/// Reduce a sandbox action; returns `true` when the root should route back to startup.
pub fn reduce(state: &mut SandboxState, action: SandboxAction) -> bool {
    match action {
        SandboxAction::Reset => {
            state.reset_count = state.reset_count.saturating_add(1);
            true
        }
    }
}
