//! Light wallet server selection.

/// Default servers offered per network.
pub const DEFAULT_SERVERS: &[&str] = &[
    "zec.rocks:443",
    "na.zec.rocks:443",
    "eu.zec.rocks:443",
    "ap.zec.rocks:443",
];

/// Server selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSetupState {
    /// Servers offered.
    pub servers: Vec<String>,
    /// Currently selected server.
    pub selected: String,
}

impl Default for ServerSetupState {
    fn default() -> Self {
        let servers: Vec<String> = DEFAULT_SERVERS.iter().map(ToString::to_string).collect();
        let selected = servers.first().cloned().unwrap_or_default();
        Self { servers, selected }
    }
}

/// Server selection actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerSetupAction {
    /// Pick a server; unknown entries are appended as custom servers.
    SelectServer(String),
    /// Close the server selection sheet.
    Dismiss,
}

/// Reduce a server setup action; returns `true` when the root should close the sheet.
pub fn reduce(state: &mut ServerSetupState, action: ServerSetupAction) -> bool {
    match action {
        ServerSetupAction::SelectServer(server) => {
            let server = server.trim().to_string();
            if server.is_empty() {
                return false;
            }
            if !state.servers.contains(&server) {
                state.servers.push(server.clone());
            }
            tracing::info!(server = %server, "light wallet server selected");
            state.selected = server;
            false
        }
        ServerSetupAction::Dismiss => true,
    }
}
