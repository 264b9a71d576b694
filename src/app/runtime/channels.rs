use tokio::sync::{mpsc, watch};

use crate::actions::Action;
use crate::effects::EffectId;
use crate::state::{Alert, AppState, ConfirmationDialog, ViewSnapshot, WalletConfig, WalletStatus};

/// What: Messages consumed by the runtime loop.
///
/// Details:
/// - Every producer (UI driver, effect workers, one-shot tasks) shares one
///   unbounded sender so messages are applied strictly in arrival order.
#[derive(Debug)]
pub enum CoreMsg {
    /// Action from the UI or a one-shot task.
    Action(Action),
    /// Result of a named effect, tagged with the registration it came from.
    Effect {
        /// Effect that produced the action.
        id: EffectId,
        /// Registration generation at spawn time.
        generation: u64,
        /// Produced action.
        action: Action,
    },
    /// Result of a one-shot task, tagged with the registry epoch it was spawned in.
    Task {
        /// Registry epoch at spawn time.
        epoch: u64,
        /// Produced action.
        action: Action,
    },
    /// Stop the loop after cancelling every effect.
    Shutdown,
}

/// What: Sender/receiver pair for `CoreMsg`.
pub struct Channels {
    /// Cloned into workers, tasks and the `Store`.
    pub core_tx: mpsc::UnboundedSender<CoreMsg>,
    /// Owned by the runtime loop.
    pub core_rx: mpsc::UnboundedReceiver<CoreMsg>,
}

impl Channels {
    /// Fresh channel pair.
    pub fn new() -> Self {
        let (core_tx, core_rx) = mpsc::unbounded_channel();
        Self { core_tx, core_rx }
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

/// What: Watch cells published by the runtime after every processed message.
///
/// Details:
/// - The runtime is the only writer; values are replaced whole and only when
///   they changed, so subscribers never see torn or redundant updates.
#[derive(Debug)]
pub struct SharedState {
    /// Wallet status panel value.
    pub wallet_status: watch::Sender<WalletStatus>,
    /// Current feature flags.
    pub wallet_config: watch::Sender<WalletConfig>,
    /// View projection for renderers.
    pub view: watch::Sender<ViewSnapshot>,
    /// Presented alert with its buttons.
    pub alert: watch::Sender<Option<Alert>>,
    /// Presented confirmation dialog with its buttons.
    pub dialog: watch::Sender<Option<ConfirmationDialog>>,
}

/// Replace the watched value only when it differs.
fn publish<T: PartialEq>(tx: &watch::Sender<T>, value: T) {
    tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

impl SharedState {
    /// Cells seeded from `app`.
    pub fn new(app: &AppState) -> Self {
        Self {
            wallet_status: watch::Sender::new(app.wallet_status),
            wallet_config: watch::Sender::new(app.wallet_config.clone()),
            view: watch::Sender::new(app.snapshot()),
            alert: watch::Sender::new(app.alert.clone()),
            dialog: watch::Sender::new(app.confirmation_dialog.clone()),
        }
    }

    /// Publish every cell from `app`.
    pub fn publish(&self, app: &AppState) {
        publish(&self.wallet_status, app.wallet_status);
        publish(&self.wallet_config, app.wallet_config.clone());
        publish(&self.view, app.snapshot());
        publish(&self.alert, app.alert.clone());
        publish(&self.dialog, app.confirmation_dialog.clone());
    }
}
