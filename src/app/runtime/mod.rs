//! The serialized runtime loop and its handle.
//!
//! One task owns `AppState`. Actions from the UI driver, named effects and
//! one-shot tasks arrive on a single channel and are applied in order; each
//! reduction's follow-up actions run to completion before the next message.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::actions::Action;
use crate::effects::{Effect, EffectId, EffectRegistry};
use crate::env::Environment;
use crate::logic;
use crate::state::{Alert, AppState, ConfirmationDialog, ViewSnapshot, WalletConfig, WalletStatus};

pub mod channels;
mod cleanup;
pub mod tasks;
pub mod workers;

pub use channels::{Channels, CoreMsg, SharedState};
use cleanup::cleanup_on_exit;

/// Owner of the root state. Consumed by [`Runtime::run`].
pub struct Runtime {
    app: AppState,
    env: Environment,
    registry: EffectRegistry,
    channels: Channels,
    shared: Arc<SharedState>,
}

/// Cloneable handle for feeding actions in and reading published state.
#[derive(Debug, Clone)]
pub struct Store {
    core_tx: mpsc::UnboundedSender<CoreMsg>,
    shared: Arc<SharedState>,
    registry: EffectRegistry,
}

impl Runtime {
    /// What: Build a runtime around `app` and its handle.
    ///
    /// Inputs:
    /// - `app`: Initial root state
    /// - `env`: Collaborators
    ///
    /// Output:
    /// - The runtime (to be driven by `run`) and a `Store` handle.
    pub fn new(app: AppState, env: Environment) -> (Self, Store) {
        let channels = Channels::new();
        let shared = Arc::new(SharedState::new(&app));
        let registry = EffectRegistry::new();
        let store = Store {
            core_tx: channels.core_tx.clone(),
            shared: Arc::clone(&shared),
            registry: registry.clone(),
        };
        let runtime = Self {
            app,
            env,
            registry,
            channels,
            shared,
        };
        (runtime, store)
    }

    /// What: Process messages until `Shutdown` or until every sender is gone.
    ///
    /// Output:
    /// - Final root state.
    ///
    /// Details:
    /// - Effect results whose registration was cancelled or replaced are dropped.
    /// - One-shot task results spawned before the latest cancel-all are dropped.
    /// - Every effect is cancelled before returning.
    pub async fn run(mut self) -> AppState {
        tracing::info!(network = self.app.network.as_str(), "[Runtime] loop started");
        while let Some(msg) = self.channels.core_rx.recv().await {
            match msg {
                CoreMsg::Action(action) => self.handle(action),
                CoreMsg::Effect {
                    id,
                    generation,
                    action,
                } => {
                    if self.registry.is_current(id, generation) {
                        self.handle(action);
                    } else {
                        tracing::debug!(
                            effect = ?id,
                            generation,
                            action = action.tag(),
                            "[Runtime] dropping stale effect result"
                        );
                    }
                }
                CoreMsg::Task { epoch, action } => {
                    if self.registry.is_current_epoch(epoch) {
                        self.handle(action);
                    } else {
                        tracing::debug!(
                            epoch,
                            action = action.tag(),
                            "[Runtime] dropping task result from before cancel-all"
                        );
                    }
                }
                CoreMsg::Shutdown => break,
            }
        }
        cleanup_on_exit(&self.app, &self.registry);
        self.shared.publish(&self.app);
        self.app
    }

    /// Reduce one action with its follow-ups, execute the effects, publish.
    fn handle(&mut self, action: Action) {
        tracing::debug!(action = action.tag(), "[Runtime] action");
        for effect in logic::reduce_all(&mut self.app, action, &self.env) {
            self.execute(effect);
        }
        self.shared.publish(&self.app);
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::Start(id) => {
                workers::start(id, &self.registry, &self.env, &self.channels.core_tx);
            }
            Effect::Cancel(id) => {
                self.registry.cancel(id);
            }
            Effect::CancelAll => {
                let cancelled = self.registry.cancel_all();
                tracing::info!(cancelled, "[Runtime] all effects cancelled");
            }
            Effect::Run(task) => {
                tasks::spawn(task, self.registry.epoch(), &self.env, &self.channels.core_tx);
            }
            Effect::Dispatch(action) => {
                // reduce_all never leaves a Dispatch behind; handled for completeness.
                let _ = self.channels.core_tx.send(CoreMsg::Action(action));
            }
        }
    }
}

impl Store {
    /// Queue `action`. `false` once the runtime has stopped.
    pub fn send(&self, action: Action) -> bool {
        self.core_tx.send(CoreMsg::Action(action)).is_ok()
    }

    /// Ask the runtime to cancel every effect and stop.
    pub fn shutdown(&self) {
        let _ = self.core_tx.send(CoreMsg::Shutdown);
    }

    /// Latest published view.
    #[must_use]
    pub fn view(&self) -> ViewSnapshot {
        self.shared.view.borrow().clone()
    }

    /// Subscribe to view changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.shared.view.subscribe()
    }

    /// What: Wait until the published view satisfies `pred`.
    ///
    /// Output:
    /// - The matching view, or `None` if the runtime stopped first.
    pub async fn wait_for(&self, pred: impl FnMut(&ViewSnapshot) -> bool) -> Option<ViewSnapshot> {
        let mut rx = self.subscribe();
        rx.wait_for(pred).await.ok().map(|view| view.clone())
    }

    /// Subscribe to the wallet status cell.
    #[must_use]
    pub fn wallet_status(&self) -> watch::Receiver<WalletStatus> {
        self.shared.wallet_status.subscribe()
    }

    /// Subscribe to the wallet config cell.
    #[must_use]
    pub fn wallet_config(&self) -> watch::Receiver<WalletConfig> {
        self.shared.wallet_config.subscribe()
    }

    /// Alert currently presented.
    #[must_use]
    pub fn alert(&self) -> Option<Alert> {
        self.shared.alert.borrow().clone()
    }

    /// Confirmation dialog currently presented.
    #[must_use]
    pub fn dialog(&self) -> Option<ConfirmationDialog> {
        self.shared.dialog.borrow().clone()
    }

    /// Tap button `index` of the presented alert. `false` if there is no such button.
    pub fn press_alert(&self, index: usize) -> bool {
        self.alert()
            .and_then(|alert| alert.action_for(index))
            .is_some_and(|action| self.send(action))
    }

    /// Tap button `index` of the presented dialog. `false` if there is no such button.
    pub fn press_dialog(&self, index: usize) -> bool {
        self.dialog()
            .and_then(|dialog| dialog.action_for(index))
            .is_some_and(|action| self.send(action))
    }

    /// Effects currently registered.
    #[must_use]
    pub fn active_effects(&self) -> BTreeSet<EffectId> {
        self.registry.active()
    }
}
