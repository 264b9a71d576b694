//! Named long-running effects.
//!
//! Each worker is spawned through the registry and reports through
//! `CoreMsg::Effect` so the loop can drop results from cancelled registrations.

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval, sleep};

use crate::actions::{Action, InitializationAction};
use crate::effects::{EffectId, EffectRegistry};
use crate::env::Environment;
use crate::state::types::BackgroundTaskKind;

use super::channels::CoreMsg;

/// What: Sender wrapper tagging every action with its effect registration.
#[derive(Clone)]
struct EffectSender {
    id: EffectId,
    generation: u64,
    tx: mpsc::UnboundedSender<CoreMsg>,
}

impl EffectSender {
    /// Forward `action`; `false` once the loop is gone.
    fn send(&self, action: Action) -> bool {
        self.tx
            .send(CoreMsg::Effect {
                id: self.id,
                generation: self.generation,
                action,
            })
            .is_ok()
    }
}

/// What: Start the named effect unless it is already running.
///
/// Inputs:
/// - `id`: Effect to start
/// - `registry`: Effect registry
/// - `env`: Collaborators
/// - `core_tx`: Runtime loop sender
///
/// Output:
/// - `true` when a new task was spawned.
pub fn start(
    id: EffectId,
    registry: &EffectRegistry,
    env: &Environment,
    core_tx: &mpsc::UnboundedSender<CoreMsg>,
) -> bool {
    let env = env.clone();
    let core_tx = core_tx.clone();
    registry.start(id, move |generation| {
        let out = EffectSender {
            id,
            generation,
            tx: core_tx,
        };
        run(id, env, out)
    })
}

/// Worker body for `id`.
async fn run(id: EffectId, env: Environment, out: EffectSender) {
    match id {
        EffectId::SyncStream => sync_stream(&env, &out).await,
        EffectId::StatusPoll => status_poll(&env, &out).await,
        EffectId::BatteryStream => battery_stream(&env, &out).await,
        EffectId::BackgroundTask => background_task(&env).await,
        EffectId::ConfigRefresh => config_refresh(&env, &out).await,
        EffectId::DidFinishLaunching => {
            sleep(env.timing.splash_delay).await;
            out.send(Action::Initialization(InitializationAction::InitialSetups));
        }
    }
}

/// Forward synchronizer snapshots, starting with the current one.
async fn sync_stream(env: &Environment, out: &EffectSender) {
    let mut rx = env.synchronizer.state_stream();
    let first = *rx.borrow_and_update();
    if !out.send(Action::SynchronizerStateChanged(first)) {
        return;
    }
    while rx.changed().await.is_ok() {
        let snapshot = *rx.borrow_and_update();
        if !out.send(Action::SynchronizerStateChanged(snapshot)) {
            return;
        }
    }
    tracing::debug!("synchronizer stream closed");
}

/// Re-check disk space on every interval tick after the first.
async fn status_poll(env: &Environment, out: &EffectSender) {
    let mut ticker = interval(env.timing.status_poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if !out.send(Action::Initialization(InitializationAction::CheckDiskSpace)) {
            return;
        }
    }
}

/// Forward battery changes, starting with the current state.
async fn battery_stream(env: &Environment, out: &EffectSender) {
    let mut rx = env.battery.subscribe();
    let first = *rx.borrow_and_update();
    if !out.send(Action::BatteryStateChanged(first)) {
        return;
    }
    while rx.changed().await.is_ok() {
        let state = *rx.borrow_and_update();
        if !out.send(Action::BatteryStateChanged(state)) {
            return;
        }
    }
}

/// Schedule both OS background task kinds. Failures are logged only.
async fn background_task(env: &Environment) {
    for kind in [BackgroundTaskKind::Sync, BackgroundTaskKind::Scheduler] {
        if let Err(err) = env.background_tasks.schedule(kind).await {
            tracing::warn!(?kind, error = %err, "background task scheduling failed");
        }
    }
}

/// Load the wallet config once.
async fn config_refresh(env: &Environment, out: &EffectSender) {
    match env.wallet_config.load().await {
        Ok(config) => {
            out.send(Action::WalletConfigLoaded(config));
        }
        Err(err) => tracing::warn!(error = %err, "wallet config load failed"),
    }
}
