//! One-shot tasks. Each reports back with at most one plain action.

use tokio::sync::mpsc;

use crate::actions::{Action, InitializationAction};
use crate::effects::Task;
use crate::env::Environment;
use crate::errors::WalletError;
use crate::features::debug::DebugAction;
use crate::features::export_logs::ExportLogsAction;
use crate::state::types::{Network, RewindPolicy};

use super::channels::CoreMsg;

/// What: Spawn `task` on the runtime.
///
/// Inputs:
/// - `task`: Work to run
/// - `epoch`: Registry epoch at spawn time
/// - `env`: Collaborators
/// - `core_tx`: Runtime loop sender for the result
///
/// Details:
/// - Results are sent as `CoreMsg::Task` so the loop can drop those that outlived
///   a `cancel_all`; a closed loop silently drops them.
pub fn spawn(
    task: Task,
    epoch: u64,
    env: &Environment,
    core_tx: &mpsc::UnboundedSender<CoreMsg>,
) {
    let env = env.clone();
    let core_tx = core_tx.clone();
    tokio::spawn(async move {
        if let Some(action) = run(task, &env).await {
            let _ = core_tx.send(CoreMsg::Task { epoch, action });
        }
    });
}

/// Run `task` to completion and produce its result action.
pub async fn run(task: Task, env: &Environment) -> Option<Action> {
    match task {
        Task::StartSynchronizer {
            seed,
            birthday,
            mode,
        } => {
            let result = env
                .synchronizer
                .prepare_and_start(&seed, birthday, mode)
                .await;
            drop(seed);
            Some(Action::Initialization(match result {
                Ok(()) => InitializationAction::SynchronizerStarted(mode),
                Err(err) => InitializationAction::SynchronizerStartFailed(err),
            }))
        }
        Task::NukeWallet { network } => Some(match nuke_wallet(env, network).await {
            Ok(()) => Action::NukeWalletSucceeded,
            Err(err) => Action::NukeWalletFailed(err),
        }),
        Task::Rewind(policy) => Some(Action::Debug(rewind(env, policy).await)),
        Task::ExportLogs => {
            let result = env.log_exporter.export().await;
            Some(Action::ExportLogs(ExportLogsAction::Finished(result)))
        }
        Task::UpdateWalletConfigFlag { name, enabled } => {
            if let Err(err) = env.wallet_config.update(&name, enabled).await {
                tracing::warn!(flag = %name, enabled, error = %err, "flag update failed");
                return None;
            }
            match env.wallet_config.load().await {
                Ok(config) => Some(Action::UpdateStateAfterConfigUpdate(config)),
                Err(err) => {
                    tracing::warn!(error = %err, "wallet config reload failed");
                    None
                }
            }
        }
    }
}

/// Stop syncing, then erase synchronizer data, keys and database files.
async fn nuke_wallet(env: &Environment, network: Network) -> Result<(), WalletError> {
    env.synchronizer.stop().await;
    env.synchronizer.wipe().await?;
    env.key_storage.nuke_wallet()?;
    env.database_files.nuke_db_files(network)?;
    Ok(())
}

/// Stop, rewind and restart; a restart failure is reported separately.
async fn rewind(env: &Environment, policy: RewindPolicy) -> DebugAction {
    env.synchronizer.stop().await;
    if let Err(err) = env.synchronizer.rewind(policy).await {
        tracing::error!(?policy, error = %err, "rewind failed");
        return DebugAction::RewindDone(Err(err));
    }
    match env.synchronizer.start().await {
        Ok(()) => {
            tracing::info!(?policy, "rewind finished");
            DebugAction::RewindDone(Ok(()))
        }
        Err(err) => {
            tracing::error!(error = %err, "synchronizer restart after rewind failed");
            DebugAction::SyncRestartFailed(err)
        }
    }
}
