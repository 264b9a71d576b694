//! Log export for support requests.

use crate::errors::WalletError;
use crate::state::modal::ErrorDetail;
use crate::state::types::ExportedLogs;

/// Export logs state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportLogsState {
    /// A share sheet is showing the exported files.
    pub is_sharing_logs: bool,
    /// Export button disabled while an export or share is running.
    pub export_logs_disabled: bool,
    /// Exported files awaiting share.
    pub exported: Option<ExportedLogs>,
    /// Failure shown in this feature's own alert.
    pub failure: Option<ErrorDetail>,
}

/// Export logs actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportLogsAction {
    /// Begin an export.
    Start,
    /// Export task completed.
    Finished(Result<ExportedLogs, WalletError>),
    /// Share sheet closed.
    ShareFinished,
    /// Failure alert dismissed.
    DismissAlert,
}

/// Reduce an export logs action; returns `true` when the root should run the export task.
pub fn reduce(state: &mut ExportLogsState, action: ExportLogsAction) -> bool {
    match action {
        ExportLogsAction::Start => {
            if state.export_logs_disabled {
                return false;
            }
            state.export_logs_disabled = true;
            state.failure = None;
            true
        }
        ExportLogsAction::Finished(Ok(logs)) => {
            tracing::info!(files = logs.file_count, "logs exported");
            state.exported = Some(logs);
            state.is_sharing_logs = true;
            false
        }
        ExportLogsAction::Finished(Err(err)) => {
            tracing::warn!(error = %err, "log export failed");
            state.failure = Some(ErrorDetail::from(&err));
            state.export_logs_disabled = false;
            false
        }
        ExportLogsAction::ShareFinished => {
            state.is_sharing_logs = false;
            state.export_logs_disabled = false;
            state.exported = None;
            false
        }
        ExportLogsAction::DismissAlert => {
            state.failure = None;
            false
        }
    }
}
