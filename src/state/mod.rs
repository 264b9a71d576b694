//! Root state: the aggregate owned by the runtime loop plus the value types and
//! modal slots it is built from.

pub mod app_state;
pub mod modal;
pub mod types;

pub use app_state::{AppState, ViewSnapshot};
pub use modal::{Alert, AlertKind, ConfirmationDialog, DialogKind, ErrorDetail};
pub use types::{
    AppStartState, BatteryState, Destination, DestinationState, InitializationState, Network,
    SeedPhrase, SynchronizerSnapshot, WalletConfig, WalletStatus,
};

