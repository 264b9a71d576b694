//! Root orchestration logic: prober, router, alert coordinator, lifecycle
//! aggregator and the reducer tying them together.

pub mod alerts;
pub mod initialization;
pub mod lifecycle;
pub mod probe;
pub mod reducer;
pub mod router;

pub use probe::{probe, probe_wallet, wallet_initialization_state};
pub use reducer::{reduce, reduce_all};
