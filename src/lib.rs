//! Library entry for wallet-root exposing the orchestration core for the
//! binary and integration tests.

pub mod actions;
pub mod app;
pub mod args;
pub mod config;
pub mod effects;
pub mod env;
pub mod errors;
pub mod features;
pub mod i18n;
pub mod logic;
pub mod state;
#[doc(hidden)]
pub mod test_utils;
