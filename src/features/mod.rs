//! Nested screen features owned by the root.
//!
//! Each feature owns its state and reduces only its own actions. Some reducers
//! return a delegate value that the root reacts to (routing, wallet flows); the
//! root never reaches into feature state beyond the small accessors exposed here.

pub mod debug;
pub mod export_logs;
pub mod not_enough_free_space;
pub mod onboarding;
pub mod phrase_display;
pub mod phrase_validation;
pub mod sandbox;
pub mod server_setup;
pub mod tabs;
pub mod welcome;
