//! placeform library - Terminal form for registering places
//!
//! This library exposes the core functionality of placeform for testing purposes.

pub mod app;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod form;
pub mod geocode;

#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod widgets;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;
