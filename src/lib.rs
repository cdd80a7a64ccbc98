// Memomatch - headless core for a single-screen memory matching game.
//
// A player enters a name, flips pairs of cards until all six pairs are
// found, and the elapsed time is written to a remote result store. This
// crate owns the deck, the match state machine, the session clock, and
// the result reporting; a UI surface consumes it through GameController
// and the StateManager change events.

pub mod config;
pub mod controller;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use controller::GameController;
pub use models::{Card, GameConfig, GameState, SelectOutcome, StartOutcome};
pub use services::{HttpResultStore, ResultRecord, ResultStore};
pub use state::{StateChange, StateManager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
