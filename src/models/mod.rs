//! Data models for the memomatch core.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`GameState`]: the central state container for one game session
//! - [`Card`], [`SelectOutcome`], [`StartOutcome`]: the match engine's vocabulary
//! - [`GameConfig`] / [`GameSettings`]: settings loaded from `Memomatch Config.yaml`
//! - [`PAIR_COUNT`] / [`DECK_SIZE`]: the fixed deck geometry
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Pure**: `GameState` transitions are plain methods with no I/O, tested in isolation
//! - **Cloneable**: `GameState` is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager) for thread-safe access
//! - **Serializable**: config structs derive `Serialize`/`Deserialize` for YAML persistence

pub mod config;
pub mod game;

pub use config::{GameConfig, GameSettings};
pub use game::{Card, GameState, SelectOutcome, StartOutcome, DECK_SIZE, PAIR_COUNT};
