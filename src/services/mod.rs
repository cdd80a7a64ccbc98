//! Services module - Pure business logic for the memory game.
//!
//! The services are **framework-agnostic** and have no dependencies on any
//! UI layer, making them testable and reusable.
//!
//! # Components
//!
//! - [`deck`]: builds the fixed paired card set and produces a uniform
//!   random permutation of it at game start (Fisher-Yates via `rand`).
//!
//! - [`results`]: the result reporting port. [`ResultRecord`] is the
//!   write-once summary of a completed session; [`ResultStore`] is the
//!   async trait the external document store is reached through, with
//!   [`HttpResultStore`] as the JSON-over-HTTP implementation. Failures
//!   are non-fatal by design: the controller logs and continues.
//!
//! # Design Philosophy
//!
//! - **Pure**: deck functions have no side effects at all
//! - **Async**: the store port uses tokio-compatible futures
//! - **Testable**: no hidden dependencies, all inputs are explicit parameters

pub mod deck;
pub mod results;

pub use deck::{fresh_deck, shuffled_deck, shuffled_deck_with};
pub use results::{HttpResultStore, ResultRecord, ResultStore, ResultStoreError};
