// State management module
//
// This module provides the StateManager which wraps GameState with thread-safe
// access using Arc<RwLock<T>> and emits change events for UI consumers.

use crate::models::{Card, GameState, SelectOutcome, StartOutcome, PAIR_COUNT};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when the game state is modified
///
/// These events are emitted to notify interested parties (primarily a UI
/// surface) about state changes without requiring them to poll the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// A new session has started
    GameStarted {
        pair_count: usize,
    },

    /// The face-up selection changed (reveal or flip-back)
    SelectionChanged {
        face_up: Vec<u32>,
    },

    /// A pair was found
    PairMatched {
        matched_pairs: usize,
    },

    /// The session clock advanced
    ClockTick {
        elapsed_seconds: u64,
    },

    /// The final pair was found and the session ended
    GameCompleted {
        player_name: String,
        elapsed_seconds: u64,
    },

    /// The user-facing message changed (validation or completion text)
    MessageChanged {
        message: String,
    },

    /// State has been reset to initial values
    GameReset,
}

/// Thread-safe state manager with event emission
///
/// This is the central state management component that:
/// - Provides thread-safe access to [`GameState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Guards scheduled-task entry points (`tick`, `clear_selection`) with
///   the session generation so stale callbacks are discarded
///
/// # Usage
///
/// Always use `StateManager` instead of accessing [`GameState`] directly:
/// - [`read()`](Self::read) for reading state without cloning
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
///
/// # Related Types
///
/// - [`crate::models::GameState`]: The underlying state structure
/// - [`StateChange`]: Event types emitted on state mutations
/// - [`crate::controller::GameController`]: Drives this manager from timers
///   and player input
pub struct StateManager {
    /// The game state protected by RwLock for thread-safe access
    state: Arc<RwLock<GameState>>,

    /// Broadcast channel for emitting state change events
    /// Multiple subscribers can listen for state changes
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default (idle) state
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(GameState::default())),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    ///
    /// This clones the entire state, so it's safe to use without holding
    /// locks. For checking individual fields, prefer `read()` with a closure.
    pub fn snapshot(&self) -> GameState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let active = state_manager.read(|state| state.is_active);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&GameState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the primary way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut GameState),
    {
        self.update_returning(update_fn).1
    }

    /// Like [`update()`](Self::update), but also returns the closure's
    /// result. Used by the transition operations below, whose outcome
    /// (match, mismatch, ignored) the caller needs from the same locked step.
    pub fn update_returning<F, R>(&self, update_fn: F) -> (R, Vec<StateChange>)
    where
        F: FnOnce(&mut GameState) -> R,
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        let result = update_fn(&mut state);

        let changes = self.detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        (result, changes)
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state changes.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Detect what changed between two states and generate events
    ///
    /// This is called internally by `update()` to determine which events to emit.
    fn detect_changes(&self, old: &GameState, new: &GameState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if !old.is_active && new.is_active {
            changes.push(StateChange::GameStarted {
                pair_count: PAIR_COUNT,
            });
        }

        if old.face_up != new.face_up {
            changes.push(StateChange::SelectionChanged {
                face_up: new.face_up.clone(),
            });
        }

        if old.matched_pairs != new.matched_pairs {
            changes.push(StateChange::PairMatched {
                matched_pairs: new.matched_pairs,
            });
        }

        if old.elapsed_seconds != new.elapsed_seconds {
            changes.push(StateChange::ClockTick {
                elapsed_seconds: new.elapsed_seconds,
            });
        }

        // Completion is the only active -> inactive transition that keeps
        // the session data around; reset emits GameReset separately.
        if old.is_active && !new.is_active && new.is_complete() {
            changes.push(StateChange::GameCompleted {
                player_name: new.player_name.clone(),
                elapsed_seconds: new.elapsed_seconds,
            });
        }

        if old.message != new.message {
            changes.push(StateChange::MessageChanged {
                message: new.message.clone(),
            });
        }

        changes
    }

    // Convenience methods for the game operations

    /// Start a new session with the given player name and shuffled deck
    ///
    /// A blank (post-trim) name is rejected: the validation message is set
    /// and the session stays inactive.
    pub fn start_game(&self, name: &str, deck: Vec<Card>) -> StartOutcome {
        let (outcome, _) = self.update_returning(|state| state.start(name, deck));
        outcome
    }

    /// Reveal a card and resolve the pair when it is the second pick
    pub fn select_card(&self, card_id: u32) -> SelectOutcome {
        let (outcome, _) = self.update_returning(|state| state.select_card(card_id));
        if outcome == SelectOutcome::Ignored {
            tracing::debug!("Ignored selection of card {}", card_id);
        }
        outcome
    }

    /// Flip a mismatched selection back face-down
    ///
    /// Called from the delayed flip-back task. `generation` is the session
    /// generation the task was scheduled under; when it no longer matches
    /// the current state the callback is stale and is discarded.
    ///
    /// # Returns
    /// `true` if the selection was cleared, `false` if the callback was stale
    pub fn clear_selection(&self, generation: u64) -> bool {
        let (cleared, _) = self.update_returning(|state| {
            if state.generation != generation {
                return false;
            }
            state.clear_selection();
            true
        });

        if !cleared {
            tracing::debug!("Discarded stale flip-back for generation {}", generation);
        }
        cleared
    }

    /// Advance the session clock by one second
    ///
    /// Called from the clock task once per second. Stale or inactive ticks
    /// mutate nothing.
    ///
    /// # Returns
    /// `true` while the clock should keep running, `false` once the session
    /// this tick belongs to is over
    pub fn tick(&self, generation: u64) -> bool {
        let (running, _) = self.update_returning(|state| {
            if state.generation != generation || !state.is_active {
                return false;
            }
            state.tick();
            true
        });
        running
    }

    /// Reset all session state back to initial values
    pub fn reset_game(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.reset();
        });

        let reset_event = StateChange::GameReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }

    /// Get an Arc reference to the state for use in worker tasks
    ///
    /// Use this when you need to share state across tasks but want to
    /// minimize cloning. Remember to use read/write locks appropriately.
    pub fn state_arc(&self) -> Arc<RwLock<GameState>> {
        Arc::clone(&self.state)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across tasks
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
