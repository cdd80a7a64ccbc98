//! Game controller - wires player events to the state machine and owns
//! the session's background work.
//!
//! The controller is the orchestration layer between an outside UI surface
//! (which feeds it `start_game` / `select_card` / `reset_game` events) and
//! the core:
//!
//! - On start it shuffles a deck, runs the start transition, and spawns
//!   the once-per-second clock task.
//! - On a mismatch it schedules the delayed flip-back, tagged with the
//!   session generation so a reset mid-delay discards it.
//! - On completion it stops the clock and fires exactly one result
//!   submission, fire-and-forget: failure is logged, never surfaced.
//!
//! The clock task is released on every exit path - completion, explicit
//! reset, and controller drop.

use crate::metrics::Metrics;
use crate::models::{GameSettings, SelectOutcome, StartOutcome};
use crate::services::deck;
use crate::services::results::{ResultRecord, ResultStore};
use crate::state::StateManager;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Session orchestrator
///
/// # Example
///
/// ```ignore
/// let state_manager = Arc::new(StateManager::new());
/// let store = Arc::new(HttpResultStore::new(endpoint, timeout)?);
/// let controller = GameController::new(
///     state_manager,
///     store,
///     config.settings.clone(),
///     runtime.handle().clone(),
/// );
/// controller.start_game("Ana");
/// ```
pub struct GameController {
    /// Shared game state manager
    state_manager: Arc<StateManager>,

    /// External result store collaborator
    result_store: Arc<dyn ResultStore>,

    /// Session settings (reveal delay, result collection, stat logging)
    settings: GameSettings,

    /// Handle to the tokio runtime for spawning background tasks
    tokio_handle: tokio::runtime::Handle,

    /// Activity counters
    metrics: Arc<Metrics>,

    /// The running clock task for the active session, if any
    clock_task: Mutex<Option<JoinHandle<()>>>,
}

impl GameController {
    /// Create a new controller
    ///
    /// # Arguments
    /// * `state_manager` - Shared game state manager
    /// * `result_store` - Store the completed-session record is written to
    /// * `settings` - Game settings from configuration
    /// * `tokio_handle` - Handle to the tokio runtime for spawning tasks
    pub fn new(
        state_manager: Arc<StateManager>,
        result_store: Arc<dyn ResultStore>,
        settings: GameSettings,
        tokio_handle: tokio::runtime::Handle,
    ) -> Self {
        Self {
            state_manager,
            result_store,
            settings,
            tokio_handle,
            metrics: Arc::new(Metrics::new()),
            clock_task: Mutex::new(None),
        }
    }

    /// Start a new game for the given player
    ///
    /// Shuffles a fresh deck and, on success, starts the session clock.
    /// A blank (post-trim) name is rejected with a validation message and
    /// no state change beyond the message.
    pub fn start_game(&self, name: &str) -> StartOutcome {
        let outcome = self.state_manager.start_game(name, deck::shuffled_deck());
        match outcome {
            StartOutcome::EmptyName => {
                tracing::warn!("Rejected game start: empty player name");
            }
            StartOutcome::Started => {
                // A start while a game is running supersedes it; release
                // the old session's clock before spawning the new one.
                self.stop_clock();
                self.metrics.record_game_started();
                self.spawn_clock();
                tracing::info!("Game started for {}", name.trim());
            }
        }
        outcome
    }

    /// Handle a card tap from the player
    ///
    /// Invalid taps (locked selection, matched card, inactive session) are
    /// ignored. A mismatch schedules the flip-back after the configured
    /// reveal delay; the final match ends the session and submits the
    /// result record.
    pub fn select_card(&self, card_id: u32) -> SelectOutcome {
        let outcome = self.state_manager.select_card(card_id);

        match outcome {
            SelectOutcome::Ignored | SelectOutcome::Revealed => {}
            SelectOutcome::Mismatched => self.schedule_flip_back(),
            SelectOutcome::Matched { completed: false } => {
                self.metrics.record_pair_matched();
            }
            SelectOutcome::Matched { completed: true } => {
                self.metrics.record_pair_matched();
                self.metrics.record_game_completed();
                self.finish_session();
            }
        }
        outcome
    }

    /// Reset everything back to the initial idle state
    ///
    /// Releases the clock and bumps the session generation, which also
    /// invalidates any flip-back still pending from the old session.
    pub fn reset_game(&self) {
        self.stop_clock();
        self.state_manager.reset_game();
        tracing::info!("Game reset");
    }

    /// Shared state manager, for UI surfaces that want to subscribe.
    pub fn state_manager(&self) -> &Arc<StateManager> {
        &self.state_manager
    }

    /// Activity counters.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Spawn the once-per-second clock for the just-started session.
    ///
    /// The task exits on its own as soon as the session it was started for
    /// is no longer the active one; the retained handle lets completion,
    /// reset, and drop release it immediately instead.
    fn spawn_clock(&self) {
        let generation = self.state_manager.read(|s| s.generation);
        let state_manager = self.state_manager.clone();

        let handle = self.tokio_handle.spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately; consume it so the
            // elapsed counter starts moving one second in.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !state_manager.tick(generation) {
                    break;
                }
            }
        });

        let mut slot = self.clock_task.lock().unwrap();
        *slot = Some(handle);
    }

    /// Abort the clock task of the current session, if one is running.
    fn stop_clock(&self) {
        if let Some(handle) = self.clock_task.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Schedule the delayed flip-back for a mismatched pair.
    fn schedule_flip_back(&self) {
        let generation = self.state_manager.read(|s| s.generation);
        let state_manager = self.state_manager.clone();
        let metrics = Arc::clone(&self.metrics);
        let delay = self.settings.reveal_delay();

        self.tokio_handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if !state_manager.clear_selection(generation) {
                metrics.record_stale_callback();
            }
        });
    }

    /// Stop the clock and submit the result record, fire-and-forget.
    ///
    /// Completion flipped the session inactive, freezing `elapsed_seconds`,
    /// so the record carries exactly the clock value at the moment the
    /// final pair matched. The submission task owns its record and store
    /// handle; a new game starting before it resolves is unaffected.
    fn finish_session(&self) {
        self.stop_clock();

        let record = self
            .state_manager
            .read(|s| ResultRecord::new(s.player_name.clone(), s.elapsed_seconds));
        let store = Arc::clone(&self.result_store);
        let collection = self.settings.result_collection.clone();
        let metrics = Arc::clone(&self.metrics);

        self.tokio_handle.spawn(async move {
            match store.create(&collection, &record).await {
                Ok(()) => metrics.record_result_submitted(),
                Err(e) => {
                    metrics.record_result_failed();
                    tracing::warn!("Failed to store result for {}: {}", record.name, e);
                }
            }
        });

        if self.settings.stat_logging {
            self.metrics.log_summary();
        }
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.stop_clock();
    }
}
