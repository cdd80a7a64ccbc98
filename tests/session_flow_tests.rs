//! End-to-end session tests for the GameController
//!
//! These run under paused tokio time, so the one-second clock and the
//! reveal delay elapse deterministically. The result store is an in-memory
//! recorder to observe exactly what was submitted and when.

use async_trait::async_trait;
use memomatch::models::{GameSettings, PAIR_COUNT};
use memomatch::services::results::ResultStoreError;
use memomatch::{GameController, ResultRecord, ResultStore, SelectOutcome, StartOutcome, StateManager};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

/// Records every submission; optionally delays or fails them.
struct RecordingStore {
    calls: Mutex<Vec<(String, ResultRecord)>>,
    delay: Duration,
    fail: bool,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<(String, ResultRecord)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultStore for RecordingStore {
    async fn create(&self, collection: &str, record: &ResultRecord) -> Result<(), ResultStoreError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.calls
            .lock()
            .unwrap()
            .push((collection.to_string(), record.clone()));
        if self.fail {
            return Err(ResultStoreError::Rejected(500));
        }
        Ok(())
    }
}

fn controller_with(store: Arc<RecordingStore>) -> GameController {
    GameController::new(
        Arc::new(StateManager::new()),
        store,
        GameSettings::default(),
        tokio::runtime::Handle::current(),
    )
}

/// Match every pair by walking the shuffled deck symbol by symbol.
fn complete_game(controller: &GameController) {
    let deck = controller.state_manager().snapshot().deck;
    for symbol in 0..PAIR_COUNT as u32 {
        let ids: Vec<u32> = deck
            .iter()
            .filter(|c| c.symbol_id == symbol)
            .map(|c| c.id)
            .collect();
        assert_eq!(ids.len(), 2);
        controller.select_card(ids[0]);
        let outcome = controller.select_card(ids[1]);
        assert!(matches!(outcome, SelectOutcome::Matched { .. }));
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_session_records_elapsed_time() {
    let store = Arc::new(RecordingStore::new());
    let controller = controller_with(Arc::clone(&store));

    assert_eq!(controller.start_game("Ana"), StartOutcome::Started);

    // Play for 47 seconds, then find every pair.
    sleep(Duration::from_millis(47_050)).await;
    complete_game(&controller);
    sleep(Duration::from_millis(50)).await;

    let calls = store.calls();
    assert_eq!(calls.len(), 1, "exactly one record per completed session");
    let (collection, record) = &calls[0];
    assert_eq!(collection, "results");
    assert_eq!(record.name, "Ana");
    assert_eq!(record.seconds, 47);
    assert!(chrono::DateTime::parse_from_rfc3339(&record.recorded_at).is_ok());

    let state = controller.state_manager().snapshot();
    assert!(!state.is_active);
    assert!(state.message.contains("47"));
    assert!(state.deck.iter().all(|c| c.matched));
}

#[tokio::test(start_paused = true)]
async fn test_mismatch_then_match_scenario() {
    let store = Arc::new(RecordingStore::new());
    let controller = controller_with(Arc::clone(&store));
    controller.start_game("Ana");

    let deck = controller.state_manager().snapshot().deck;
    let first = deck[0];
    let its_pair = deck
        .iter()
        .find(|c| c.symbol_id == first.symbol_id && c.id != first.id)
        .copied()
        .unwrap();
    let other = deck
        .iter()
        .find(|c| c.symbol_id != first.symbol_id)
        .copied()
        .unwrap();

    // Mismatch: both stay revealed for the delay, nothing is matched.
    controller.select_card(first.id);
    assert_eq!(controller.select_card(other.id), SelectOutcome::Mismatched);
    sleep(Duration::from_millis(1100)).await;
    let state = controller.state_manager().snapshot();
    assert!(state.face_up.is_empty());
    assert_eq!(state.matched_pairs, 0);

    // Now the real pair: matched immediately, selection cleared at once.
    controller.select_card(first.id);
    assert_eq!(
        controller.select_card(its_pair.id),
        SelectOutcome::Matched { completed: false }
    );
    let state = controller.state_manager().snapshot();
    assert!(state.face_up.is_empty());
    assert_eq!(state.matched_pairs, 1);
    assert!(state.deck.iter().filter(|c| c.matched).count() == 2);

    assert!(store.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_new_game_during_pending_submission() {
    let store = Arc::new(RecordingStore::slow(Duration::from_secs(5)));
    let controller = controller_with(Arc::clone(&store));

    controller.start_game("Ana");
    sleep(Duration::from_millis(3050)).await;
    complete_game(&controller);

    // The submission is still in flight; start the next game under it.
    assert_eq!(controller.start_game("Bea"), StartOutcome::Started);
    sleep(Duration::from_millis(2050)).await;

    // New session keeps its own clock and state.
    let state = controller.state_manager().snapshot();
    assert!(state.is_active);
    assert_eq!(state.player_name, "Bea");
    assert_eq!(state.elapsed_seconds, 2);
    assert_eq!(state.matched_pairs, 0);

    // And the old record still lands, untouched by the new session.
    sleep(Duration::from_secs(5)).await;
    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.name, "Ana");
    assert_eq!(calls[0].1.seconds, 3);
}

#[tokio::test(start_paused = true)]
async fn test_failed_submission_keeps_completion_state() {
    let store = Arc::new(RecordingStore::failing());
    let controller = controller_with(Arc::clone(&store));

    controller.start_game("Ana");
    complete_game(&controller);
    sleep(Duration::from_millis(50)).await;

    assert_eq!(store.calls().len(), 1);
    let state = controller.state_manager().snapshot();
    assert!(!state.is_active);
    assert_eq!(state.matched_pairs, PAIR_COUNT);
    assert!(!state.message.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reset_releases_clock_and_pending_flip_back() {
    let store = Arc::new(RecordingStore::new());
    let controller = controller_with(Arc::clone(&store));

    controller.start_game("Ana");
    let deck = controller.state_manager().snapshot().deck;
    let first = deck[0];
    let other = deck
        .iter()
        .find(|c| c.symbol_id != first.symbol_id)
        .copied()
        .unwrap();
    controller.select_card(first.id);
    controller.select_card(other.id);

    // Reset mid reveal-delay and immediately start over.
    controller.reset_game();
    controller.start_game("Bea");
    let revealed = controller.state_manager().snapshot().deck[0].id;
    controller.select_card(revealed);

    sleep(Duration::from_millis(3050)).await;

    let state = controller.state_manager().snapshot();
    assert_eq!(state.face_up, vec![revealed], "stale flip-back must not fire");
    assert_eq!(state.elapsed_seconds, 3, "only the new session's clock runs");
    assert!(store.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shuffled_decks_stay_paired() {
    let store = Arc::new(RecordingStore::new());
    let controller = controller_with(store);

    for _ in 0..5 {
        controller.start_game("Ana");
        let deck = controller.state_manager().snapshot().deck;
        for symbol in 0..PAIR_COUNT as u32 {
            assert_eq!(deck.iter().filter(|c| c.symbol_id == symbol).count(), 2);
        }
        controller.reset_game();
    }
}
