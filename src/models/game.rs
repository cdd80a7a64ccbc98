/// Number of distinct symbols in a game. Every symbol appears on
/// exactly two cards, so a completed game has matched this many pairs.
pub const PAIR_COUNT: usize = 6;

/// Total number of cards dealt per game.
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

/// One card of the memory grid.
///
/// Immutable except for `matched`, which transitions false -> true exactly
/// once per game and never reverts. The artwork for a card is resolved by
/// the UI layer from `symbol_id` via the configured artwork table (see
/// [`crate::models::GameConfig`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    /// Unique position-independent identity, stable for the whole game.
    pub id: u32,

    /// Symbol identity shared with exactly one other card (its pair).
    pub symbol_id: u32,

    /// Whether this card has been paired up.
    pub matched: bool,
}

/// Outcome of a single card selection.
///
/// The engine never fails: invalid input collapses to [`Ignored`](Self::Ignored).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection was rejected: game inactive, unknown card, card
    /// already matched, card already face-up, or selection locked with
    /// two cards pending resolution.
    Ignored,

    /// First card of a resolution cycle turned face-up.
    Revealed,

    /// Second card matched the first. Both are marked matched and the
    /// selection is cleared immediately.
    Matched {
        /// True when this was the final pair; the session is now over.
        completed: bool,
    },

    /// Second card did not match. The selection stays full (and locked)
    /// until the caller clears it after the reveal delay.
    Mismatched,
}

/// Outcome of a game-start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session is active.
    Started,

    /// The trimmed player name was empty. A validation message was set
    /// and nothing else changed.
    EmptyName,
}

/// Single source of truth for one game session.
///
/// # Thread Safety
///
/// `GameState` is wrapped in `Arc<RwLock<GameState>>` by
/// [`crate::state::StateManager`] for thread-safe access. Never mutate it
/// directly from outside the state module - go through `StateManager`
/// methods so change events are emitted.
///
/// # Generation counter
///
/// `generation` increments on every start and reset. Scheduled work (the
/// clock interval, the delayed flip-back after a mismatch) carries the
/// generation it was created under; [`crate::state::StateManager`]
/// discards callbacks whose generation no longer matches, so a reset
/// mid-delay cannot corrupt the next session.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Trimmed player name for the active session. Empty when idle.
    pub player_name: String,

    /// The shuffled deck. Empty until the first game starts.
    pub deck: Vec<Card>,

    /// Ids of the 0-2 cards currently face-up and pending resolution.
    /// Never contains a matched card.
    pub face_up: Vec<u32>,

    /// Whole seconds since the session started, driven by the clock task.
    pub elapsed_seconds: u64,

    /// Pairs found so far, in `0..=PAIR_COUNT`. Monotone within a session.
    pub matched_pairs: usize,

    /// True from a successful start until completion or reset.
    pub is_active: bool,

    /// User-facing message: validation feedback or the completion banner.
    pub message: String,

    /// Session generation, bumped on every start and reset.
    pub generation: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            deck: Vec::new(),
            face_up: Vec::new(),
            elapsed_seconds: 0,
            matched_pairs: 0,
            is_active: false,
            message: String::new(),
            generation: 0,
        }
    }
}

impl GameState {
    /// Start a new session with the given name and (already shuffled) deck.
    ///
    /// Rejects a blank name with [`StartOutcome::EmptyName`], setting only
    /// the validation message; the session stays inactive.
    pub fn start(&mut self, name: &str, deck: Vec<Card>) -> StartOutcome {
        let name = name.trim();
        if name.is_empty() {
            self.message = "Please enter a name.".to_string();
            return StartOutcome::EmptyName;
        }

        self.player_name = name.to_string();
        self.deck = deck;
        self.face_up.clear();
        self.elapsed_seconds = 0;
        self.matched_pairs = 0;
        self.message.clear();
        self.is_active = true;
        self.generation += 1;

        StartOutcome::Started
    }

    /// Reveal a card and resolve the pair when it is the second pick.
    ///
    /// All precondition violations are no-ops returning
    /// [`SelectOutcome::Ignored`]; the engine has no error states.
    ///
    /// On a match both cards are marked matched and the selection is
    /// cleared in the same step, so the next pick is enabled immediately;
    /// the matched cards stay visible through their `matched` flag. On a
    /// mismatch the selection stays full - the caller schedules
    /// [`clear_selection`](Self::clear_selection) after the reveal delay.
    pub fn select_card(&mut self, card_id: u32) -> SelectOutcome {
        if !self.is_active {
            return SelectOutcome::Ignored;
        }
        // Locked while two cards await resolution.
        if self.face_up.len() == 2 {
            return SelectOutcome::Ignored;
        }
        if self.face_up.contains(&card_id) {
            return SelectOutcome::Ignored;
        }
        let Some(second) = self.card(card_id) else {
            return SelectOutcome::Ignored;
        };
        if second.matched {
            return SelectOutcome::Ignored;
        }
        let second_symbol = second.symbol_id;

        self.face_up.push(card_id);
        if self.face_up.len() < 2 {
            return SelectOutcome::Revealed;
        }

        let first_symbol = self
            .card(self.face_up[0])
            .map(|c| c.symbol_id)
            .expect("face-up card must exist in the deck");

        if first_symbol != second_symbol {
            return SelectOutcome::Mismatched;
        }

        // Matched: flip both flags immediately, before any reveal delay.
        for card in self.deck.iter_mut().filter(|c| c.symbol_id == second_symbol) {
            card.matched = true;
        }
        self.matched_pairs += 1;
        self.face_up.clear();

        let completed = self.is_complete();
        if completed {
            self.is_active = false;
            self.message = format!(
                "Game complete! Your time was {} seconds.",
                self.elapsed_seconds
            );
        }

        SelectOutcome::Matched { completed }
    }

    /// Empty the face-up selection, re-enabling the next pick.
    pub fn clear_selection(&mut self) {
        self.face_up.clear();
    }

    /// Advance the session clock by one second. No-op while inactive.
    pub fn tick(&mut self) {
        if self.is_active {
            self.elapsed_seconds += 1;
        }
    }

    /// True once every pair has been found.
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == PAIR_COUNT
    }

    /// Look up a card by id.
    pub fn card(&self, card_id: u32) -> Option<&Card> {
        self.deck.iter().find(|c| c.id == card_id)
    }

    /// Full return to the initial state, independent of whether the prior
    /// game completed. The generation still advances so that any pending
    /// scheduled callbacks from the old session are discarded.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::default();
        self.generation = generation;
    }
}
