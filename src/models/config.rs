use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Game configuration from `Memomatch Config.yaml`.
///
/// Contains session settings, the result store endpoint, and the card
/// artwork table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(rename = "Memomatch_Settings", default)]
    pub settings: GameSettings,

    /// Symbol name -> image asset path, one entry per symbol. The core
    /// only uses the stable keys; the UI layer resolves the assets.
    /// Insertion order determines the symbol ids handed to the deck.
    #[serde(rename = "Card_Art", default = "default_card_art")]
    pub card_art: IndexMap<String, String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            card_art: default_card_art(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    /// How long a mismatched pair stays revealed before flipping back.
    #[serde(rename = "Reveal Delay MS", default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    /// Base URL of the result store.
    #[serde(rename = "Result Endpoint", default = "default_result_endpoint")]
    pub result_endpoint: String,

    /// Collection the completed-game records are written to.
    #[serde(rename = "Result Collection", default = "default_result_collection")]
    pub result_collection: String,

    /// Timeout for a single result submission, in seconds.
    #[serde(rename = "Result Timeout", default = "default_result_timeout")]
    pub result_timeout: u32,

    /// Log a metrics summary when a session ends.
    #[serde(rename = "Stat Logging", default)]
    pub stat_logging: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
            result_endpoint: default_result_endpoint(),
            result_collection: default_result_collection(),
            result_timeout: default_result_timeout(),
            stat_logging: false,
        }
    }
}

impl GameSettings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn result_timeout(&self) -> Duration {
        Duration::from_secs(self.result_timeout as u64)
    }
}

fn default_reveal_delay_ms() -> u64 {
    1000
}

fn default_result_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_result_collection() -> String {
    "results".to_string()
}

fn default_result_timeout() -> u32 {
    10
}

/// The original fruit set, one image per symbol.
fn default_card_art() -> IndexMap<String, String> {
    IndexMap::from([
        ("apple".to_string(), "images/apple.png".to_string()),
        ("banana".to_string(), "images/banana.png".to_string()),
        ("cherry".to_string(), "images/cherry.png".to_string()),
        ("grape".to_string(), "images/grape.png".to_string()),
        ("strawberry".to_string(), "images/strawberry.png".to_string()),
        ("orange".to_string(), "images/orange.png".to_string()),
    ])
}
