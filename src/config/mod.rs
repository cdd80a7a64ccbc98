use crate::models::{GameConfig, PAIR_COUNT};
use anyhow::{bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration manager for loading and saving the YAML game configuration.
///
/// Manages a single file, `Memomatch Config.yaml`, holding session
/// settings, the result store endpoint, and the card artwork table. A
/// missing file is replaced with defaults so a fresh checkout plays
/// out of the box.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Memomatch Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join("Memomatch Config.yaml"),
            config_dir,
        })
    }

    /// Load the game configuration.
    ///
    /// # Returns
    /// The loaded GameConfig; when the file doesn't exist, defaults are
    /// written to disk and returned.
    pub fn load_game_config(&self) -> Result<GameConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, writing defaults",
                self.config_path
            );
            let config = GameConfig::default();
            self.save_game_config(&config)?;
            return Ok(config);
        }

        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: GameConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        Self::validate(&config)?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the game configuration.
    pub fn save_game_config(&self, config: &GameConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// The deck geometry is fixed, so the artwork table must cover exactly
    /// one image per symbol.
    fn validate(config: &GameConfig) -> Result<()> {
        if config.card_art.len() != PAIR_COUNT {
            bail!(
                "Card_Art must define exactly {} symbols, found {}",
                PAIR_COUNT,
                config.card_art.len()
            );
        }
        Ok(())
    }

    /// Directory the configuration lives in.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Path of the configuration file.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
