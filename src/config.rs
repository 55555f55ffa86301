//! Configuration types for the check-in engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for a check-in session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckinConfig {
    /// Wake-phrase gate settings.
    pub wakeword: WakewordConfig,
    /// Session driver settings.
    pub session: SessionConfig,
}

/// Wake-phrase detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WakewordConfig {
    /// Whether the wake-phrase gate is enabled.
    ///
    /// When disabled, the session driver treats every session as already
    /// activated and the first transcript starts the dialogue.
    pub enabled: bool,
    /// Wake phrase that activates the assistant (case-insensitive).
    pub wake_phrase: String,
    /// Fuzzy-match sensitivity (0.0–1.0).
    ///
    /// At 1.0 only an exact substring match of the full phrase activates.
    /// Below 1.0, partial matches are accepted: the detector counts how many
    /// wake-phrase words appear in the transcript and activates when the
    /// count reaches `max(1, floor(word_count * sensitivity))`. This
    /// tolerates garbled speech-recognition output.
    ///   - 0.5: lenient (half the words suffice)
    ///   - 0.7: balanced (default)
    ///   - 1.0: strict (exact phrase only)
    pub sensitivity: f32,
}

impl Default for WakewordConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wake_phrase: "hey mindmosaic".to_owned(),
            sensitivity: 0.7,
        }
    }
}

/// Session driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Automatically cycle `Closing → Idle` after the farewell prompt.
    ///
    /// When false the session stays in `Closing` until the next transcript
    /// arrives, mirroring a caller that wants to drive the final reset
    /// itself.
    pub auto_reset: bool,
    /// Seed for the phrase-selection RNG.
    ///
    /// `None` seeds from entropy. Setting a seed makes prompt selection
    /// reproducible, which is useful for scripted demos and tests.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_reset: true,
            rng_seed: None,
        }
    }
}

impl CheckinConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::CheckinError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::CheckinError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/mindmosaic/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = dirs::config_dir() {
            config.join("mindmosaic").join("config.toml")
        } else {
            PathBuf::from("/tmp/mindmosaic-config/config.toml")
        }
    }
}
