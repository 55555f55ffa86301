//! Transcript-based wake-phrase detector.
//!
//! Watches a running speech-recognition transcript for the configured wake
//! phrase. Matching is done on normalized text (lowercased, punctuation
//! stripped) so it is resilient to STT formatting. An exact substring match
//! always activates; below full sensitivity a fuzzy fallback counts how many
//! wake-phrase words appear anywhere in the transcript, tolerating partial
//! or garbled transcriptions.
//!
//! Detection is one-shot: once activated the detector stays latched and
//! stops re-running until [`WakePhraseDetector::reset`] is called.

use crate::config::WakewordConfig;
use tracing::debug;

/// Latched wake-phrase detector over incremental transcripts.
#[derive(Debug, Clone)]
pub struct WakePhraseDetector {
    /// Normalized wake phrase.
    wake_phrase: String,
    /// Individual words of the normalized wake phrase.
    wake_words: Vec<String>,
    /// Fuzzy-match sensitivity in `[0, 1]`; 1.0 disables the fuzzy fallback.
    sensitivity: f32,
    /// One-shot activation latch.
    activated: bool,
}

impl WakePhraseDetector {
    /// Create a detector for the given wake phrase.
    ///
    /// Sensitivity is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(wake_phrase: &str, sensitivity: f32) -> Self {
        let wake_phrase = normalize(wake_phrase);
        let wake_words = wake_phrase.split_whitespace().map(str::to_owned).collect();
        Self {
            wake_phrase,
            wake_words,
            sensitivity: sensitivity.clamp(0.0, 1.0),
            activated: false,
        }
    }

    /// Create a detector from the wakeword config section.
    #[must_use]
    pub fn from_config(config: &WakewordConfig) -> Self {
        Self::new(&config.wake_phrase, config.sensitivity)
    }

    /// Whether the detector is currently latched active.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Clear the activation latch so detection runs again.
    pub fn reset(&mut self) {
        self.activated = false;
    }

    /// Feed a transcript and check for the wake phrase.
    ///
    /// Returns the activation state after processing. While latched, the
    /// transcript is ignored and `true` is returned immediately.
    pub fn detect(&mut self, transcript: &str) -> bool {
        if self.activated {
            return true;
        }
        if transcript.is_empty() || self.wake_phrase.is_empty() {
            return false;
        }

        let normalized = normalize(transcript);

        // Exact substring match.
        if normalized.contains(&self.wake_phrase) {
            debug!("wake phrase matched exactly");
            self.activated = true;
            return true;
        }

        // Fuzzy fallback: enough wake-phrase words present anywhere in the
        // transcript. Disabled at full sensitivity.
        if self.sensitivity < 1.0 {
            let matched = self
                .wake_words
                .iter()
                .filter(|word| normalized.contains(word.as_str()))
                .count();

            let threshold = fuzzy_threshold(self.wake_words.len(), self.sensitivity);
            if matched >= threshold {
                debug!("wake phrase fuzzy match: {matched}/{} words", self.wake_words.len());
                self.activated = true;
            }
        }

        self.activated
    }
}

/// Minimum number of wake-phrase words required for a fuzzy match:
/// `max(1, floor(word_count * sensitivity))`.
fn fuzzy_threshold(word_count: usize, sensitivity: f32) -> usize {
    ((word_count as f32 * sensitivity).floor() as usize).max(1)
}

/// Lowercase and strip everything except word characters and whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
