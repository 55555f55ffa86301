//! Rule-based emotion classifier.
//!
//! Maps observed signals — transcript text and voice-pattern statistics —
//! to one of six emotion labels with a confidence score. Two layers:
//!
//! 1. **Keyword heuristic** — whole-word scan over the lowercased text
//!    against five keyword sets in fixed priority order; first set matched
//!    wins at confidence 0.7.
//! 2. **Voice-pattern thresholds** — pitch/rate/volume rules evaluated after
//!    the text layer. Each matching rule unconditionally overwrites the
//!    running result, so the last rule whose condition holds wins.
//!
//! The classifier only re-evaluates when given new evidence: a call with
//! neither text nor voice pattern returns the previous result unchanged.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Closed set of emotion labels used across phrase tables and the content
/// catalog. `Neutral` is the fallback at every lookup site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    /// Balanced / no dominant signal.
    #[default]
    Neutral,
    Happy,
    Sad,
    Stressed,
    Calm,
    Excited,
}

impl EmotionLabel {
    /// All labels, in declaration order.
    pub const ALL: [EmotionLabel; 6] = [
        EmotionLabel::Neutral,
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Stressed,
        EmotionLabel::Calm,
        EmotionLabel::Excited,
    ];

    /// Lowercase display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Stressed => "stressed",
            EmotionLabel::Calm => "calm",
            EmotionLabel::Excited => "excited",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmotionLabel {
    type Err = crate::error::CheckinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neutral" => Ok(EmotionLabel::Neutral),
            "happy" => Ok(EmotionLabel::Happy),
            "sad" => Ok(EmotionLabel::Sad),
            "stressed" => Ok(EmotionLabel::Stressed),
            "calm" => Ok(EmotionLabel::Calm),
            "excited" => Ok(EmotionLabel::Excited),
            other => Err(crate::error::CheckinError::Config(format!(
                "unknown emotion label: {other}"
            ))),
        }
    }
}

/// Result of a classification pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionResult {
    /// Detected emotion label.
    pub emotion: EmotionLabel,
    /// Classification confidence in the range `0.0..=1.0`.
    pub confidence: f32,
}

impl Default for EmotionResult {
    fn default() -> Self {
        Self {
            emotion: EmotionLabel::Neutral,
            confidence: NEUTRAL_CONFIDENCE,
        }
    }
}

/// Derived voice-signal summary from the audio analyzer.
///
/// Pitch and rate are normalized so 1.0 is the speaker's baseline (typical
/// range ~0.6–1.4); volume is in `[0, 1]`. Fields are optional because the
/// analyzer may not produce every statistic for every window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VoicePattern {
    /// Pitch relative to baseline (1.0 = baseline).
    pub pitch: Option<f32>,
    /// Speaking rate relative to baseline (1.0 = baseline).
    pub rate: Option<f32>,
    /// Normalized volume level in `[0, 1]`.
    pub volume: Option<f32>,
}

/// Confidence when no rule matches.
const NEUTRAL_CONFIDENCE: f32 = 0.5;
/// Confidence for a text keyword match.
const TEXT_CONFIDENCE: f32 = 0.7;
/// Pitch above this reads as elevated.
const HIGH_PITCH: f32 = 1.2;
/// Rate above this reads as fast.
const HIGH_RATE: f32 = 1.2;
/// Pitch below this reads as lowered.
const LOW_PITCH: f32 = 0.8;
/// Rate below this reads as slow.
const LOW_RATE: f32 = 0.8;
/// Volume below this reads as quiet.
const LOW_VOLUME: f32 = 0.4;

/// Keyword sets in priority order: the first set with a whole-word match in
/// the text wins. Sets are not merged; a text containing both "sad" and
/// "calm" classifies as sad.
static KEYWORD_SETS: LazyLock<Vec<(EmotionLabel, Regex)>> = LazyLock::new(|| {
    [
        (
            EmotionLabel::Happy,
            r"\b(happy|joy|great|awesome|wonderful|excited|love|amazing)\b",
        ),
        (
            EmotionLabel::Sad,
            r"\b(sad|unhappy|depressed|miserable|down|upset)\b",
        ),
        (
            EmotionLabel::Stressed,
            r"\b(stressed|anxious|worried|nervous|tense|pressure|overwhelmed)\b",
        ),
        (
            EmotionLabel::Calm,
            r"\b(calm|peaceful|relaxed|content|serene)\b",
        ),
        (
            EmotionLabel::Excited,
            r"\b(excited|thrilled|eager|energetic|enthusiastic)\b",
        ),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).unwrap()))
    .collect()
});

/// Stateful emotion classifier.
///
/// Holds the most recent result so that calls without new evidence are a
/// no-op rather than a reset to neutral.
#[derive(Debug, Default)]
pub struct EmotionClassifier {
    last: EmotionResult,
}

impl EmotionClassifier {
    /// Create a classifier with a neutral initial result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent classification result.
    #[must_use]
    pub fn last_result(&self) -> EmotionResult {
        self.last
    }

    /// Reset to the neutral initial result.
    pub fn reset(&mut self) {
        self.last = EmotionResult::default();
    }

    /// Classify on new evidence.
    ///
    /// If both inputs are absent the previous result is returned unchanged.
    /// Otherwise the result is recomputed from scratch: text keywords first,
    /// then voice-pattern rules, where every matching voice rule overwrites
    /// the running result (last match wins).
    pub fn classify(
        &mut self,
        text: Option<&str>,
        voice: Option<&VoicePattern>,
    ) -> EmotionResult {
        if text.is_none() && voice.is_none() {
            return self.last;
        }

        let mut result = EmotionResult::default();

        if let Some(text) = text {
            let lower = text.to_lowercase();
            for (label, pattern) in KEYWORD_SETS.iter() {
                if pattern.is_match(&lower) {
                    result = EmotionResult {
                        emotion: *label,
                        confidence: TEXT_CONFIDENCE,
                    };
                    break;
                }
            }
        }

        if let Some(voice) = voice {
            result = apply_voice_rules(result, voice);
        }

        self.last = result;
        result
    }
}

/// Apply the voice-pattern threshold rules in their fixed order.
///
/// The rules are not mutually exclusive guards: each one that holds
/// overwrites the result, so a quiet voice (volume < 0.4) reads as sad even
/// when pitch and rate indicated excitement.
fn apply_voice_rules(mut result: EmotionResult, voice: &VoicePattern) -> EmotionResult {
    if voice.pitch.is_some_and(|p| p > HIGH_PITCH) {
        result = if voice.rate.is_some_and(|r| r > HIGH_RATE) {
            EmotionResult {
                emotion: EmotionLabel::Excited,
                confidence: 0.8,
            }
        } else {
            EmotionResult {
                emotion: EmotionLabel::Stressed,
                confidence: 0.6,
            }
        };
    }

    if voice.pitch.is_some_and(|p| p < LOW_PITCH) {
        result = if voice.rate.is_some_and(|r| r < LOW_RATE) {
            EmotionResult {
                emotion: EmotionLabel::Sad,
                confidence: 0.7,
            }
        } else {
            EmotionResult {
                emotion: EmotionLabel::Calm,
                confidence: 0.6,
            }
        };
    }

    if voice.volume.is_some_and(|v| v < LOW_VOLUME) {
        result = EmotionResult {
            emotion: EmotionLabel::Sad,
            confidence: 0.6,
        };
    }

    result
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn classify_text(text: &str) -> EmotionResult {
        EmotionClassifier::new().classify(Some(text), None)
    }

    // ── Text keyword layer ──────────────────────────────────────────────

    #[test]
    fn empty_text_is_neutral() {
        let result = classify_text("");
        assert_eq!(result.emotion, EmotionLabel::Neutral);
        assert!((result.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn happy_keywords() {
        let result = classify_text("I had an awesome day, everything was wonderful");
        assert_eq!(result.emotion, EmotionLabel::Happy);
        assert!((result.confidence - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn sad_keywords() {
        let result = classify_text("honestly I've been feeling pretty down");
        assert_eq!(result.emotion, EmotionLabel::Sad);
    }

    #[test]
    fn stressed_keywords() {
        let result = classify_text("so much pressure at work, I'm overwhelmed");
        assert_eq!(result.emotion, EmotionLabel::Stressed);
    }

    #[test]
    fn calm_keywords() {
        let result = classify_text("it was a peaceful morning, very relaxed");
        assert_eq!(result.emotion, EmotionLabel::Calm);
    }

    #[test]
    fn excited_keywords() {
        let result = classify_text("I'm thrilled and eager to start");
        assert_eq!(result.emotion, EmotionLabel::Excited);
    }

    #[test]
    fn whole_word_matching_only() {
        // "sadly" contains "sad" but is not a whole-word match; "download"
        // contains "down".
        let result = classify_text("sadly the download finished");
        assert_eq!(result.emotion, EmotionLabel::Neutral);
    }

    #[test]
    fn case_insensitive() {
        let result = classify_text("WONDERFUL!");
        assert_eq!(result.emotion, EmotionLabel::Happy);
    }

    #[test]
    fn priority_order_happy_before_excited() {
        // "excited" appears in both the happy and excited sets; the happy
        // set is tested first and wins.
        let result = classify_text("I'm excited");
        assert_eq!(result.emotion, EmotionLabel::Happy);
    }

    #[test]
    fn priority_order_sad_before_calm() {
        let result = classify_text("calm but also sad");
        assert_eq!(result.emotion, EmotionLabel::Sad);
    }

    // ── Voice-pattern layer ─────────────────────────────────────────────

    fn pattern(pitch: f32, rate: f32, volume: f32) -> VoicePattern {
        VoicePattern {
            pitch: Some(pitch),
            rate: Some(rate),
            volume: Some(volume),
        }
    }

    #[test]
    fn high_pitch_high_rate_is_excited() {
        let result = EmotionClassifier::new().classify(None, Some(&pattern(1.3, 1.3, 0.8)));
        assert_eq!(result.emotion, EmotionLabel::Excited);
        assert!((result.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn high_pitch_normal_rate_is_stressed() {
        let result = EmotionClassifier::new().classify(None, Some(&pattern(1.3, 1.0, 0.8)));
        assert_eq!(result.emotion, EmotionLabel::Stressed);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn high_pitch_absent_rate_is_stressed() {
        let voice = VoicePattern {
            pitch: Some(1.3),
            rate: None,
            volume: None,
        };
        let result = EmotionClassifier::new().classify(None, Some(&voice));
        assert_eq!(result.emotion, EmotionLabel::Stressed);
    }

    #[test]
    fn low_pitch_low_rate_is_sad() {
        let result = EmotionClassifier::new().classify(None, Some(&pattern(0.7, 0.7, 0.8)));
        assert_eq!(result.emotion, EmotionLabel::Sad);
        assert!((result.confidence - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn low_pitch_normal_rate_is_calm() {
        let result = EmotionClassifier::new().classify(None, Some(&pattern(0.7, 1.0, 0.8)));
        assert_eq!(result.emotion, EmotionLabel::Calm);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn low_volume_overrides_to_sad() {
        // Both the low-pitch/low-rate rule and the low-volume rule fire;
        // the last-applied rule wins at confidence 0.6.
        let result = EmotionClassifier::new().classify(None, Some(&pattern(0.5, 0.5, 0.3)));
        assert_eq!(result.emotion, EmotionLabel::Sad);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn low_volume_overrides_excited() {
        let result = EmotionClassifier::new().classify(None, Some(&pattern(1.3, 1.3, 0.3)));
        assert_eq!(result.emotion, EmotionLabel::Sad);
        assert!((result.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn voice_overrides_text() {
        let result = EmotionClassifier::new()
            .classify(Some("what a wonderful day"), Some(&pattern(0.7, 0.7, 0.8)));
        assert_eq!(result.emotion, EmotionLabel::Sad);
    }

    #[test]
    fn neutral_voice_keeps_text_result() {
        let result = EmotionClassifier::new()
            .classify(Some("what a wonderful day"), Some(&pattern(1.0, 1.0, 0.8)));
        assert_eq!(result.emotion, EmotionLabel::Happy);
    }

    // ── Statefulness ────────────────────────────────────────────────────

    #[test]
    fn no_evidence_returns_previous_result() {
        let mut classifier = EmotionClassifier::new();
        let first = classifier.classify(Some("feeling great and happy"), None);
        assert_eq!(first.emotion, EmotionLabel::Happy);

        let second = classifier.classify(None, None);
        assert_eq!(second, first);
    }

    #[test]
    fn new_evidence_recomputes_from_scratch() {
        let mut classifier = EmotionClassifier::new();
        classifier.classify(Some("feeling great and happy"), None);

        // Neutral text does not inherit the earlier happy result.
        let result = classifier.classify(Some("the bus was on time"), None);
        assert_eq!(result.emotion, EmotionLabel::Neutral);
    }

    #[test]
    fn reset_returns_to_neutral() {
        let mut classifier = EmotionClassifier::new();
        classifier.classify(Some("so stressed"), None);
        classifier.reset();
        assert_eq!(classifier.last_result().emotion, EmotionLabel::Neutral);
        assert!((classifier.last_result().confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn label_display_names() {
        assert_eq!(EmotionLabel::Neutral.to_string(), "neutral");
        assert_eq!(EmotionLabel::Stressed.to_string(), "stressed");
        assert_eq!(EmotionLabel::ALL.len(), 6);
    }
}
