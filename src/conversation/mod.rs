//! Conversation state machine for the scripted check-in dialogue.
//!
//! The dialogue is a strictly forward-progressing cycle:
//!
//! ```text
//! Idle → Greeting → InitialQuestion → Listening → Analyzing
//!      → ConfirmingEmotion → [FollowUp →] Recommendation → Closing → Idle
//! ```
//!
//! Every stage advances unconditionally on the next call except
//! `Listening`, which waits for an emotion signal — the one point where the
//! system gathers a full utterance before judging tone. [`ConversationEngine::transition`]
//! is a pure function of the state and its inputs; the only randomness is
//! phrase selection, isolated to the engine's seedable RNG so transitions
//! are reproducible in tests.

pub mod phrases;

use crate::content;
use crate::emotion::EmotionLabel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Named points in the fixed conversation sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Canonical reset state; waiting for activation.
    #[default]
    Idle,
    /// Greeting spoken; waiting to pose the opening question.
    Greeting,
    /// "Tell me about your day" prompt spoken.
    InitialQuestion,
    /// Gathering the free-form utterance; stalls until an emotion arrives.
    Listening,
    /// Emotion captured; about to confirm it with the user.
    Analyzing,
    /// Asking the user to verify the detected emotion.
    ConfirmingEmotion,
    /// Exploring the user's own description of their feelings.
    FollowUp,
    /// Offering mood-matched content.
    Recommendation,
    /// Farewell spoken; next call resets to idle.
    Closing,
}

impl Stage {
    /// Snake-case display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Greeting => "greeting",
            Stage::InitialQuestion => "initial_question",
            Stage::Listening => "listening",
            Stage::Analyzing => "analyzing",
            Stage::ConfirmingEmotion => "confirming_emotion",
            Stage::FollowUp => "follow_up",
            Stage::Recommendation => "recommendation",
            Stage::Closing => "closing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single live conversation value for a session.
///
/// Mutated exclusively by [`ConversationEngine::transition`]; the caller
/// threads it through serially (one in-flight transition per session).
///
/// Invariant: `stage == Idle` implies `detected_emotion` is `None` and
/// `user_responses` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    /// Current dialogue stage.
    pub stage: Stage,
    /// Emotion captured at the `Listening` stage; persists until reset.
    pub detected_emotion: Option<EmotionLabel>,
    /// Raw user utterances collected this session, in order.
    pub user_responses: Vec<String>,
    /// The next prompt to speak/display; empty means "no prompt".
    pub current_question: String,
}

impl ConversationState {
    /// A fresh idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Whole-word affirmative answers at the confirmation gate.
static AFFIRMATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(yes|yeah|yep|correct|right|true|agree|accurate|exactly)\b").unwrap()
});

/// Whole-word acceptance of the recommendation offer.
static WANTS_RECOMMENDATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(yes|yeah|yep|sure|ok|okay|please|recommend|suggestions?)\b").unwrap()
});

/// Drives the check-in dialogue.
///
/// Holds the phrase-selection RNG; everything else lives in the
/// [`ConversationState`] the caller owns.
#[derive(Debug)]
pub struct ConversationEngine {
    rng: StdRng,
}

impl Default for ConversationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationEngine {
    /// Engine with an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed for reproducible phrase selection.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Compute the next conversation state.
    ///
    /// `user_input`, when present and non-empty, is appended to
    /// `user_responses` before the stage logic runs. `detected_emotion` is
    /// consumed only at the `Listening` stage; once stored it persists until
    /// the `Closing → Idle` reset. Never fails: missing-emotion lookups fall
    /// back to neutral, and `Closing` resets to the default state.
    pub fn transition(
        &mut self,
        current: &ConversationState,
        user_input: Option<&str>,
        detected_emotion: Option<EmotionLabel>,
    ) -> ConversationState {
        let mut user_responses = current.user_responses.clone();
        if let Some(input) = user_input {
            if !input.is_empty() {
                user_responses.push(input.to_owned());
            }
        }

        // Emotion used for phrase lookups in the later stages.
        let emotion = current.detected_emotion.unwrap_or_default();

        let next = match current.stage {
            Stage::Idle => ConversationState {
                stage: Stage::Greeting,
                detected_emotion: current.detected_emotion,
                user_responses,
                current_question: self.greeting().to_owned(),
            },

            Stage::Greeting => ConversationState {
                stage: Stage::InitialQuestion,
                detected_emotion: current.detected_emotion,
                user_responses,
                current_question: Self::initial_question().to_owned(),
            },

            Stage::InitialQuestion => ConversationState {
                stage: Stage::Listening,
                detected_emotion: current.detected_emotion,
                user_responses,
                current_question: String::new(),
            },

            Stage::Listening => match detected_emotion {
                // Still gathering the utterance; state is unchanged.
                None => current.clone(),
                Some(emotion) => ConversationState {
                    stage: Stage::Analyzing,
                    detected_emotion: Some(emotion),
                    user_responses,
                    current_question: String::new(),
                },
            },

            Stage::Analyzing => ConversationState {
                stage: Stage::ConfirmingEmotion,
                detected_emotion: current.detected_emotion,
                user_responses,
                current_question: self.confirmation_question(emotion).to_owned(),
            },

            Stage::ConfirmingEmotion => {
                let affirmed = user_input.is_some_and(|input| AFFIRMATIVE.is_match(input));
                if affirmed {
                    ConversationState {
                        stage: Stage::Recommendation,
                        detected_emotion: current.detected_emotion,
                        user_responses,
                        current_question: content::intro_phrase_for(emotion, &mut self.rng)
                            .to_owned(),
                    }
                } else {
                    ConversationState {
                        stage: Stage::FollowUp,
                        detected_emotion: current.detected_emotion,
                        user_responses,
                        current_question: phrases::DESCRIBE_FEELING_PROMPT.to_owned(),
                    }
                }
            }

            Stage::FollowUp => ConversationState {
                stage: Stage::Recommendation,
                detected_emotion: current.detected_emotion,
                user_responses,
                current_question: content::intro_phrase_for(emotion, &mut self.rng).to_owned(),
            },

            Stage::Recommendation => {
                let wants = user_input.is_some_and(|input| WANTS_RECOMMENDATION.is_match(input));
                let current_question = if wants {
                    content::narrative_for(emotion, &mut self.rng)
                } else {
                    phrases::FAREWELL_PROMPT.to_owned()
                };
                ConversationState {
                    stage: Stage::Closing,
                    detected_emotion: current.detected_emotion,
                    user_responses,
                    current_question,
                }
            }

            // Reset branch: everything collected this session is discarded.
            Stage::Closing => ConversationState::default(),
        };

        debug!(from = %current.stage, to = %next.stage, "conversation transition");
        next
    }

    // ── Phrase accessors ────────────────────────────────────────────────

    /// Random opening greeting.
    pub fn greeting(&mut self) -> &'static str {
        pick(&phrases::GREETINGS, &mut self.rng)
    }

    /// The fixed opening question.
    #[must_use]
    pub fn initial_question() -> &'static str {
        phrases::INITIAL_QUESTION
    }

    /// Random acknowledgement of a detected emotion.
    pub fn emotion_response(&mut self, emotion: EmotionLabel) -> &'static str {
        pick(phrases::responses(emotion), &mut self.rng)
    }

    /// Random follow-up question for an emotion.
    pub fn follow_up_question(&mut self, emotion: EmotionLabel) -> &'static str {
        pick(phrases::follow_ups(emotion), &mut self.rng)
    }

    /// Random confirmation question for an emotion.
    pub fn confirmation_question(&mut self, emotion: EmotionLabel) -> &'static str {
        pick(phrases::confirmations(emotion), &mut self.rng)
    }
}

/// Uniform pick from a phrase table.
fn pick<R: Rng>(options: &[&'static str], rng: &mut R) -> &'static str {
    options[rng.gen_range(0..options.len())]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn engine() -> ConversationEngine {
        ConversationEngine::with_seed(42)
    }

    fn state_at(stage: Stage, emotion: Option<EmotionLabel>) -> ConversationState {
        ConversationState {
            stage,
            detected_emotion: emotion,
            user_responses: Vec::new(),
            current_question: String::new(),
        }
    }

    // ── Stage table ─────────────────────────────────────────────────────

    #[test]
    fn idle_advances_to_greeting_with_a_greeting() {
        let next = engine().transition(&ConversationState::new(), None, None);
        assert_eq!(next.stage, Stage::Greeting);
        assert!(phrases::GREETINGS.contains(&next.current_question.as_str()));
    }

    #[test]
    fn greeting_advances_to_initial_question() {
        let next = engine().transition(&state_at(Stage::Greeting, None), None, None);
        assert_eq!(next.stage, Stage::InitialQuestion);
        assert_eq!(next.current_question, phrases::INITIAL_QUESTION);
    }

    #[test]
    fn initial_question_advances_to_listening_with_no_prompt() {
        let next = engine().transition(&state_at(Stage::InitialQuestion, None), None, None);
        assert_eq!(next.stage, Stage::Listening);
        assert!(next.current_question.is_empty());
    }

    #[test]
    fn listening_without_emotion_is_a_no_op() {
        let current = state_at(Stage::Listening, None);
        let mut eng = engine();
        let next = eng.transition(&current, None, None);
        assert_eq!(next, current);
        // Idempotent under repeated calls.
        let again = eng.transition(&next, None, None);
        assert_eq!(again, current);
    }

    #[test]
    fn listening_with_emotion_advances_to_analyzing() {
        let next = engine().transition(
            &state_at(Stage::Listening, None),
            Some("work was a lot today"),
            Some(EmotionLabel::Stressed),
        );
        assert_eq!(next.stage, Stage::Analyzing);
        assert_eq!(next.detected_emotion, Some(EmotionLabel::Stressed));
        assert!(next.current_question.is_empty());
        assert_eq!(next.user_responses, vec!["work was a lot today"]);
    }

    #[test]
    fn analyzing_asks_confirmation_for_the_stored_emotion() {
        let next = engine().transition(
            &state_at(Stage::Analyzing, Some(EmotionLabel::Happy)),
            None,
            None,
        );
        assert_eq!(next.stage, Stage::ConfirmingEmotion);
        assert_eq!(next.detected_emotion, Some(EmotionLabel::Happy));
        assert!(
            phrases::confirmations(EmotionLabel::Happy)
                .contains(&next.current_question.as_str())
        );
    }

    #[test]
    fn analyzing_without_emotion_falls_back_to_neutral_phrasing() {
        let next = engine().transition(&state_at(Stage::Analyzing, None), None, None);
        assert_eq!(next.stage, Stage::ConfirmingEmotion);
        assert!(
            phrases::confirmations(EmotionLabel::Neutral)
                .contains(&next.current_question.as_str())
        );
    }

    #[test]
    fn affirmative_answer_goes_to_recommendation() {
        let next = engine().transition(
            &state_at(Stage::ConfirmingEmotion, Some(EmotionLabel::Sad)),
            Some("Yes, exactly!"),
            None,
        );
        assert_eq!(next.stage, Stage::Recommendation);
        assert!(!next.current_question.is_empty());
    }

    #[test]
    fn disagreement_goes_to_follow_up() {
        let next = engine().transition(
            &state_at(Stage::ConfirmingEmotion, Some(EmotionLabel::Sad)),
            Some("not really"),
            None,
        );
        assert_eq!(next.stage, Stage::FollowUp);
        assert_eq!(next.current_question, phrases::DESCRIBE_FEELING_PROMPT);
    }

    #[test]
    fn missing_input_at_confirmation_counts_as_disagreement() {
        let next = engine().transition(
            &state_at(Stage::ConfirmingEmotion, Some(EmotionLabel::Calm)),
            None,
            None,
        );
        assert_eq!(next.stage, Stage::FollowUp);
    }

    #[test]
    fn affirmative_match_is_whole_word() {
        // "righteous" contains "right" but should not affirm.
        let next = engine().transition(
            &state_at(Stage::ConfirmingEmotion, Some(EmotionLabel::Calm)),
            Some("righteous nonsense"),
            None,
        );
        assert_eq!(next.stage, Stage::FollowUp);
    }

    #[test]
    fn follow_up_advances_to_recommendation() {
        let next = engine().transition(
            &state_at(Stage::FollowUp, Some(EmotionLabel::Excited)),
            Some("mostly just energized"),
            None,
        );
        assert_eq!(next.stage, Stage::Recommendation);
        assert!(!next.current_question.is_empty());
    }

    #[test]
    fn accepting_recommendations_produces_the_narrative() {
        let next = engine().transition(
            &state_at(Stage::Recommendation, Some(EmotionLabel::Stressed)),
            Some("sure, why not"),
            None,
        );
        assert_eq!(next.stage, Stage::Closing);
        assert!(next.current_question.contains("\"Stress Relief Sounds\" playlist"));
        assert!(next.current_question.contains("the \"The Calm Space\" podcast"));
    }

    #[test]
    fn declining_recommendations_produces_the_farewell() {
        let next = engine().transition(
            &state_at(Stage::Recommendation, Some(EmotionLabel::Stressed)),
            Some("no thanks"),
            None,
        );
        assert_eq!(next.stage, Stage::Closing);
        assert_eq!(next.current_question, phrases::FAREWELL_PROMPT);
    }

    #[test]
    fn closing_resets_to_a_pristine_idle_state() {
        let current = ConversationState {
            stage: Stage::Closing,
            detected_emotion: Some(EmotionLabel::Happy),
            user_responses: vec!["a".to_owned(), "b".to_owned()],
            current_question: "farewell".to_owned(),
        };
        let next = engine().transition(&current, Some("bye"), None);
        assert_eq!(next, ConversationState::default());
        assert_eq!(next.stage, Stage::Idle);
        assert!(next.detected_emotion.is_none());
        assert!(next.user_responses.is_empty());
        assert!(next.current_question.is_empty());
    }

    // ── Cross-cutting properties ────────────────────────────────────────

    #[test]
    fn transition_is_total_for_all_non_listening_stages() {
        let mut eng = engine();
        for stage in [
            Stage::Idle,
            Stage::Greeting,
            Stage::InitialQuestion,
            Stage::Analyzing,
            Stage::ConfirmingEmotion,
            Stage::FollowUp,
            Stage::Recommendation,
            Stage::Closing,
        ] {
            let next = eng.transition(&state_at(stage, None), None, None);
            assert_ne!(next.stage, stage, "{stage} should advance");
        }
    }

    #[test]
    fn walk_from_idle_reaches_confirming_emotion() {
        let mut eng = engine();
        let mut state = ConversationState::new();
        state = eng.transition(&state, None, None); // greeting
        state = eng.transition(&state, None, None); // initial_question
        state = eng.transition(&state, None, None); // listening
        state = eng.transition(&state, Some("long day"), Some(EmotionLabel::Sad)); // analyzing
        state = eng.transition(&state, None, None); // confirming_emotion
        assert_eq!(state.stage, Stage::ConfirmingEmotion);
        assert_eq!(state.detected_emotion, Some(EmotionLabel::Sad));
    }

    #[test]
    fn emotion_persists_after_the_listening_step() {
        let mut eng = engine();
        let mut state = state_at(Stage::Listening, None);
        state = eng.transition(&state, None, Some(EmotionLabel::Calm));
        // Later calls do not re-supply the emotion.
        state = eng.transition(&state, None, None);
        state = eng.transition(&state, Some("yes"), None);
        assert_eq!(state.stage, Stage::Recommendation);
        assert_eq!(state.detected_emotion, Some(EmotionLabel::Calm));
    }

    #[test]
    fn user_input_is_appended_at_every_stage() {
        let mut eng = engine();
        let mut state = ConversationState::new();
        state = eng.transition(&state, Some("hello"), None);
        state = eng.transition(&state, Some("hi again"), None);
        assert_eq!(state.user_responses, vec!["hello", "hi again"]);
    }

    #[test]
    fn empty_user_input_is_not_appended() {
        let next = engine().transition(&ConversationState::new(), Some(""), None);
        assert!(next.user_responses.is_empty());
    }

    #[test]
    fn seeded_engines_pick_identical_phrases() {
        let a = ConversationEngine::with_seed(9).transition(&ConversationState::new(), None, None);
        let b = ConversationEngine::with_seed(9).transition(&ConversationState::new(), None, None);
        assert_eq!(a.current_question, b.current_question);
    }

    #[test]
    fn phrase_accessors_draw_from_their_tables() {
        let mut eng = engine();
        for emotion in EmotionLabel::ALL {
            assert!(phrases::responses(emotion).contains(&eng.emotion_response(emotion)));
            assert!(phrases::follow_ups(emotion).contains(&eng.follow_up_question(emotion)));
            assert!(phrases::confirmations(emotion).contains(&eng.confirmation_question(emotion)));
        }
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut eng = engine();
        let mut state = ConversationState::new();
        let inputs: [(Option<&str>, Option<EmotionLabel>); 7] = [
            (None, None),
            (None, None),
            (None, None),
            (Some("pretty good day"), Some(EmotionLabel::Happy)),
            (None, None),
            (Some("yes"), None),
            (Some("sure"), None),
        ];
        for (input, emotion) in inputs {
            state = eng.transition(&state, input, emotion);
        }
        assert_eq!(state.stage, Stage::Closing);
        state = eng.transition(&state, None, None);
        assert_eq!(state, ConversationState::default());
    }
}
