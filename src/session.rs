//! Session driver: wires the wake gate, emotion classifier, conversation
//! engine, and content selector together in response to transcript and
//! voice-pattern events.
//!
//! The driver is the headless counterpart of a UI session page: an external
//! speech-recognition layer feeds [`SessionEvent`]s in, and the driver emits
//! [`SessionOutput`]s (prompts to vocalize, detected emotions, content
//! recommendations) on an outbound channel. Events are handled one at a
//! time by a single `tokio::select!` loop, which gives the conversation
//! state machine the serial-invocation guarantee it requires.

use crate::config::CheckinConfig;
use crate::content::{self, ContentItem};
use crate::conversation::{ConversationEngine, ConversationState, Stage};
use crate::emotion::{EmotionClassifier, EmotionLabel, VoicePattern};
use crate::error::{CheckinError, Result};
use crate::wakeword::WakePhraseDetector;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Input events from the speech-recognition / audio-analysis layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A transcript update. Interim transcripts only feed the wake gate;
    /// final transcripts drive the dialogue.
    Transcript {
        text: String,
        is_final: bool,
    },
    /// Latest voice-pattern statistics from the audio analyzer. Stored and
    /// supplied to the classifier with the next final transcript.
    VoicePattern(VoicePattern),
    /// Abandon the session and return to idle.
    Reset,
}

/// Outputs for the UI / speech-synthesis layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutput {
    /// The wake phrase was detected; a check-in is starting.
    Activated,
    /// A prompt to speak/display.
    Prompt(String),
    /// An emotion was inferred from the user's utterance.
    EmotionDetected {
        emotion: EmotionLabel,
        confidence: f32,
    },
    /// Mood-matched catalog items for the detected emotion.
    Recommendations(Vec<ContentItem>),
    /// The session cycled back to idle.
    SessionEnded,
}

/// Drives one check-in session end to end.
pub struct SessionDriver {
    config: CheckinConfig,
    detector: WakePhraseDetector,
    classifier: EmotionClassifier,
    engine: ConversationEngine,
    state: ConversationState,
    last_pattern: Option<VoicePattern>,
}

impl SessionDriver {
    /// Create a driver from config. A configured RNG seed makes prompt
    /// selection reproducible.
    #[must_use]
    pub fn new(config: CheckinConfig) -> Self {
        let engine = match config.session.rng_seed {
            Some(seed) => ConversationEngine::with_seed(seed),
            None => ConversationEngine::new(),
        };
        let detector = WakePhraseDetector::from_config(&config.wakeword);
        Self {
            config,
            detector,
            classifier: EmotionClassifier::new(),
            engine,
            state: ConversationState::new(),
            last_pattern: None,
        }
    }

    /// The current conversation state.
    #[must_use]
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Run the event loop until cancelled or the event channel closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the output channel closes while the driver still
    /// has something to emit.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        outputs: mpsc::Sender<SessionOutput>,
        cancel: CancellationToken,
    ) -> Result<()> {
        info!(
            wake_phrase = %self.config.wakeword.wake_phrase,
            gate_enabled = self.config.wakeword.enabled,
            "session driver started"
        );

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("session driver cancelled");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event, &outputs).await?,
                    None => break,
                },
            }
        }

        Ok(())
    }

    async fn handle_event(
        &mut self,
        event: SessionEvent,
        outputs: &mpsc::Sender<SessionOutput>,
    ) -> Result<()> {
        match event {
            SessionEvent::VoicePattern(pattern) => {
                self.last_pattern = Some(pattern);
            }

            SessionEvent::Reset => {
                debug!("session reset requested");
                self.reset_session();
                send(outputs, SessionOutput::SessionEnded).await?;
            }

            SessionEvent::Transcript { text, is_final } => {
                if self.state.stage == Stage::Idle && !self.detector.is_activated() {
                    let woke = if self.config.wakeword.enabled {
                        self.detector.detect(&text)
                    } else {
                        // Gate disabled: any transcript starts the dialogue.
                        is_final
                    };
                    if woke {
                        self.activate(outputs).await?;
                    }
                } else if is_final {
                    self.advance_dialogue(&text, outputs).await?;
                }
            }
        }
        Ok(())
    }

    /// Start the dialogue: greet, pose the opening question, and settle
    /// into `Listening`. The activating transcript is not treated as a
    /// user response.
    async fn activate(&mut self, outputs: &mpsc::Sender<SessionOutput>) -> Result<()> {
        info!("wake phrase detected, starting check-in");
        send(outputs, SessionOutput::Activated).await?;

        while self.state.stage != Stage::Listening {
            self.state = self.engine.transition(&self.state, None, None);
            if !self.state.current_question.is_empty() {
                send(outputs, SessionOutput::Prompt(self.state.current_question.clone())).await?;
            }
        }
        Ok(())
    }

    /// Advance the conversation with a final user utterance.
    async fn advance_dialogue(
        &mut self,
        text: &str,
        outputs: &mpsc::Sender<SessionOutput>,
    ) -> Result<()> {
        if self.state.stage == Stage::Listening {
            // Judge tone from the full utterance plus the latest voice
            // pattern, acknowledge it, then ask for confirmation.
            let result = self.classifier.classify(Some(text), self.last_pattern.as_ref());
            debug!(emotion = %result.emotion, confidence = result.confidence, "emotion inferred");
            send(
                outputs,
                SessionOutput::EmotionDetected {
                    emotion: result.emotion,
                    confidence: result.confidence,
                },
            )
            .await?;

            self.state = self
                .engine
                .transition(&self.state, Some(text), Some(result.emotion));
            send(
                outputs,
                SessionOutput::Prompt(self.engine.emotion_response(result.emotion).to_owned()),
            )
            .await?;

            // Analyzing advances unconditionally to the confirmation question.
            self.state = self.engine.transition(&self.state, None, None);
            send(outputs, SessionOutput::Prompt(self.state.current_question.clone())).await?;
            return Ok(());
        }

        self.state = self.engine.transition(&self.state, Some(text), None);
        if !self.state.current_question.is_empty() {
            send(outputs, SessionOutput::Prompt(self.state.current_question.clone())).await?;
        }

        if self.state.stage == Stage::Recommendation {
            let emotion = self.state.detected_emotion.unwrap_or_default();
            send(
                outputs,
                SessionOutput::Recommendations(content::recommendations_for(emotion).to_vec()),
            )
            .await?;
        }

        let ended = match self.state.stage {
            Stage::Closing if self.config.session.auto_reset => {
                self.state = self.engine.transition(&self.state, None, None);
                true
            }
            // Caller drove the Closing → Idle step itself.
            Stage::Idle => true,
            _ => false,
        };

        if ended {
            self.reset_session();
            send(outputs, SessionOutput::SessionEnded).await?;
        }
        Ok(())
    }

    /// Return everything to the pristine idle state.
    fn reset_session(&mut self) {
        self.state = ConversationState::new();
        self.detector.reset();
        self.classifier.reset();
        self.last_pattern = None;
    }
}

async fn send(outputs: &mpsc::Sender<SessionOutput>, output: SessionOutput) -> Result<()> {
    outputs
        .send(output)
        .await
        .map_err(|e| CheckinError::Channel(e.to_string()))
}
