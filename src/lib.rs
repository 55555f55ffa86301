//! MindMosaic: voice-driven wellness check-in engine.
//!
//! This crate provides the conversational core of a hands-free daily
//! check-in: a wake-phrase gate opens a short scripted dialogue, an
//! emotion classifier judges the user's tone from words and voice
//! statistics, and a content selector offers mood-matched listening
//! recommendations.
//!
//! # Architecture
//!
//! The pieces are plain synchronous state machines composed by an async
//! session driver:
//! - **Wake gate**: Normalized substring/fuzzy match with a one-shot latch
//! - **Conversation engine**: Fixed stage cycle from greeting to farewell
//! - **Emotion classifier**: Keyword sets plus voice-pattern rules
//! - **Content selector**: Static catalog keyed by emotion label
//! - **Session driver**: `tokio` event loop wiring the stages together

pub mod config;
pub mod content;
pub mod conversation;
pub mod emotion;
pub mod error;
pub mod session;
pub mod wakeword;

pub use config::CheckinConfig;
pub use content::{ContentCategory, ContentItem};
pub use conversation::{ConversationEngine, ConversationState, Stage};
pub use emotion::{EmotionClassifier, EmotionLabel, EmotionResult, VoicePattern};
pub use error::{CheckinError, Result};
pub use session::{SessionDriver, SessionEvent, SessionOutput};
pub use wakeword::WakePhraseDetector;
