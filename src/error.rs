//! Error types for the check-in engine.
//!
//! The core components (classifier, wake gate, conversation engine, content
//! selector) never fail: unexpected input degrades to a defined default.
//! Errors exist only at the edges, in config I/O and session channel
//! plumbing.

/// Top-level error type for the check-in system.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    /// Configuration error (parse failure, bad value).
    #[error("config error: {0}")]
    Config(String),

    /// Session driver error.
    #[error("session error: {0}")]
    Session(String),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CheckinError>;
