//! Transcript Clip - A Rust CLI tool for copying YouTube transcripts to the clipboard
//!
//! This library locates the player metadata embedded in a YouTube watch page, picks the
//! best caption track, downloads its timed text and flattens it into a single plain-text
//! transcript.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod extractors;
pub mod notify;
pub mod output;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use clipboard::{ClipboardStrategy, ClipboardWriter};
pub use config::Config;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use extractors::{CaptionFormat, CaptionSource};
pub use notify::{Notification, NotificationKind, Notifier};
pub use transcript::{Transcript, TranscriptResolver};

/// Result type used by the transcript core
pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Error types specific to transcript retrieval
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Missing input: {0}")]
    Precondition(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No captions: {0}")]
    NoCaptions(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        TranscriptError::Fetch(err.to_string())
    }
}
