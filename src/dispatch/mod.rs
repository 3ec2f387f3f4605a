use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::clipboard::ClipboardWriter;
use crate::notify::{Notification, Notifier};
use crate::transcript::{CaptionTrack, PlayerMetadata, Transcript, TranscriptResolver};
use crate::utils::video_id_from_input;
use crate::{Result, TranscriptError};

pub const COPIED_MESSAGE: &str = "Transcript copied to clipboard!";
pub const EXTRACT_FAILED_MESSAGE: &str =
    "Error: Could not extract transcript. Make sure the video has captions available.";
pub const CLIPBOARD_FAILED_MESSAGE: &str = "Error: Could not copy transcript to clipboard.";

/// Result of one copy action
#[derive(Debug)]
pub enum DispatchOutcome {
    Copied {
        video_id: String,
        chars: usize,
        strategy: &'static str,
    },
    Failed(TranscriptError),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Copied { .. })
    }
}

/// Runs a resolution for a page and hands the result to the clipboard and notifier
pub struct Dispatcher {
    resolver: TranscriptResolver,
    clipboard: ClipboardWriter,
    notifier: Arc<dyn Notifier>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(resolver: TranscriptResolver, clipboard: ClipboardWriter, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            resolver,
            clipboard,
            notifier,
            timeout: None,
        }
    }

    /// Bound the whole resolution, including both fetches
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the transcript of the video a page points to
    pub async fn fetch(&self, page: &str, local: Option<PlayerMetadata>) -> Result<Transcript> {
        let video_id = video_id_from_input(page)?;
        tracing::info!("Resolving transcript for video {}", video_id);

        self.bounded(self.resolver.resolve(&video_id, local)).await
    }

    /// Caption tracks of the video a page points to, in selection order
    pub async fn tracks(&self, page: &str, local: Option<PlayerMetadata>) -> Result<(String, Vec<CaptionTrack>)> {
        let video_id = video_id_from_input(page)?;
        let tracks = self.bounded(self.resolver.list_tracks(&video_id, local)).await?;
        Ok((video_id, tracks))
    }

    /// Apply the configured timeout to a resolution step
    async fn bounded<T>(&self, work: impl Future<Output = Result<T>>) -> Result<T> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
                TranscriptError::Fetch(format!("timed out after {}s", limit.as_secs_f64()))
            })?,
            None => work.await,
        }
    }

    /// Copy the transcript of a page to the clipboard and tell the user
    pub async fn dispatch(&self, page: &str, local: Option<PlayerMetadata>) -> DispatchOutcome {
        let outcome = match self.copy(page, local).await {
            Ok((transcript, strategy)) => DispatchOutcome::Copied {
                chars: transcript.text.chars().count(),
                video_id: transcript.video_id,
                strategy,
            },
            Err(e) => {
                tracing::error!("Error extracting transcript: {}", e);
                DispatchOutcome::Failed(e)
            }
        };

        self.notifier.notify(notification_for(&outcome)).await;
        outcome
    }

    async fn copy(&self, page: &str, local: Option<PlayerMetadata>) -> Result<(Transcript, &'static str)> {
        let transcript = self.fetch(page, local).await?;
        let strategy = self.clipboard.write(&transcript.text).await?;
        Ok((transcript, strategy))
    }
}

fn notification_for(outcome: &DispatchOutcome) -> Notification {
    match outcome {
        DispatchOutcome::Copied { .. } => Notification::success(COPIED_MESSAGE),
        DispatchOutcome::Failed(TranscriptError::Precondition(msg)) => Notification::error(msg.clone()),
        DispatchOutcome::Failed(TranscriptError::Clipboard(_)) => Notification::error(CLIPBOARD_FAILED_MESSAGE),
        DispatchOutcome::Failed(_) => Notification::error(EXTRACT_FAILED_MESSAGE),
    }
}
