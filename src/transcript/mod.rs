use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod flatten;
pub mod metadata;
pub mod tracks;

pub use flatten::{flatten_events, CaptionEvent, Segment, TimedText};
pub use metadata::{extract_player_metadata, PlayerMetadata};
pub use tracks::{compare_tracks, select_track, sort_tracks, CaptionTrack};

use crate::extractors::{CaptionFormat, CaptionSource};
use crate::{Result, TranscriptError};

/// Language preferred when choosing between caption tracks
pub const DEFAULT_LANGUAGE: &str = "en";

/// A resolved transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video the transcript belongs to
    pub video_id: String,

    /// Title from the player metadata, if present
    pub title: Option<String>,

    /// Caption track the text was taken from
    pub track: CaptionTrack,

    /// Flattened transcript text
    pub text: String,
}

/// Resolves a video id into flattened transcript text
pub struct TranscriptResolver {
    source: Arc<dyn CaptionSource>,
    preferred_language: String,
}

impl TranscriptResolver {
    pub fn new(source: Arc<dyn CaptionSource>) -> Self {
        Self::with_language(source, DEFAULT_LANGUAGE)
    }

    pub fn with_language(source: Arc<dyn CaptionSource>, preferred_language: impl Into<String>) -> Self {
        Self {
            source,
            preferred_language: preferred_language.into(),
        }
    }

    pub fn preferred_language(&self) -> &str {
        &self.preferred_language
    }

    /// Use `local` when it describes `video_id`, otherwise scrape the watch page
    pub async fn player_metadata(
        &self,
        video_id: &str,
        local: Option<PlayerMetadata>,
    ) -> Result<PlayerMetadata> {
        match local {
            Some(metadata) if metadata.describes(video_id) => {
                tracing::debug!("Using local player metadata for {}", video_id);
                Ok(metadata)
            }
            stale => {
                if let Some(metadata) = stale {
                    tracing::debug!(
                        "Local player metadata is for {:?}, refetching {}",
                        metadata.video_id(),
                        video_id
                    );
                }
                let markup = self.source.fetch_watch_page(video_id).await?;
                extract_player_metadata(&markup)
            }
        }
    }

    /// Caption tracks of a video in selection order
    pub async fn list_tracks(
        &self,
        video_id: &str,
        local: Option<PlayerMetadata>,
    ) -> Result<Vec<CaptionTrack>> {
        let metadata = self.player_metadata(video_id, local).await?;
        let mut tracks = available_tracks(&metadata, video_id)?;
        sort_tracks(&mut tracks, &self.preferred_language);
        Ok(tracks)
    }

    /// Resolve the transcript of `video_id`
    pub async fn resolve(&self, video_id: &str, local: Option<PlayerMetadata>) -> Result<Transcript> {
        let metadata = self.player_metadata(video_id, local).await?;
        let tracks = available_tracks(&metadata, video_id)?;
        tracing::debug!("{} caption track(s) available for {}", tracks.len(), video_id);

        let track = select_track(tracks, &self.preferred_language)
            .ok_or_else(|| no_captions(video_id))?;
        tracing::debug!(
            "Selected caption track: lang={} kind={}",
            track.language_code,
            track.kind.as_deref().unwrap_or("manual")
        );

        if track.base_url.trim().is_empty() {
            return Err(TranscriptError::Fetch(format!(
                "selected caption track ({}) has no location",
                track.language_code
            )));
        }

        let timed_text = self
            .source
            .fetch_timed_text(&track.base_url, CaptionFormat::Json3)
            .await?;
        let text = flatten_events(&timed_text.events);

        tracing::info!(
            "Resolved transcript for {} ({} events, {} chars)",
            video_id,
            timed_text.events.len(),
            text.chars().count()
        );

        Ok(Transcript {
            video_id: video_id.to_string(),
            title: metadata.title().map(str::to_string),
            track,
            text,
        })
    }
}

fn available_tracks(metadata: &PlayerMetadata, video_id: &str) -> Result<Vec<CaptionTrack>> {
    metadata
        .caption_tracks()
        .map(<[CaptionTrack]>::to_vec)
        .ok_or_else(|| no_captions(video_id))
}

fn no_captions(video_id: &str) -> TranscriptError {
    TranscriptError::NoCaptions(format!("no captions available for video {}", video_id))
}
