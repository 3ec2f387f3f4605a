use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::tracks::CaptionTrack;
use crate::{Result, TranscriptError};

/// Global assignment of the player response, ended by a statement terminator
/// followed by the next `var meta`/`var head`, a closing script tag or a newline.
static PLAYER_RESPONSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ytInitialPlayerResponse\s*=\s*(\{.+?\})\s*;\s*(?:var\s+(?:meta|head)|</script|\n)")
        .expect("player response pattern is valid")
});

/// Player metadata embedded in a watch page as `ytInitialPlayerResponse`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetadata {
    #[serde(default)]
    pub video_details: Option<VideoDetails>,

    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(default)]
    pub video_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    #[serde(default)]
    pub player_captions_tracklist_renderer: Option<CaptionTracklist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTracklist {
    #[serde(default)]
    pub caption_tracks: Option<Vec<CaptionTrack>>,
}

impl PlayerMetadata {
    /// Identifier of the video this metadata describes
    pub fn video_id(&self) -> Option<&str> {
        self.video_details.as_ref()?.video_id.as_deref()
    }

    /// Whether this metadata belongs to `video_id`
    pub fn describes(&self, video_id: &str) -> bool {
        self.video_id() == Some(video_id)
    }

    pub fn title(&self) -> Option<&str> {
        self.video_details.as_ref()?.title.as_deref()
    }

    /// Caption tracks, or `None` when the captions section is missing or empty
    pub fn caption_tracks(&self) -> Option<&[CaptionTrack]> {
        self.captions
            .as_ref()?
            .player_captions_tracklist_renderer
            .as_ref()?
            .caption_tracks
            .as_deref()
            .filter(|tracks| !tracks.is_empty())
    }
}

/// Extract the embedded player metadata from raw watch page markup
pub fn extract_player_metadata(markup: &str) -> Result<PlayerMetadata> {
    let captures = PLAYER_RESPONSE_RE
        .captures(markup)
        .ok_or_else(|| TranscriptError::Parse("unable to locate player metadata".to_string()))?;

    let json = &captures[1];
    tracing::debug!("Found embedded player metadata ({} bytes)", json.len());

    serde_json::from_str(json)
        .map_err(|e| TranscriptError::Parse(format!("invalid player metadata: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_JSON: &str = r#"{"videoDetails":{"videoId":"abc123def45","title":"Demo"},"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc123def45&lang=en","languageCode":"en"}]}}}"#;

    #[test]
    fn test_extract_before_script_close() {
        let html = format!(
            "<html><script>var ytInitialPlayerResponse = {};</script><div></div></html>",
            PLAYER_JSON
        );
        let meta = extract_player_metadata(&html).unwrap();
        assert_eq!(meta.video_id(), Some("abc123def45"));
        assert_eq!(meta.title(), Some("Demo"));
        assert_eq!(meta.caption_tracks().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_before_var_meta() {
        let html = format!(
            "<script>var ytInitialPlayerResponse = {} ; var meta = document.createElement('meta');</script>",
            PLAYER_JSON
        );
        let meta = extract_player_metadata(&html).unwrap();
        assert!(meta.describes("abc123def45"));
    }

    #[test]
    fn test_extract_before_newline() {
        let html = format!("ytInitialPlayerResponse={};\nvar other = 1;", PLAYER_JSON);
        assert!(extract_player_metadata(&html).is_ok());
    }

    #[test]
    fn test_missing_assignment() {
        let err = extract_player_metadata("<html><body>nothing here</body></html>").unwrap_err();
        match err {
            TranscriptError::Parse(msg) => assert_eq!(msg, "unable to locate player metadata"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_assignment_without_terminator() {
        let html = format!("var ytInitialPlayerResponse = {}", PLAYER_JSON);
        assert!(matches!(extract_player_metadata(&html), Err(TranscriptError::Parse(_))));
    }

    #[test]
    fn test_invalid_json() {
        let html = "var ytInitialPlayerResponse = {not json};</script>";
        assert!(matches!(extract_player_metadata(html), Err(TranscriptError::Parse(_))));
    }

    #[test]
    fn test_caption_tracks_absent_or_empty() {
        let none: PlayerMetadata = serde_json::from_str(r#"{"videoDetails":{"videoId":"x"}}"#).unwrap();
        assert!(none.caption_tracks().is_none());

        let no_renderer: PlayerMetadata = serde_json::from_str(r#"{"captions":{}}"#).unwrap();
        assert!(no_renderer.caption_tracks().is_none());

        let empty: PlayerMetadata = serde_json::from_str(
            r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[]}}}"#,
        )
        .unwrap();
        assert!(empty.caption_tracks().is_none());
    }

    #[test]
    fn test_describes_without_video_details() {
        let meta = PlayerMetadata::default();
        assert!(!meta.describes("abc123def45"));
    }
}
