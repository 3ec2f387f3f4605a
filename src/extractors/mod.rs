use async_trait::async_trait;
use url::Url;

pub mod youtube;

pub use youtube::YoutubeSource;

use crate::transcript::flatten::TimedText;
use crate::{Result, TranscriptError};

/// Timed text formats a caption track can be requested in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Structured JSON events with text segments
    Json3,
}

impl CaptionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionFormat::Json3 => "json3",
        }
    }
}

/// Network collaborators the transcript resolver depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch the raw markup of the watch page for a video
    async fn fetch_watch_page(&self, video_id: &str) -> Result<String>;

    /// Fetch the timed text behind a caption track location
    async fn fetch_timed_text(&self, base_url: &str, format: CaptionFormat) -> Result<TimedText>;
}

/// Add the format qualifier to a caption track location
pub fn timed_text_url(base_url: &str, format: CaptionFormat) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| TranscriptError::Fetch(format!("invalid caption URL {}: {}", base_url, e)))?;

    url.query_pairs_mut().append_pair("fmt", format.as_str());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_text_url_appends_format() {
        let url = timed_text_url(
            "https://www.youtube.com/api/timedtext?v=abc&lang=en",
            CaptionFormat::Json3,
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=json3");
    }

    #[test]
    fn test_timed_text_url_without_query() {
        let url = timed_text_url("https://example.com/timedtext", CaptionFormat::Json3).unwrap();
        assert_eq!(url.query(), Some("fmt=json3"));
    }

    #[test]
    fn test_timed_text_url_rejects_relative() {
        let err = timed_text_url("/api/timedtext?v=abc", CaptionFormat::Json3).unwrap_err();
        assert!(matches!(err, TranscriptError::Fetch(_)));
    }
}
