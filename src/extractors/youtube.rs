use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;

use super::{timed_text_url, CaptionFormat, CaptionSource};
use crate::config::HttpConfig;
use crate::transcript::flatten::TimedText;
use crate::{Result, TranscriptError};

/// Fetches watch pages and timed text from YouTube over HTTP
pub struct YoutubeSource {
    client: Client,
    watch_url: String,
}

impl YoutubeSource {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| TranscriptError::Fetch(format!("invalid Accept-Language header: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            watch_url: config.watch_url.clone(),
        })
    }

    /// Canonical watch page address for a video
    pub fn watch_page_url(&self, video_id: &str) -> String {
        format!("{}?v={}", self.watch_url, urlencoding::encode(video_id))
    }
}

#[async_trait]
impl CaptionSource for YoutubeSource {
    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let url = self.watch_page_url(video_id);
        tracing::debug!("Fetching watch page: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(TranscriptError::Fetch(format!(
                "watch page request failed: HTTP {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    async fn fetch_timed_text(&self, base_url: &str, format: CaptionFormat) -> Result<TimedText> {
        let url = timed_text_url(base_url, format)?;
        tracing::debug!("Fetching timed text ({}) from {}", format.as_str(), url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TranscriptError::Fetch(format!(
                "caption request failed: HTTP {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| TranscriptError::Fetch(format!("malformed caption data: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_page_url() {
        let source = YoutubeSource::new(&HttpConfig::default()).unwrap();
        assert_eq!(
            source.watch_page_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_page_url_encodes_id() {
        let source = YoutubeSource::new(&HttpConfig::default()).unwrap();
        assert_eq!(
            source.watch_page_url("a&b"),
            "https://www.youtube.com/watch?v=a%26b"
        );
    }

    #[test]
    fn test_rejects_bad_header() {
        let config = HttpConfig {
            accept_language: "en\nX-Injected: 1".to_string(),
            ..HttpConfig::default()
        };
        assert!(matches!(YoutubeSource::new(&config), Err(TranscriptError::Fetch(_))));
    }
}
