use url::Url;

use crate::{Result, TranscriptError};

/// Message shown when the page does not carry a video id
pub const MISSING_VIDEO_ID: &str = "Could not find video ID. Make sure you're on a YouTube video page.";

/// Host the tool acts on; subdomains such as `m.` and `music.` match too
const YOUTUBE_HOST: &str = "youtube.com";

/// Whether a URL matches `*://*.youtube.com/*`
pub fn is_youtube_page(url: &Url) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == YOUTUBE_HOST || host.ends_with(&format!(".{}", YOUTUBE_HOST))
        }
        None => false,
    }
}

/// Value of the `v` query parameter, if present and non-empty
pub fn video_id_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Whether input has the shape of a bare video id
pub fn looks_like_video_id(input: &str) -> bool {
    input.len() == 11
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Video id from a watch page URL or a bare id
pub fn video_id_from_input(input: &str) -> Result<String> {
    let input = input.trim();

    if looks_like_video_id(input) {
        return Ok(input.to_string());
    }

    let url = Url::parse(input).map_err(|_| TranscriptError::Precondition(MISSING_VIDEO_ID.to_string()))?;

    if !is_youtube_page(&url) {
        let domain = extract_domain(&url).unwrap_or_else(|| input.to_string());
        return Err(TranscriptError::Precondition(format!(
            "{} is not a YouTube page",
            domain
        )));
    }

    video_id_from_url(&url).ok_or_else(|| TranscriptError::Precondition(MISSING_VIDEO_ID.to_string()))
}

/// Extract domain from URL for display purposes
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
}
