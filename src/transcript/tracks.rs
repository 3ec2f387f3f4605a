use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// `kind` value YouTube uses for auto-generated captions
pub const ASR_KIND: &str = "asr";

/// One selectable caption stream of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// Language code such as `en` or `pt-BR`
    #[serde(default)]
    pub language_code: String,

    /// `asr` for automatic speech recognition, absent for manual tracks
    #[serde(default)]
    pub kind: Option<String>,

    /// Location of the timed text for this track, empty when the player omits it
    #[serde(default)]
    pub base_url: String,

    /// Display name shown by the player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TrackName>,
}

/// Player display name, either plain or split into runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    #[serde(default)]
    pub simple_text: Option<String>,

    #[serde(default)]
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub text: String,
}

impl CaptionTrack {
    /// Whether this track was generated by speech recognition
    pub fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some(ASR_KIND)
    }

    /// Human readable label, falling back to the language code
    pub fn label(&self) -> String {
        match &self.name {
            Some(TrackName { simple_text: Some(text), .. }) => text.clone(),
            Some(TrackName { runs, .. }) if !runs.is_empty() => {
                runs.iter().map(|run| run.text.as_str()).collect()
            }
            _ => self.language_code.clone(),
        }
    }
}

/// Order two tracks: preferred language first, then manual before auto-generated.
///
/// Tracks that tie on both keys compare equal so a stable sort keeps their
/// original order.
pub fn compare_tracks(a: &CaptionTrack, b: &CaptionTrack, preferred_language: &str) -> Ordering {
    let a_preferred = a.language_code == preferred_language;
    let b_preferred = b.language_code == preferred_language;

    b_preferred
        .cmp(&a_preferred)
        .then_with(|| a.is_auto_generated().cmp(&b.is_auto_generated()))
}

/// Sort tracks in selection order
pub fn sort_tracks(tracks: &mut [CaptionTrack], preferred_language: &str) {
    // slice::sort_by is stable
    tracks.sort_by(|a, b| compare_tracks(a, b, preferred_language));
}

/// Pick the single track a transcript is fetched from
pub fn select_track(mut tracks: Vec<CaptionTrack>, preferred_language: &str) -> Option<CaptionTrack> {
    sort_tracks(&mut tracks, preferred_language);
    tracks.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str, kind: Option<&str>, url: &str) -> CaptionTrack {
        CaptionTrack {
            language_code: lang.to_string(),
            kind: kind.map(str::to_string),
            base_url: url.to_string(),
            name: None,
        }
    }

    fn order(tracks: &[CaptionTrack]) -> Vec<&str> {
        tracks.iter().map(|t| t.base_url.as_str()).collect()
    }

    #[test]
    fn test_sort_is_stable() {
        let mut tracks = vec![
            track("en", None, "en-manual"),
            track("en", Some("asr"), "en-asr"),
            track("fr", None, "fr-manual"),
        ];
        sort_tracks(&mut tracks, "en");
        assert_eq!(order(&tracks), ["en-manual", "en-asr", "fr-manual"]);
    }

    #[test]
    fn test_equal_tracks_keep_original_order() {
        let mut tracks = vec![
            track("de", None, "first"),
            track("fr", None, "second"),
            track("es", None, "third"),
        ];
        sort_tracks(&mut tracks, "en");
        assert_eq!(order(&tracks), ["first", "second", "third"]);
    }

    #[test]
    fn test_english_manual_preferred() {
        let tracks = vec![
            track("es", Some("asr"), "es-asr"),
            track("en", Some("asr"), "en-asr"),
            track("en", None, "en-manual"),
        ];
        let selected = select_track(tracks, "en").unwrap();
        assert_eq!(selected.base_url, "en-manual");
    }

    #[test]
    fn test_language_outranks_manual() {
        let tracks = vec![track("fr", None, "fr-manual"), track("en", Some("asr"), "en-asr")];
        let selected = select_track(tracks, "en").unwrap();
        assert_eq!(selected.base_url, "en-asr");
    }

    #[test]
    fn test_manual_preferred_without_english() {
        let tracks = vec![track("ja", Some("asr"), "ja-asr"), track("ko", None, "ko-manual")];
        let selected = select_track(tracks, "en").unwrap();
        assert_eq!(selected.base_url, "ko-manual");
    }

    #[test]
    fn test_regional_variant_is_not_preferred() {
        let mut tracks = vec![track("en-GB", None, "en-gb"), track("en", Some("asr"), "en")];
        sort_tracks(&mut tracks, "en");
        assert_eq!(order(&tracks), ["en", "en-gb"]);
    }

    #[test]
    fn test_custom_preferred_language() {
        let tracks = vec![track("en", None, "en"), track("de", None, "de")];
        let selected = select_track(tracks, "de").unwrap();
        assert_eq!(selected.base_url, "de");
    }

    #[test]
    fn test_select_from_empty() {
        assert!(select_track(Vec::new(), "en").is_none());
    }

    #[test]
    fn test_unknown_kind_counts_as_manual() {
        let tracks = vec![track("en", Some("asr"), "asr"), track("en", Some("forced"), "forced")];
        let selected = select_track(tracks, "en").unwrap();
        assert_eq!(selected.base_url, "forced");
    }

    #[test]
    fn test_label() {
        let mut t = track("en", None, "u");
        assert_eq!(t.label(), "en");

        t.name = Some(TrackName {
            simple_text: None,
            runs: vec![
                TextRun { text: "English ".into() },
                TextRun { text: "(auto-generated)".into() },
            ],
        });
        assert_eq!(t.label(), "English (auto-generated)");

        t.name = Some(TrackName { simple_text: Some("English".into()), runs: vec![] });
        assert_eq!(t.label(), "English");
    }

    #[test]
    fn test_deserialize_track() {
        let json = r#"{"baseUrl":"https://x/api/timedtext?v=1","languageCode":"en","kind":"asr","isTranslatable":true}"#;
        let t: CaptionTrack = serde_json::from_str(json).unwrap();
        assert!(t.is_auto_generated());
        assert_eq!(t.language_code, "en");
    }

    #[test]
    fn test_incomplete_track_still_parses() {
        let json = r#"[
            {"baseUrl":"https://x/api/timedtext?v=1&lang=en","languageCode":"en"},
            {"languageCode":"fr"},
            {"baseUrl":"https://x/api/timedtext?v=1"}
        ]"#;
        let tracks: Vec<CaptionTrack> = serde_json::from_str(json).unwrap();
        assert_eq!(tracks[1].base_url, "");
        assert_eq!(tracks[2].language_code, "");

        let selected = select_track(tracks, "en").unwrap();
        assert_eq!(selected.base_url, "https://x/api/timedtext?v=1&lang=en");
    }
}
