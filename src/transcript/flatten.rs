use serde::{Deserialize, Serialize};

/// Timed text document as served with `fmt=json3`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedText {
    pub events: Vec<CaptionEvent>,
}

/// One timed unit of caption data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionEvent {
    #[serde(default)]
    pub t_start_ms: Option<u64>,

    #[serde(default)]
    pub d_duration_ms: Option<u64>,

    /// Text fragments; absent on timing-only events
    #[serde(default)]
    pub segs: Option<Vec<Segment>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub utf8: String,
}

/// Zero-width space, non-joiner, joiner and byte order mark
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Flatten caption events into a single normalized string.
///
/// Events without segments are skipped. Segments of one event are joined with a
/// space, as are the events themselves, after which invisible characters are
/// removed and every whitespace run becomes one space.
pub fn flatten_events(events: &[CaptionEvent]) -> String {
    let joined = events
        .iter()
        .filter_map(|event| event.segs.as_ref())
        .map(|segs| {
            segs.iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" ");

    normalize_text(&joined)
}

/// Whitespace as understood by web regular expressions: Unicode `White_Space`
/// without NEL (U+0085)
fn is_collapsible_whitespace(c: char) -> bool {
    c.is_whitespace() && c != '\u{0085}'
}

/// Strip invisible characters and collapse whitespace runs
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars().filter(|c| !is_invisible(*c)) {
        if is_collapsible_whitespace(c) {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}
