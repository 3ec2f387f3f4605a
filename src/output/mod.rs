use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::transcript::{CaptionTrack, Transcript};

/// Render a transcript in the requested format
pub fn format_transcript(transcript: &Transcript, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(transcript.text.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(transcript)
            .context("Failed to serialize transcript"),
    }
}

/// Save transcript to file
pub async fn save_to_file(transcript: &Transcript, path: &Path, format: &OutputFormat) -> Result<()> {
    let content = format_transcript(transcript, format)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print transcript to console
pub fn print_to_console(transcript: &Transcript, format: &OutputFormat) -> Result<()> {
    let content = format_transcript(transcript, format)?;
    println!("{}", content);
    Ok(())
}

/// One line per track, the selected one marked with `*`
pub fn format_tracks(tracks: &[CaptionTrack]) -> String {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if i == 0 { '*' } else { ' ' };
            let kind = if track.is_auto_generated() { "auto" } else { "manual" };
            format!("{} {:<8} {:<6} {}", marker, track.language_code, kind, track.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
