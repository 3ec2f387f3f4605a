use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "transcript-clip",
    about = "Transcript Clip - Copy the transcript of a YouTube video to the clipboard",
    version,
    long_about = "Finds the caption tracks of a YouTube video, picks the best one (English and human-authored first) and copies its text to the clipboard as a single plain-text transcript."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the transcript of a video to the clipboard
    Copy {
        /// YouTube watch page URL or video id
        #[arg(value_name = "URL_OR_ID")]
        page: String,

        /// Player metadata already extracted from the page (ytInitialPlayerResponse as JSON)
        #[arg(long, value_name = "FILE")]
        player_json: Option<PathBuf>,
    },

    /// Print or save the transcript of a video
    Fetch {
        /// YouTube watch page URL or video id
        #[arg(value_name = "URL_OR_ID")]
        page: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Player metadata already extracted from the page (ytInitialPlayerResponse as JSON)
        #[arg(long, value_name = "FILE")]
        player_json: Option<PathBuf>,
    },

    /// List the caption tracks of a video in selection order
    Tracks {
        /// YouTube watch page URL or video id
        #[arg(value_name = "URL_OR_ID")]
        page: String,

        /// Player metadata already extracted from the page (ytInitialPlayerResponse as JSON)
        #[arg(long, value_name = "FILE")]
        player_json: Option<PathBuf>,
    },

    /// Show or initialize the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long, conflicts_with = "show")]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON with video and track details
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
