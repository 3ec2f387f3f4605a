use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_clip::cli::{Cli, Commands};
use transcript_clip::clipboard::ClipboardWriter;
use transcript_clip::config::Config;
use transcript_clip::extractors::YoutubeSource;
use transcript_clip::notify::TerminalNotifier;
use transcript_clip::transcript::{PlayerMetadata, TranscriptResolver};
use transcript_clip::{output, DispatchOutcome, Dispatcher};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "transcript_clip=debug"
    } else {
        "transcript_clip=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().await?;

    match cli.command {
        Commands::Copy { page, player_json } => {
            let local = load_player_json(player_json.as_deref())?;
            let dispatcher = build_dispatcher(&config, cli.quiet)?;

            if let DispatchOutcome::Copied { video_id, chars, strategy } = dispatcher.dispatch(&page, local).await {
                tracing::info!("Copied {} characters from {} using {} clipboard", chars, video_id, strategy);
            } else {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Fetch {
            page,
            output: output_path,
            format,
            player_json,
        } => {
            let local = load_player_json(player_json.as_deref())?;
            let dispatcher = build_dispatcher(&config, cli.quiet)?;

            let transcript = match dispatcher.fetch(&page, local).await {
                Ok(transcript) => transcript,
                Err(e) => {
                    tracing::error!("Error extracting transcript: {}", e);
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };

            match output_path {
                Some(path) => {
                    output::save_to_file(&transcript, &path, &format).await?;
                    println!("Transcript saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&transcript, &format)?;
                }
            }
        }
        Commands::Tracks { page, player_json } => {
            let local = load_player_json(player_json.as_deref())?;
            let dispatcher = build_dispatcher(&config, cli.quiet)?;

            match dispatcher.tracks(&page, local).await {
                Ok((video_id, tracks)) => {
                    println!("Caption tracks for {}:", video_id);
                    println!("{}", output::format_tracks(&tracks));
                }
                Err(e) => {
                    tracing::error!("Error listing caption tracks: {}", e);
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Config { show, init } => {
            if init {
                let path = config.save().await?;
                println!("Configuration written to: {}", path.display());
            } else if show {
                config.display();
            } else {
                println!("Configuration file: {}", Config::config_path()?.display());
                println!("Use --show to print the effective settings or --init to write the defaults.");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn build_dispatcher(config: &Config, quiet: bool) -> Result<Dispatcher> {
    let source = YoutubeSource::new(&config.http).context("Failed to create HTTP client")?;
    let resolver = TranscriptResolver::with_language(
        Arc::new(source),
        config.transcript.preferred_language.clone(),
    );

    Ok(Dispatcher::new(
        resolver,
        ClipboardWriter::from_config(&config.clipboard),
        Arc::new(TerminalNotifier::new(&config.notify, quiet)),
    )
    .with_timeout(config.http.request_timeout_secs.map(Duration::from_secs)))
}

fn load_player_json(path: Option<&Path>) -> Result<Option<PlayerMetadata>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let content = fs_err::read_to_string(path).context("Failed to read player metadata")?;
    let metadata = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse player metadata in {}", path.display()))?;

    Ok(Some(metadata))
}
