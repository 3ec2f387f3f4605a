use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::{ClipboardConfig, ClipboardStrategyKind};
use crate::{Result, TranscriptError};

/// One way of placing text on the system clipboard
#[async_trait]
pub trait ClipboardStrategy: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Runtime check whether this mechanism can be used here
    fn is_available(&self) -> bool;

    /// Copy text to the clipboard
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// System clipboard through `arboard`
pub struct NativeClipboard;

#[async_trait]
impl ClipboardStrategy for NativeClipboard {
    fn name(&self) -> &'static str {
        "native"
    }

    fn is_available(&self) -> bool {
        arboard::Clipboard::new().is_ok()
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| TranscriptError::Clipboard(format!("clipboard init: {}", e)))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| TranscriptError::Clipboard(format!("clipboard set: {}", e)))?;

        if selection_needs_owner() {
            tracing::warn!("No clipboard program found; text stays on the clipboard only if a clipboard manager is running");
        }
        Ok(())
    }
}

/// Pipes text into a clipboard program such as `pbcopy` or `xclip`
pub struct CommandClipboard {
    candidates: Vec<Vec<String>>,
}

impl CommandClipboard {
    /// Clipboard programs known for the current platform
    pub fn detect() -> Self {
        let mut candidates: Vec<&[&str]> = Vec::new();

        if cfg!(target_os = "macos") {
            candidates.push(&["pbcopy"]);
        } else if cfg!(windows) {
            candidates.push(&["clip"]);
        } else {
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                candidates.push(&["wl-copy"]);
            }
            candidates.push(&["xclip", "-selection", "clipboard"]);
            candidates.push(&["xsel", "--clipboard", "--input"]);
        }

        Self {
            candidates: candidates
                .into_iter()
                .map(|argv| argv.iter().map(|arg| arg.to_string()).collect())
                .collect(),
        }
    }

    /// Use exactly this program and arguments
    pub fn with_command(command: Vec<String>) -> Self {
        Self {
            candidates: vec![command],
        }
    }

    /// First candidate whose program can be found
    fn resolve(&self) -> Option<(PathBuf, &[String])> {
        self.candidates.iter().find_map(|argv| {
            let (program, args) = argv.split_first()?;
            find_program(program).map(|path| (path, args))
        })
    }
}

#[async_trait]
impl ClipboardStrategy for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn is_available(&self) -> bool {
        self.resolve().is_some()
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let (program, args) = self
            .resolve()
            .ok_or_else(|| TranscriptError::Clipboard("no clipboard program found".to_string()))?;

        tracing::debug!("Copying with {}", program.display());

        // Programs like xclip keep running in the background, so their
        // output streams must not be captured.
        let mut child = Command::new(&program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TranscriptError::Clipboard(format!("{}: {}", program.display(), e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| TranscriptError::Clipboard(format!("writing to {}: {}", program.display(), e)))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| TranscriptError::Clipboard(format!("{}: {}", program.display(), e)))?;

        if !status.success() {
            return Err(TranscriptError::Clipboard(format!(
                "{} exited with {}",
                program.display(),
                status
            )));
        }

        Ok(())
    }
}

/// Locate an executable by name on `PATH`, or verify an explicit path
fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", program));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

/// Whether clipboard contents are lost when the writing process exits
fn selection_needs_owner() -> bool {
    !cfg!(any(target_os = "macos", windows))
}

/// Writes text using the first clipboard strategy that works
pub struct ClipboardWriter {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl ClipboardWriter {
    pub fn new(strategies: Vec<Box<dyn ClipboardStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build the strategy chain described by the configuration
    pub fn from_config(config: &ClipboardConfig) -> Self {
        let command = || -> Box<dyn ClipboardStrategy> {
            match &config.command {
                Some(argv) => Box::new(CommandClipboard::with_command(argv.clone())),
                None => Box::new(CommandClipboard::detect()),
            }
        };

        let strategies: Vec<Box<dyn ClipboardStrategy>> = match config.strategy {
            // X11 and Wayland selections die with the process that owns them;
            // clipboard programs keep serving the text after we exit.
            ClipboardStrategyKind::Auto if selection_needs_owner() => {
                vec![command(), Box::new(NativeClipboard)]
            }
            ClipboardStrategyKind::Auto => vec![Box::new(NativeClipboard), command()],
            ClipboardStrategyKind::Native => vec![Box::new(NativeClipboard)],
            ClipboardStrategyKind::Command => vec![command()],
        };

        Self::new(strategies)
    }

    /// Copy text, returning the name of the strategy that succeeded
    pub async fn write(&self, text: &str) -> Result<&'static str> {
        let mut last_error = None;

        for strategy in &self.strategies {
            if !strategy.is_available() {
                tracing::debug!("Clipboard strategy {} unavailable", strategy.name());
                continue;
            }

            match strategy.write_text(text).await {
                Ok(()) => {
                    tracing::debug!("Copied {} bytes with {} clipboard", text.len(), strategy.name());
                    return Ok(strategy.name());
                }
                Err(e) => {
                    tracing::warn!("Clipboard strategy {} failed: {}", strategy.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(TranscriptError::Clipboard(msg)) => TranscriptError::Clipboard(msg),
            Some(other) => TranscriptError::Clipboard(other.to_string()),
            None => TranscriptError::Clipboard("no clipboard mechanism available".to_string()),
        })
    }
}
