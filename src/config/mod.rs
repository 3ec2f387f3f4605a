use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::transcript::DEFAULT_LANGUAGE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client settings
    pub http: HttpConfig,

    /// Transcript selection settings
    pub transcript: TranscriptConfig,

    /// Clipboard settings
    pub clipboard: ClipboardConfig,

    /// Status message settings
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Accept-Language header, controls the language of the watch page
    pub accept_language: String,

    /// Canonical watch page address, the video id is passed as `v`
    pub watch_url: String,

    /// Upper bound for one whole resolution, unlimited when unset
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Caption language picked first when several tracks exist
    pub preferred_language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardStrategyKind {
    /// Native clipboard first, clipboard programs as fallback
    #[default]
    Auto,
    /// Native clipboard only
    Native,
    /// Clipboard programs only
    Command,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub strategy: ClipboardStrategyKind,

    /// Program and arguments receiving the text on stdin, replaces detection
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// How long a message stays visible
    pub display_ms: u64,

    /// How long a message stays dimmed before it is removed
    pub fade_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            watch_url: "https://www.youtube.com/watch".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            preferred_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            display_ms: 2500,
            fade_ms: 500,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub async fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("transcript-clip").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let watch_url = Url::parse(&self.http.watch_url)
            .with_context(|| format!("Invalid watch URL: {}", self.http.watch_url))?;

        if !matches!(watch_url.scheme(), "http" | "https") {
            anyhow::bail!("Watch URL must use HTTP or HTTPS protocol");
        }

        if self.transcript.preferred_language.trim().is_empty() {
            anyhow::bail!("Preferred caption language must not be empty");
        }

        if let Some(command) = &self.clipboard.command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                anyhow::bail!("Clipboard command must name a program");
            }
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Watch URL: {}", self.http.watch_url);
        println!("  Accept-Language: {}", self.http.accept_language);
        match self.http.request_timeout_secs {
            Some(secs) => println!("  Timeout: {}s", secs),
            None => println!("  Timeout: none"),
        }
        println!("  Preferred Language: {}", self.transcript.preferred_language);
        println!("  Clipboard Strategy: {:?}", self.clipboard.strategy);
        if let Some(command) = &self.clipboard.command {
            println!("  Clipboard Command: {}", command.join(" "));
        }
        println!("  Notification: {}ms (+{}ms fade)", self.notify.display_ms, self.notify.fade_ms);
    }
}
