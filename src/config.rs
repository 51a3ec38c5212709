//! Settings for the tzboard binary
//!
//! Stored as JSON under the user config dir. The board itself is never written
//! here; the share link is the only place a board lives.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};

use crate::constants::{config, limits};
use crate::model::{default_seed, Direction, TimezoneCard, WidgetConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Page the share path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Card limit for the editor
    #[serde(default = "default_max_widgets")]
    pub max_widgets: usize,

    /// Direction of a freshly seeded board
    #[serde(default)]
    pub default_direction: Direction,

    /// Cards a new board starts with; added cards copy the first one
    #[serde(default = "default_seed")]
    pub seed: Vec<TimezoneCard>,
}

fn default_base_url() -> String {
    config::DEFAULT_BASE_URL.to_string()
}

fn default_max_widgets() -> usize {
    limits::MAX_WIDGETS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_widgets: default_max_widgets(),
            default_direction: Direction::default(),
            seed: default_seed(),
        }
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::FILENAME);
        path
    }

    /// Load settings from `explicit` or the default location
    ///
    /// A missing file at the default location means defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.map(Path::to_path_buf).unwrap_or_else(Self::path);

        let mut settings = if path.exists() {
            Self::read(&path)?
        } else if explicit.is_some() {
            anyhow::bail!("Settings file {} does not exist", path.display());
        } else {
            info!(path = %path.display(), "No settings file, using defaults");
            Self::default()
        };

        settings.apply_overrides(|name| env::var(name).ok());
        settings.validate_and_clamp();
        Ok(settings)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings JSON from {}", path.display()))?;
        info!(path = %path.display(), seed_cards = settings.seed.len(), "Loaded settings");
        Ok(settings)
    }

    /// Apply environment overrides; `lookup` returns a variable's value if set
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(config::ENV_BASE_URL) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = lookup(config::ENV_MAX_WIDGETS) {
            match raw.trim().parse::<usize>() {
                Ok(max) => self.max_widgets = max,
                Err(e) => {
                    error!(
                        var = config::ENV_MAX_WIDGETS,
                        value = %raw,
                        error = %e,
                        "failed to parse env var"
                    )
                }
            }
        }
    }

    /// Clamp values to usable ranges
    fn validate_and_clamp(&mut self) {
        if self.max_widgets == 0 {
            warn!(max_widgets = self.max_widgets, using = 1, "max_widgets below minimum, clamping");
            self.max_widgets = 1;
        } else if self.max_widgets > limits::MAX_WIDGETS_CEILING {
            warn!(
                max_widgets = self.max_widgets,
                max = limits::MAX_WIDGETS_CEILING,
                "max_widgets exceeds maximum, clamping"
            );
            self.max_widgets = limits::MAX_WIDGETS_CEILING;
        }

        if self.seed.is_empty() {
            warn!("seed has no cards, using built-in seed");
            self.seed = default_seed();
        }

        if self.base_url.is_empty() {
            warn!(using = config::DEFAULT_BASE_URL, "base_url is empty, using default");
            self.base_url = default_base_url();
        }
    }

    /// Template for cards added by the editor
    pub fn seed_card(&self) -> WidgetConfig {
        self.seed
            .first()
            .map(WidgetConfig::from)
            .unwrap_or_else(|| WidgetConfig::from(&default_seed()[0]))
    }
}

/// Log level named by LOG_LEVEL; unknown or unset means info
pub fn log_level_from_env() -> Level {
    parse_level(&env::var(config::ENV_LOG_LEVEL).unwrap_or_default())
}

pub fn parse_level(raw: &str) -> Level {
    match raw.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
