//! Configuration loader/writer plus strongly typed settings structures.
//!
//! Deserializes `config.toml` from the data directory (extracting the embedded
//! defaults on first run), resolves per-puzzle time limits, and exposes the
//! paths every other subsystem persists to.

use crate::puzzles::{Difficulty, PuzzleKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NUMBERLAB_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_countdown_icon")]
    pub countdown_icon: String, // Character for countdown blocks
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64, // Event poll timeout in milliseconds
    #[serde(default = "default_true")]
    pub show_hints: bool,
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
    #[serde(default = "default_border_style")]
    pub border_style: String, // "single", "double", "rounded", "thick"
    #[serde(default)]
    pub colors: UiColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiColors {
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_muted")]
    pub muted: String,
    #[serde(default = "default_success")]
    pub success: String,
    #[serde(default = "default_failure")]
    pub failure: String,
    #[serde(default = "default_timer")]
    pub timer: String,
    #[serde(default = "default_timer_low")]
    pub timer_low: String,
}

/// Countdown lengths in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_easy_seconds")]
    pub easy: u32,
    #[serde(default = "default_medium_seconds")]
    pub medium: u32,
    #[serde(default = "default_hard_seconds")]
    pub hard: u32,
    #[serde(default = "default_low_warning")]
    pub low_warning: u32,
    /// Puzzle slug -> seconds, applied to every tier
    #[serde(default)]
    pub overrides: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub default_difficulty: Difficulty,
    #[serde(default = "default_true")]
    pub reveal_solution: bool,
}

fn default_countdown_icon() -> String {
    "█".to_string()
}

fn default_poll_timeout_ms() -> u64 {
    50
}

fn default_true() -> bool {
    true
}

fn default_toast_seconds() -> u64 {
    4
}

fn default_border_style() -> String {
    "rounded".to_string()
}

fn default_accent() -> String {
    "#5fafff".to_string()
}

fn default_text() -> String {
    "#e4e4e4".to_string()
}

fn default_muted() -> String {
    "#808080".to_string()
}

fn default_success() -> String {
    "#5fd75f".to_string()
}

fn default_failure() -> String {
    "#ff5f5f".to_string()
}

fn default_timer() -> String {
    "#ffd75f".to_string()
}

fn default_timer_low() -> String {
    "#ff5f5f".to_string()
}

fn default_easy_seconds() -> u32 {
    120
}

fn default_medium_seconds() -> u32 {
    90
}

fn default_hard_seconds() -> u32 {
    60
}

fn default_low_warning() -> u32 {
    10
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            countdown_icon: default_countdown_icon(),
            poll_timeout_ms: default_poll_timeout_ms(),
            show_hints: true,
            toast_seconds: default_toast_seconds(),
            border_style: default_border_style(),
            colors: UiColors::default(),
        }
    }
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            text: default_text(),
            muted: default_muted(),
            success: default_success(),
            failure: default_failure(),
            timer: default_timer(),
            timer_low: default_timer_low(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            easy: default_easy_seconds(),
            medium: default_medium_seconds(),
            hard: default_hard_seconds(),
            low_warning: default_low_warning(),
            overrides: HashMap::new(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::Easy,
            reveal_solution: true,
        }
    }
}

impl TimerConfig {
    /// Seconds allowed for one round of `kind` at `difficulty`
    ///
    /// A zero limit would end rounds before they start, so it is raised to 1.
    pub fn limit_for(&self, kind: PuzzleKind, difficulty: Difficulty) -> u32 {
        let seconds = match self.overrides.get(kind.slug()) {
            Some(&s) => s,
            None => match difficulty {
                Difficulty::Easy => self.easy,
                Difficulty::Medium => self.medium,
                Difficulty::Hard => self.hard,
            },
        };
        seconds.max(1)
    }
}

impl Config {
    /// Load `config.toml` from the data directory, extracting defaults first
    pub fn load() -> Result<Self> {
        Self::load_in(&Self::base_dir()?)
    }

    /// Load config from an explicit data directory
    pub fn load_in(dir: &Path) -> Result<Self> {
        Self::extract_defaults(dir)?;
        Self::load_from_path(&dir.join("config.toml"))
    }

    /// Load config from a custom file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;

        for slug in config.timer.overrides.keys() {
            if PuzzleKind::from_slug(slug).is_none() {
                tracing::warn!("Ignoring timer override for unknown puzzle '{}'", slug);
            }
        }

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the embedded default config if none exists (idempotent)
    fn extract_defaults(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).context(format!("Failed to create data directory {:?}", dir))?;
        let config_path = dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write default config.toml")?;
            tracing::info!("Extracted default config to {:?}", config_path);
        }
        Ok(())
    }

    pub fn time_limit(&self, kind: PuzzleKind, difficulty: Difficulty) -> u32 {
        self.timer.limit_for(kind, difficulty)
    }

    /// Get the base numberlab directory (~/.numberlab/)
    /// Can be overridden with NUMBERLAB_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".numberlab"))
    }

    /// Returns: ~/.numberlab/numberlab.log
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("numberlab.log"))
    }

    /// Returns: ~/.numberlab/accounts.toml
    pub fn accounts_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("accounts.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.timer.easy, 120);
        assert_eq!(config.timer.hard, 60);
        assert_eq!(config.game.default_difficulty, Difficulty::Easy);
        assert_eq!(config.ui.countdown_icon, "█");
        assert_eq!(config.timer.overrides.get("prime-hunt"), Some(&150));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[timer]\nhard = 45\n").unwrap();
        assert_eq!(config.timer.hard, 45);
        assert_eq!(config.timer.medium, 90);
        assert!(config.game.reveal_solution);
        assert_eq!(config.ui.colors.success, "#5fd75f");
    }

    #[test]
    fn test_time_limits() {
        let mut timer = TimerConfig::default();
        assert_eq!(timer.limit_for(PuzzleKind::Fractions, Difficulty::Medium), 90);
        timer.overrides.insert("fractions".to_string(), 30);
        assert_eq!(timer.limit_for(PuzzleKind::Fractions, Difficulty::Hard), 30);
        timer.hard = 0;
        assert_eq!(timer.limit_for(PuzzleKind::Sequence, Difficulty::Hard), 1);
    }

    #[test]
    fn test_load_in_extracts_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_in(dir.path()).unwrap();
        assert!(dir.path().join("config.toml").exists());

        config.timer.easy = 200;
        fs::write(
            dir.path().join("config.toml"),
            toml::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
        let reloaded = Config::load_in(dir.path()).unwrap();
        assert_eq!(reloaded.timer.easy, 200);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[timer\n").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
