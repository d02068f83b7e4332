//! Engine configuration.
//!
//! Provides frame pacing, asset, and match-flow settings plus the match rules.
//! Configuration can be loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use skirmish_common::ConfigError;
use skirmish_gameplay::MatchRules;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "skirmish.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Frame Settings ===
    /// Target frames per second
    pub target_fps: u32,
    /// Sleep to hold the target frame rate (off runs as fast as possible)
    pub pace_frames: bool,
    /// Stop after this many frames (0 = run until the match ends)
    pub max_frames: u64,

    // === Asset Settings ===
    /// Directory holding the sprite and background images (None = placeholders)
    pub asset_dir: Option<PathBuf>,
    /// How long to wait for the background image before giving up
    pub asset_timeout_ms: u64,

    // === Match Flow ===
    /// Reset health and clock after announcing a result instead of stopping
    pub rematch_on_game_over: bool,
    /// Where to navigate once a match is over
    pub next_destination: String,
    /// Drive both fighters with the automated pilot
    pub autopilot: bool,
    /// Seed for the automated pilot
    pub pilot_seed: u64,

    // === Gameplay ===
    /// Match rules
    pub rules: MatchRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Frame
            target_fps: 60,
            pace_frames: true,
            max_frames: 0,

            // Assets
            asset_dir: None,
            asset_timeout_ms: 5_000,

            // Match flow
            rematch_on_game_over: false,
            next_destination: "go.html".to_string(),
            autopilot: true,
            pilot_seed: 42,

            // Gameplay
            rules: MatchRules::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to load config file: {e}");
                Self::default()
            },
        }
    }

    /// Load configuration from a path, reporting any failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs_config_path() {
            config_dir.join("skirmish").join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.target_fps = self.target_fps.clamp(30, 240);
        self.asset_timeout_ms = self.asset_timeout_ms.clamp(100, 60_000);

        if self.next_destination.trim().is_empty() {
            self.next_destination = Self::default().next_destination;
        }
    }
}

/// Get platform-specific config directory.
fn dirs_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        None
    }
}
