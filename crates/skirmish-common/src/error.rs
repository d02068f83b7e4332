//! Error types for Skirmish.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Skirmish operations.
#[derive(Debug, Error)]
pub enum SkirmishError {
    /// Match rules or arena layout rejected
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),

    /// Asset loading errors
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid match rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    /// A size that must be positive was not
    #[error("{what} size must be positive, got {width}x{height}")]
    NonPositiveSize {
        /// What was being sized
        what: &'static str,
        /// Width provided
        width: f32,
        /// Height provided
        height: f32,
    },

    /// Fighters do not fit between the arena edges and above the ground
    #[error("fighter {fighter_width}x{fighter_height} does not fit arena {arena_width} wide with ground at {ground_height}")]
    FighterDoesNotFit {
        /// Fighter width
        fighter_width: f32,
        /// Fighter height
        fighter_height: f32,
        /// Arena width
        arena_width: f32,
        /// Ground plane height
        ground_height: f32,
    },

    /// A numeric rule was outside its allowed range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Rule field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// A platform extends outside the playable area
    #[error("platform {index} at ({x}, {y}) size {width}x{height} lies outside the arena")]
    PlatformOutOfBounds {
        /// Position in the platform list
        index: usize,
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
}

/// Asset loading errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset file does not exist
    #[error("asset {name} not found at {}", path.display())]
    Missing {
        /// Asset name
        name: String,
        /// Path that was tried
        path: PathBuf,
    },

    /// Asset exists but could not be decoded
    #[error("failed to decode asset {name}: {reason}")]
    Decode {
        /// Asset name
        name: String,
        /// Decoder message
        reason: String,
    },

    /// The background loader went away before reporting readiness
    #[error("asset loader disconnected before {0} was ready")]
    LoaderDisconnected(String),

    /// Readiness was not reported in time
    #[error("timed out after {waited_ms} ms waiting for asset {name}")]
    TimedOut {
        /// Asset being waited for
        name: String,
        /// How long we waited
        waited_ms: u64,
    },
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// IO error reading or writing the file
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Skirmish operations.
pub type SkirmishResult<T> = Result<T, SkirmishError>;
