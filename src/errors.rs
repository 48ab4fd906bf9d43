//! Error types for the Playroom engine
//!
//! One root error with a variant per concern. Most failures in this crate are
//! recovered silently (corrupt score, missing store), so these mostly surface
//! during startup and configuration.

use thiserror::Error;

use crate::games::GameType;

/// Root error type for all Playroom operations
#[derive(Debug, Error)]
pub enum PlayroomError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Round error: {0}")]
    Round(#[from] RoundError),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),
}

/// Score store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database open failed: {0}")]
    DatabaseOpenFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Round generation and answer errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("{game} catalog has {len} entries but rounds need {width} distinct options")]
    CatalogTooSmall {
        game: GameType,
        len: usize,
        width: usize,
    },

    #[error("{game} rounds need at least 4 numbers, got a maximum of {max}")]
    NumberRangeTooSmall { game: GameType, max: u32 },

    #[error("{game} catalog is empty")]
    EmptyCatalog { game: GameType },

    #[error("{0} has no options to choose from")]
    NotAChoiceGame(GameType),

    #[error("'{choice}' is not an option in the current {game} round")]
    UnknownOption { game: GameType, choice: String },
}

impl From<toml::de::Error> for PlayroomError {
    fn from(e: toml::de::Error) -> Self {
        PlayroomError::Configuration(ConfigurationError::LoadFailed(e.to_string()))
    }
}

/// Convenience type alias for Results
pub type PlayroomResult<T> = Result<T, PlayroomError>;
