// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for av-settings.
//!
//! Loading problems (missing files, bad syntax) live in [`ConfigError`];
//! problems with the resolved settings value live in [`ValidationError`],
//! with unknown shape tokens reported through its [`ShapeUnknownError`]
//! specialization.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::MediaKind;

/// The main error type for av-settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    // Loading errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Resolved settings failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<ShapeUnknownError> for SettingsError {
    fn from(err: ShapeUnknownError) -> Self {
        SettingsError::Validation(ValidationError::UnknownShape(err))
    }
}

impl SettingsError {
    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            SettingsError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// The unknown shape behind this error, if any.
    pub fn as_unknown_shape(&self) -> Option<&ShapeUnknownError> {
        self.as_validation().and_then(ValidationError::as_unknown_shape)
    }
}

/// Errors raised while reading settings layers from outside the process.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse settings: {message}")]
    ParseError { message: String },

    #[error("Unsupported settings format '{extension}' for file {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Settings file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
}

/// Structural problems with a resolved settings value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required setting: {key}")]
    MissingRequired { key: String },

    #[error("Active waveform strategy '{active}' is not configured (available: {})", .available.join(", "))]
    DanglingWaveform {
        active: String,
        available: Vec<String>,
    },

    #[error("Waveform strategy '{strategy}' has an empty url")]
    EmptyWaveformUrl { strategy: String },

    #[error(transparent)]
    UnknownShape(#[from] ShapeUnknownError),
}

impl ValidationError {
    /// The unknown shape behind this error, if any.
    pub fn as_unknown_shape(&self) -> Option<&ShapeUnknownError> {
        match self {
            ValidationError::UnknownShape(err) => Some(err),
            _ => None,
        }
    }
}

/// An unrecognized token in a `preferred*Shapes` sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} shape '{token}' in {field}")]
pub struct ShapeUnknownError {
    /// Dotted path of the sequence, e.g. `ingest.preferredAudioShapes`.
    pub field: String,
    /// The offending token.
    pub token: String,
    /// Vocabulary the token was checked against.
    pub kind: MediaKind,
}

/// Result type alias for av-settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SettingsError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
