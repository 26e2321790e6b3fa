//! Error Types
//!
//! Failures in Folio are never fatal to the experience as a whole. A page whose
//! asset fails to load simply has no model; an audio track the host refuses to
//! start stays silent until the next user gesture. The types below let callers
//! decide how loudly to report each case.
//!
//! # Overview
//!
//! - [`LoadError`]: asset fetch or parse failure, reported per page
//! - [`PlaybackError`]: the host refused to start audio (autoplay policy)
//! - [`BindError`]: an anchor/model binding violated its invariants
//! - [`ConfigError`]: the experience configuration is unusable
//!
//! [`FolioError`] wraps all of them for APIs that can fail in more than one way.

use thiserror::Error;

/// Failure to obtain a model asset from the loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing exists at the requested path.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The transport failed (network, file system).
    #[error("Failed to fetch '{path}': {reason}")]
    Fetch {
        /// Requested asset path
        path: String,
        /// Transport-level description
        reason: String,
    },

    /// The bytes arrived but could not be decoded.
    #[error("Failed to parse '{path}': {reason}")]
    Parse {
        /// Requested asset path
        path: String,
        /// Decoder description
        reason: String,
    },
}

/// Failure to start audio playback.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// The host only starts audio from inside a user gesture.
    #[error("Playback rejected by autoplay policy")]
    PolicyRejected,

    /// The audio source is not playable (missing or undecodable).
    #[error("Audio source unavailable")]
    SourceUnavailable,
}

/// Violations of the one-model-per-target binding rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// The target already carries a model.
    #[error("Target {0} already has a bound model")]
    TargetAlreadyBound(usize),

    /// The model root node does not exist in the scene.
    #[error("Model root node is missing from the scene")]
    MissingRoot,
}

/// Invalid experience configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Page count must be at least 1")]
    NoPages,

    #[error("Path template '{0}' does not contain a {{page}} placeholder")]
    MissingPagePlaceholder(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Invalid configuration document: {0}")]
    Document(String),
}

/// The aggregate error type for Folio.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Alias for `Result<T, FolioError>`.
pub type Result<T> = std::result::Result<T, FolioError>;
