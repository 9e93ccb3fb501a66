//! # Geometry Error Types
//!
//! Usage errors raised by geometry updaters and configuration errors raised
//! while loading the scene config.
//!
//! Data absence is never an error: a property resolving to undefined is
//! reflected in the classification, not returned here.

use thiserror::Error;

/// Programmer errors from misusing an updater.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    /// Asked for a fill instance while fill is disabled.
    #[error("{kind} geometry is not filled")]
    FillNotEnabled {
        /// Geometry kind name.
        kind: &'static str,
    },

    /// Asked for an outline instance while outline is disabled.
    #[error("{kind} geometry is not outlined")]
    OutlineNotEnabled {
        /// Geometry kind name.
        kind: &'static str,
    },

    /// Asked for a dynamic updater for static geometry.
    #[error("{kind} geometry is not dynamic, use the static instance path")]
    NotDynamic {
        /// Geometry kind name.
        kind: &'static str,
    },

    /// Used an updater after `destroy`.
    #[error("{kind} updater has been destroyed")]
    Destroyed {
        /// Geometry kind name.
        kind: &'static str,
    },

    /// A mandatory shape property resolved to undefined at the requested time.
    #[error("{kind} geometry has no resolvable shape at the requested time")]
    UnresolvedShape {
        /// Geometry kind name.
        kind: &'static str,
    },
}

/// Result type for updater operations.
pub type UpdaterResult<T> = Result<T, UpdaterError>;

/// Errors while loading a scene config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for the schema.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

/// Result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
