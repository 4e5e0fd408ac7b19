//! Error types for spark-page.
//!
//! Every failure in this crate degrades a single feature. Nothing here is
//! allowed to stop the page from handling further events.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ElementId;

/// Errors reported by a viewport watcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchError {
    /// The host has no intersection observation primitive.
    #[error("viewport observation is not supported by the host")]
    Unsupported,
}

/// An action failed while firing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The element no longer exists in the document.
    #[error("element {element} is detached from the document")]
    Detached { element: ElementId },

    /// A configuration attribute the action depends on is absent.
    #[error("element {element} has no '{attribute}' attribute")]
    MissingAttribute { element: ElementId, attribute: String },

    /// Free-form failure from a caller-supplied action.
    #[error("action failed on {element}: {message}")]
    Failed { element: ElementId, message: String },
}

impl ActionError {
    /// Element the failed action was bound to.
    pub fn element(&self) -> ElementId {
        match self {
            Self::Detached { element }
            | Self::MissingAttribute { element, .. }
            | Self::Failed { element, .. } => *element,
        }
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid root margin '{value}'")]
    InvalidMargin { value: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors from a preference store backend.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to access preference file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Errors that stop a page from mounting. Action, watch and preference
/// failures after mount are reported to sinks or logged instead.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
