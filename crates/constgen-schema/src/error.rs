//! Schema loading errors.

use crate::schema::SCHEMA_FILE_NAMES;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no schema found in {}: expected one of {}", .dir.display(), SCHEMA_FILE_NAMES.join(", "))]
    NotFound { dir: PathBuf },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("schema root must be a mapping of group names")]
    RootNotMapping,

    #[error("{}: {message}", location(.group, .entry))]
    Shape {
        group: String,
        entry: Option<String>,
        message: String,
    },

    #[error(
        "group `{group}`, entry `{entry}`: expected {expected} literals (one per format field), got {got}"
    )]
    ArityMismatch {
        group: String,
        entry: String,
        expected: usize,
        got: usize,
    },
}

impl SchemaError {
    pub(crate) fn shape(group: &str, message: impl Into<String>) -> Self {
        Self::Shape {
            group: group.to_string(),
            entry: None,
            message: message.into(),
        }
    }

    pub(crate) fn entry_shape(group: &str, entry: &str, message: impl Into<String>) -> Self {
        Self::Shape {
            group: group.to_string(),
            entry: Some(entry.to_string()),
            message: message.into(),
        }
    }

    /// Name of the group the error refers to, if any.
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Shape { group, .. } | Self::ArityMismatch { group, .. } => Some(group.as_str()),
            _ => None,
        }
    }
}

fn location(group: &str, entry: &Option<String>) -> String {
    match entry {
        Some(entry) => format!("group `{group}`, entry `{entry}`"),
        None => format!("group `{group}`"),
    }
}
