//! Fatal error types shared by the index builder, settings loader and map patcher.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RelinkError>;

/// Errors that abort a relink run.
///
/// Per-tile problems are not represented here; see [`crate::map::TileIssue`].
#[derive(Debug, Error)]
pub enum RelinkError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },

    /// A JSON payload could not be decoded or encoded.
    #[error("invalid JSON in {context}: {source}")]
    Json {
        /// Human readable location of the payload, e.g. `layer 2`.
        context: String,
        /// Source parse error.
        source: serde_json::Error,
    },

    /// A required object key is absent.
    #[error("no \"{field}\" key in {context}")]
    MissingField {
        /// Missing key.
        field: &'static str,
        /// Object that should have carried the key.
        context: String,
    },

    /// The filesystem failed while scanning a collection root.
    #[error("failed to scan collection {collection} at {}: {source}", .path.display())]
    Walk {
        /// Collection being scanned.
        collection: String,
        /// Directory that could not be read.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },

    /// No settings file exists in any of the platform locations.
    #[error("no settings file found (tried {})", display_paths(.tried))]
    SettingsNotFound {
        /// Every location that was checked, in order.
        tried: Vec<PathBuf>,
    },

    /// The platform offers no directory to look for settings in.
    #[error("unable to find the user configuration directory: {0}")]
    NoConfigDirectory(&'static str),

    /// A collection entry cannot be turned into a scan root.
    #[error("invalid collection {name}: {reason}")]
    InvalidCollection {
        /// Collection name, or the offending path for explicit roots.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl RelinkError {
    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".into();
    }
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_tried_settings_location() {
        let err = RelinkError::SettingsNotFound {
            tried: vec![
                PathBuf::from("/xdg/hex-kit/Settings"),
                PathBuf::from("/home/u/.config/hex-kit/Settings"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("/xdg/hex-kit/Settings, /home/u/.config/hex-kit/Settings"));
    }

    #[test]
    fn names_the_missing_field_and_its_owner() {
        let err = RelinkError::MissingField {
            field: "tiles",
            context: "layer 3".into(),
        };
        assert_eq!(err.to_string(), "no \"tiles\" key in layer 3");
    }
}
