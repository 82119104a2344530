//! Error types for plextags.
//!
//! Library crates use [`PlexTagsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all plextags operations.
#[derive(Debug, thiserror::Error)]
pub enum PlexTagsError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the Plex server.
    #[error("network error: {0}")]
    Network(String),

    /// The CSV file to import does not exist.
    #[error("CSV file '{}' not found", path.display())]
    FileNotFound { path: PathBuf },

    /// The CSV file decoded but is not usable (e.g. missing `Title` column).
    #[error("invalid CSV format: {message}")]
    InvalidFormat { message: String },

    /// None of the candidate encodings could decode the CSV file.
    #[error("could not decode '{}' with any of: {}", path.display(), tried.join(", "))]
    DecodeFailure { path: PathBuf, tried: Vec<String> },

    /// The configured library section does not exist on the server.
    #[error("library '{name}' not found on the Plex server (available: {})", available_list(available))]
    LibraryNotFound { name: String, available: Vec<String> },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Response or record parsing error (JSON, CSV).
    #[error("parse error: {message}")]
    Parse { message: String },
}

fn available_list(available: &[String]) -> String {
    if available.is_empty() {
        "none".into()
    } else {
        available.join(", ")
    }
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlexTagsError>;

impl PlexTagsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create an invalid-format error from any displayable message.
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PlexTagsError::config("missing token");
        assert_eq!(err.to_string(), "config error: missing token");

        let err = PlexTagsError::invalid_format("missing required 'Title' column");
        assert!(err.to_string().contains("'Title'"));

        let err = PlexTagsError::FileNotFound {
            path: PathBuf::from("shows.csv"),
        };
        assert_eq!(err.to_string(), "CSV file 'shows.csv' not found");
    }

    #[test]
    fn decode_failure_lists_encodings() {
        let err = PlexTagsError::DecodeFailure {
            path: PathBuf::from("shows.csv"),
            tried: vec!["utf-8".into(), "cp1252".into()],
        };
        assert_eq!(
            err.to_string(),
            "could not decode 'shows.csv' with any of: utf-8, cp1252"
        );
    }

    #[test]
    fn library_not_found_lists_sections() {
        let err = PlexTagsError::LibraryNotFound {
            name: "TV Shows".into(),
            available: vec!["Movies".into(), "Anime".into()],
        };
        assert!(err.to_string().contains("available: Movies, Anime"));

        let err = PlexTagsError::LibraryNotFound {
            name: "TV Shows".into(),
            available: vec![],
        };
        assert!(err.to_string().contains("available: none"));
    }
}
