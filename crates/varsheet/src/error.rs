//! Error and diagnostic types.
//!
//! Generation distinguishes two failure classes:
//!
//! - [`GenerateError`]: fatal. The request is unsupported, the store failed,
//!   or the data is corrupt (a non-finite color channel, an alias cycle).
//!   The whole invocation fails and no partial output is returned.
//! - [`Issue`]: recovered per token. A missing reference or an exhausted mode
//!   policy drops one declaration, gets logged, and is reported alongside the
//!   otherwise complete output.
//!
//! Deliberate suppression (categorical collections) is neither.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal generation errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The requested output kind is not one of the supported kinds.
    #[error("unsupported output kind: {0}")]
    UnsupportedKind(String),

    /// A value that cannot be rendered because the source data is corrupt.
    #[error("malformed value for '{token}': {message}")]
    MalformedValue { token: String, message: String },

    /// An alias chain revisits a token it already passed through.
    #[error("cycle detected in token aliases: {}", .path.join(" -> "))]
    AliasCycle { path: Vec<String> },

    /// The token store failed (as opposed to not knowing an id).
    #[error("token store error: {0}")]
    Store(#[from] StoreError),

    /// A report could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure inside a [`TokenStore`](crate::TokenStore) implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors loading snapshots and configuration files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON{}: {source}", location(.path))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML{}: {source}", location(.path))]
    Yaml {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// A recovered, per-declaration failure.
///
/// Each issue drops exactly one declaration (or one fragment, for missing
/// collections) from the output. Sibling tokens are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    /// An alias points at a token id the store does not know.
    #[error("token '{token}': referenced token '{target}' not found")]
    MissingReference { token: String, target: String },

    /// A token's collection could not be found.
    #[error("collection '{collection}' not found (needed by '{token}')")]
    MissingCollection { token: String, collection: String },

    /// The mode policy found no mode to read in the target collection.
    #[error("token '{token}': no mode selected in collection '{collection}'")]
    ModeNotFound { token: String, collection: String },

    /// The token has no value for the mode being read. `mode` is the mode's
    /// display name.
    #[error("token '{token}' has no value for mode '{mode}'")]
    MissingValue { token: String, mode: String },

    /// A payload the formatter cannot render as CSS.
    #[error("token '{token}': cannot render {kind} value as CSS")]
    Unsupported { token: String, kind: &'static str },

    /// A configured collection is absent from the document.
    #[error("collection named '{name}' not found")]
    CollectionNotConfigured { name: String },

    /// A pinned mode is absent from its collection.
    #[error("collection '{collection}' has no mode named '{mode}'")]
    PinnedModeMissing { collection: String, mode: String },
}
