//! Error taxonomy for the generation pipeline

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a generation run.
///
/// The pipeline never retries or rolls back: the first error is terminal and
/// any partially materialized output is left on disk. The next run's
/// destructive template materialization recreates the destination from
/// scratch, so leftover state is harmless.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON, invalid app-identifier shape, empty sources list or
    /// a missing/invalid platform block.
    #[error("invalid config: {0}")]
    Config(String),

    /// A required environment variable is not set.
    #[error("{0} is not set")]
    Environment(&'static str),

    /// A literal source file, asset directory or template file is absent at
    /// the expected path.
    #[error("missing resource: {}", .0.display())]
    MissingResource(PathBuf),

    /// A selected plugin id has no descriptor under the plugins root.
    #[error("no descriptor found for plugin `{0}`")]
    PluginResolution(String),

    /// A declared source pattern is not a valid glob.
    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
