//! Errors surfaced by the command line.

use std::path::PathBuf;

use cable_merge::MergeError;

/// Everything that can stop a `cable-helper` run.
#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    /// The input file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not the expected JSON shape.
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An output file (or its parent directory) could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be encoded as JSON.
    #[error("failed to serialize output")]
    Serialize(#[from] serde_json::Error),

    /// The merge itself rejected its input.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// `--config-json` did not parse.
    #[error("invalid --config-json")]
    Config(#[source] serde_json::Error),
}
