use thiserror::Error;
use track_backends::BackendError;
use track_encoding::EncodeError;

/// Errors reported by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        source: std::io::Error,
    },
    #[error("invalid JSON on line {line}: {source}")]
    InvalidJson {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Encode { line: usize, source: EncodeError },
    #[error(transparent)]
    Backend(#[from] BackendError),
}
