use ledgerwire_codec::CodecError;
use thiserror::Error;

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path, or `stdin`.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Input is not JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The codec rejected the input.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// No field has the requested name.
    #[error("unknown field {0}")]
    UnknownField(String),
}
