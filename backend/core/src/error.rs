use thiserror::Error;

/// Top-level error type for the Oravision runtime.
#[derive(Debug, Error)]
pub enum OravisionError {
    #[error("invalid image reference: {0}")]
    InvalidImage(String),

    #[error("unknown feature type: {0}")]
    UnknownFeature(String),

    #[error("vision API error ({status}): {message}")]
    VisionApi { status: u16, message: String },

    #[error("no vision credentials configured")]
    MissingCredentials,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
