use thiserror::Error;

use crate::transport::TransportError;

/// Raised while building a [`crate::distance_matrix_client::DistanceMatrixClient`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("You must have both a client_id and secret_key, not just one")]
    MissingCredential,

    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(#[from] base64::DecodeError),

    /// Surfaced by the HMAC key constructor, which accepts keys of any
    /// length, so signing setup does not produce it in practice.
    #[error("Invalid secret key length")]
    InvalidKeyLength(#[from] hmac::digest::InvalidLength),

    #[error("Invalid matrix url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid max request length: {0}")]
    InvalidLength(String),
}

#[derive(Debug, Error)]
pub enum DistanceMatrixError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] TransportError),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Request of {length} characters exceeds the {limit} limit and cannot be split further")]
    RequestTooLarge { length: usize, limit: usize },

    #[error("Cannot merge destination halves with {left} and {right} rows")]
    InconsistentRows { left: usize, right: usize },

    #[error("No {0} given")]
    NoLocations(&'static str),
}
