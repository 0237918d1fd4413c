use thiserror::Error;

/// Errors raised around the sanitizer: loading schemas, decoding bodies and strict tag parsing.
///
/// Sanitizing a field never fails; a missing field or a rejected radio value is `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// The form schema could not be read or deserialized.
    #[error("failed to load form schema: {0}")]
    Schema(#[from] config::ConfigError),

    /// A sanitize-type tag outside the closed set was parsed strictly.
    #[error("unknown sanitize type `{0}`")]
    UnknownSanitizeType(String),

    /// The JSON body could not be parsed.
    #[error("invalid JSON body: {0}")]
    JsonBody(#[from] serde_json::Error),

    /// The JSON body parsed, but its top level is not an object.
    #[error("JSON body must be an object, found {0}")]
    JsonNotObject(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
