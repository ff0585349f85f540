use thiserror::Error;

/// Any failure that stops a token from being emitted.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Jwks(#[from] JwksError),
}

/// The requested claims could not be turned into a payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The `error` claim is not one of the values the provider sends.
    #[error("provided error value {value:?} not valid")]
    InvalidErrorCode { value: String },
}

/// A validated payload could not be turned into a signed token.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The private key PEM could not be parsed.
    #[error("error loading private key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    /// The signing primitive rejected the header, claims or key.
    #[error("error signing token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    /// Header or claims could not be serialized for inspection.
    #[error("could not serialize debug output: {0}")]
    Inspect(#[from] serde_json::Error),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),
}

/// An error with the published key set.
#[derive(Debug, Error)]
pub enum JwksError {
    /// The public key PEM could not be parsed into RSA components.
    #[error("could not parse public key: {0}")]
    PublicKey(#[from] rsa::pkcs8::spki::Error),

    /// An error with an individual key caused the processing of the JWKS to
    /// fail.
    #[error("there was an error with an individual key: {0}")]
    KeyError(#[from] JwkError),
}

/// An error with a specific key from a JWKS.
#[derive(Debug, Error)]
pub enum JwkError {
    /// There was an error constructing the decoding key from the key's
    /// components.
    #[error("could not construct a decoding key for {key_id:?}: {error:?}")]
    DecodingError {
        key_id: String,
        error: jsonwebtoken::errors::Error,
    },

    /// The key is missing the `kid` attribute.
    #[error("the key is missing the `kid` attribute")]
    MissingKeyId,
}
