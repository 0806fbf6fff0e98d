use thiserror::Error;

/// Errors raised by the client.
///
/// Local validation failures (`MissingOption`, `EmptyName`,
/// `TempUrlKeyMissing`) are raised before any network I/O. A 401 on a
/// resource request is absorbed internally exactly once per request; every
/// other failure surfaces as one of these variants.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is missing")]
    MissingOption(&'static str),

    #[error("resource name must not be empty")]
    EmptyName,

    #[error("authentication failed: {code} {message}")]
    Authentication { code: u16, message: String },

    #[error("temp url key is missing")]
    TempUrlKeyMissing,

    #[error("{code} {message}")]
    Response { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
