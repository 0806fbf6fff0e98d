use crate::api::error::{Error, Result};

/// Construction options for [`SwiftClient`](crate::SwiftClient).
///
/// `auth_url`, `username`, and `api_key` are required; the rest are
/// optional. Validation happens at client construction, before any
/// network I/O.
#[derive(Debug, Clone, Default)]
pub struct Options {
    auth_url: Option<String>,
    username: Option<String>,
    api_key: Option<String>,
    storage_url: Option<String>,
    temp_url_key: Option<String>,
    expires_in: Option<u64>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint that issues auth tokens.
    pub fn auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Pin the storage endpoint, bypassing the server-provided value.
    pub fn storage_url(mut self, storage_url: impl Into<String>) -> Self {
        self.storage_url = Some(storage_url.into());
        self
    }

    /// Account secret used to sign temporary URLs.
    pub fn temp_url_key(mut self, temp_url_key: impl Into<String>) -> Self {
        self.temp_url_key = Some(temp_url_key.into());
        self
    }

    /// Default lifetime for temporary URLs, in seconds.
    pub fn expires_in(mut self, expires_in: u64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }
}

/// Validated, immutable credentials. Supplied once at client construction.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub(crate) auth_url: String,
    pub(crate) username: String,
    pub(crate) api_key: String,
    pub(crate) storage_url: Option<String>,
    pub(crate) temp_url_key: Option<String>,
    pub(crate) expires_in: Option<u64>,
}

impl Credentials {
    pub(crate) fn from_options(options: Options) -> Result<Self> {
        let auth_url = options.auth_url.ok_or(Error::MissingOption("auth_url"))?;
        let username = options.username.ok_or(Error::MissingOption("username"))?;
        let api_key = options.api_key.ok_or(Error::MissingOption("api_key"))?;

        Ok(Self {
            auth_url,
            username,
            api_key,
            storage_url: options.storage_url,
            temp_url_key: options.temp_url_key,
            expires_in: options.expires_in,
        })
    }
}
