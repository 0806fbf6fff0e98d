//! Authenticated client for the Swift storage API.
//!
//! This module provides the `SwiftClient` struct for making authenticated
//! account, container, and object requests. The client authenticates at
//! construction, caches the issued token and storage endpoint, and
//! re-authenticates transparently when the service answers 401.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use mime_guess::MimeGuess;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{Credentials, Options, SessionState};
use crate::signer;

use super::error::{Error, Result};
use super::response::Response;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow storage responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default lifetime for temporary URLs when neither the call nor the
/// options specify one.
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

const HEADER_AUTH_USER: HeaderName = HeaderName::from_static("x-auth-user");
const HEADER_AUTH_KEY: HeaderName = HeaderName::from_static("x-auth-key");
const HEADER_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");
const HEADER_STORAGE_URL: HeaderName = HeaderName::from_static("x-storage-url");

/// Caller-supplied pieces of a resource request.
#[derive(Debug, Default)]
struct RequestOptions {
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
}

/// Authenticated Swift API client.
/// Clone is cheap: reqwest::Client is internally reference-counted and the
/// session state sits behind an Arc, so clones share one session.
#[derive(Clone)]
pub struct SwiftClient {
    http: Client,
    credentials: Arc<Credentials>,
    session: Arc<Mutex<SessionState>>,
}

impl SwiftClient {
    /// Validate the options and authenticate.
    ///
    /// Fails with [`Error::MissingOption`] before any I/O when `auth_url`,
    /// `username`, or `api_key` is absent, and with
    /// [`Error::Authentication`] when the auth endpoint rejects the
    /// credentials. The returned client always holds a live session.
    pub async fn new(options: Options) -> Result<Self> {
        let credentials = Credentials::from_options(options)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let session = Self::fetch_session(&http, &credentials).await?;

        Ok(Self {
            http,
            credentials: Arc::new(credentials),
            session: Arc::new(Mutex::new(session)),
        })
    }

    /// Token issued by the last successful authentication.
    pub async fn auth_token(&self) -> String {
        self.session.lock().await.auth_token.clone()
    }

    /// Storage endpoint all resource paths are rooted at.
    pub async fn storage_url(&self) -> String {
        self.session.lock().await.storage_url.clone()
    }

    // ===== Account =====

    pub async fn post_account(&self, headers: HeaderMap) -> Result<Response> {
        self.request(
            Method::POST,
            "/",
            RequestOptions {
                headers,
                ..Default::default()
            },
        )
        .await
    }

    /// List the account's containers. Query parameters such as `limit` and
    /// `marker` are forwarded verbatim.
    pub async fn get_containers(&self, query: &[(&str, &str)]) -> Result<Response> {
        self.request(
            Method::GET,
            "/",
            RequestOptions {
                query: to_query(query),
                ..Default::default()
            },
        )
        .await
    }

    // ===== Containers =====

    pub async fn get_container(&self, container: &str, query: &[(&str, &str)]) -> Result<Response> {
        ensure_name(container)?;

        self.request(
            Method::GET,
            &format!("/{container}"),
            RequestOptions {
                query: to_query(query),
                ..Default::default()
            },
        )
        .await
    }

    /// List a container's objects. Same request as [`Self::get_container`];
    /// the listing is the response body.
    pub async fn get_objects(&self, container: &str, query: &[(&str, &str)]) -> Result<Response> {
        self.get_container(container, query).await
    }

    pub async fn head_container(&self, container: &str) -> Result<Response> {
        ensure_name(container)?;

        self.request(
            Method::HEAD,
            &format!("/{container}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn put_container(&self, container: &str, headers: HeaderMap) -> Result<Response> {
        ensure_name(container)?;

        self.request(
            Method::PUT,
            &format!("/{container}"),
            RequestOptions {
                headers,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn post_container(&self, container: &str, headers: HeaderMap) -> Result<Response> {
        ensure_name(container)?;

        self.request(
            Method::POST,
            &format!("/{container}"),
            RequestOptions {
                headers,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete_container(&self, container: &str) -> Result<Response> {
        ensure_name(container)?;

        self.request(
            Method::DELETE,
            &format!("/{container}"),
            RequestOptions::default(),
        )
        .await
    }

    // ===== Objects =====

    /// Upload an object from an in-memory buffer.
    ///
    /// When the caller did not set `Content-Type`, it is filled in from the
    /// object name's extension; if no mapping exists the header is left out
    /// entirely and the service picks its own default.
    pub async fn put_object(
        &self,
        object: &str,
        container: &str,
        body: impl Into<Bytes>,
        headers: HeaderMap,
    ) -> Result<Response> {
        ensure_name(object)?;
        ensure_name(container)?;

        let mut headers = headers;
        if !headers.contains_key(CONTENT_TYPE) {
            if let Some(mime) = MimeGuess::from_path(object).first() {
                headers.insert(CONTENT_TYPE, HeaderValue::from_str(mime.as_ref())?);
            }
        }

        self.request(
            Method::PUT,
            &format!("/{container}/{object}"),
            RequestOptions {
                headers,
                body: Some(body.into()),
                ..Default::default()
            },
        )
        .await
    }

    /// Upload an object from any async byte source.
    ///
    /// The source is drained into memory before sending, so the upload is
    /// byte-identical to [`Self::put_object`] with the same bytes.
    pub async fn put_object_from_reader<R>(
        &self,
        object: &str,
        container: &str,
        mut reader: R,
        headers: HeaderMap,
    ) -> Result<Response>
    where
        R: AsyncRead + Unpin,
    {
        ensure_name(object)?;
        ensure_name(container)?;

        let mut body = Vec::new();
        reader.read_to_end(&mut body).await?;

        self.put_object(object, container, body, headers).await
    }

    pub async fn post_object(
        &self,
        object: &str,
        container: &str,
        headers: HeaderMap,
    ) -> Result<Response> {
        ensure_name(object)?;
        ensure_name(container)?;

        self.request(
            Method::POST,
            &format!("/{container}/{object}"),
            RequestOptions {
                headers,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn get_object(&self, object: &str, container: &str) -> Result<Response> {
        ensure_name(object)?;
        ensure_name(container)?;

        self.request(
            Method::GET,
            &format!("/{container}/{object}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn head_object(&self, object: &str, container: &str) -> Result<Response> {
        ensure_name(object)?;
        ensure_name(container)?;

        self.request(
            Method::HEAD,
            &format!("/{container}/{object}"),
            RequestOptions::default(),
        )
        .await
    }

    pub async fn delete_object(&self, object: &str, container: &str) -> Result<Response> {
        ensure_name(object)?;
        ensure_name(container)?;

        self.request(
            Method::DELETE,
            &format!("/{container}/{object}"),
            RequestOptions::default(),
        )
        .await
    }

    // ===== URLs =====

    /// Unauthenticated URL of an object. No network I/O.
    pub async fn public_url(&self, object: &str, container: &str) -> Result<String> {
        ensure_name(object)?;
        ensure_name(container)?;

        let storage_url = self.storage_url().await;
        Ok(format!("{storage_url}/{container}/{object}"))
    }

    /// Signed, time-limited URL of an object. No network I/O.
    ///
    /// Requires a `temp_url_key` in the construction options. The per-call
    /// `expires_in` wins over the configured default, which wins over one
    /// hour.
    pub async fn temp_url(
        &self,
        object: &str,
        container: &str,
        expires_in: Option<u64>,
    ) -> Result<String> {
        ensure_name(object)?;
        ensure_name(container)?;

        let key = self
            .credentials
            .temp_url_key
            .as_deref()
            .ok_or(Error::TempUrlKeyMissing)?;

        let lifetime = expires_in
            .or(self.credentials.expires_in)
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires = Utc::now().timestamp() + lifetime as i64;

        let path = format!("/{container}/{object}");
        let signature = signer::signature(key, "GET", expires, &path);

        let storage_url = self.storage_url().await;
        Ok(format!(
            "{storage_url}{path}?temp_url_sig={signature}&temp_url_expires={expires}"
        ))
    }

    // ===== Request plumbing =====

    /// Issue one resource request, absorbing at most one 401.
    ///
    /// On 401 the session is refreshed and the identical request is sent
    /// once more; that second outcome is final, so a service that keeps
    /// answering 401 surfaces as `Error::Response` rather than a retry
    /// loop.
    async fn request(&self, method: Method, path: &str, opts: RequestOptions) -> Result<Response> {
        let (token, storage_url) = self.current_session().await;

        let response = self
            .dispatch(method.clone(), &storage_url, path, &opts, &token)
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_response(response);
        }

        debug!(path, "token rejected with 401, refreshing session");
        let (token, storage_url) = self.refresh_session(&token).await?;

        let response = self
            .dispatch(method, &storage_url, path, &opts, &token)
            .await?;
        check_response(response)
    }

    async fn dispatch(
        &self,
        method: Method,
        storage_url: &str,
        path: &str,
        opts: &RequestOptions,
        token: &str,
    ) -> Result<Response> {
        let url = format!("{storage_url}{path}");

        // Token and Accept go in last so callers cannot shadow them.
        let mut headers = opts.headers.clone();
        headers.insert(HEADER_AUTH_TOKEN, HeaderValue::from_str(token)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = self.http.request(method, url).headers(headers);
        if !opts.query.is_empty() {
            builder = builder.query(&opts.query);
        }
        if let Some(ref body) = opts.body {
            builder = builder.body(body.clone());
        }

        Response::read(builder.send().await?).await
    }

    /// Snapshot the cached (token, storage endpoint) pair.
    async fn current_session(&self) -> (String, String) {
        let session = self.session.lock().await;
        (session.auth_token.clone(), session.storage_url.clone())
    }

    /// Re-authenticate after a 401, serializing concurrent refreshes.
    ///
    /// Only the first task through the lock re-authenticates; tasks that
    /// raced the same 401 burst find the token already replaced and reuse
    /// it for their retry.
    async fn refresh_session(&self, stale_token: &str) -> Result<(String, String)> {
        let mut session = self.session.lock().await;

        if session.auth_token == stale_token {
            *session = Self::fetch_session(&self.http, &self.credentials).await?;
            debug!("session refreshed");
        }

        Ok((session.auth_token.clone(), session.storage_url.clone()))
    }

    /// Authenticate and build a fresh session state.
    ///
    /// An explicitly configured `storage_url` always wins over the
    /// server-provided `X-Storage-Url` header.
    async fn fetch_session(http: &Client, credentials: &Credentials) -> Result<SessionState> {
        debug!(url = %credentials.auth_url, "authenticating");

        let response = http
            .get(&credentials.auth_url)
            .header(HEADER_AUTH_USER, credentials.username.as_str())
            .header(HEADER_AUTH_KEY, credentials.api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(code = status.as_u16(), "authentication rejected");
            return Err(Error::Authentication {
                code: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let auth_token = header_string(response.headers(), &HEADER_AUTH_TOKEN);
        let auth_token = match auth_token {
            Some(token) => token,
            None => {
                return Err(Error::Authentication {
                    code: status.as_u16(),
                    message: "auth response is missing the X-Auth-Token header".to_string(),
                })
            }
        };

        let storage_url = match credentials.storage_url {
            Some(ref storage_url) => storage_url.clone(),
            None => match header_string(response.headers(), &HEADER_STORAGE_URL) {
                Some(storage_url) => storage_url,
                None => {
                    return Err(Error::Authentication {
                        code: status.as_u16(),
                        message: "auth response is missing the X-Storage-Url header".to_string(),
                    })
                }
            },
        };

        Ok(SessionState {
            auth_token,
            storage_url,
        })
    }
}

/// Classify a buffered response: 2xx passes through, anything else becomes
/// `Error::Response`.
fn check_response(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    warn!(code = response.code(), "request failed");
    Err(Error::Response {
        code: response.code(),
        message: response.status_message().to_string(),
    })
}

fn ensure_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(())
}

fn to_query(query: &[(&str, &str)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Non-empty header value as an owned string.
fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
