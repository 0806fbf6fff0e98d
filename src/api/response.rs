use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::error::Result;

/// A fully-buffered response from the storage service.
///
/// Captured from the wire as an immutable value: status, headers, and raw
/// body. The body is only interpreted on demand, via [`Response::text`] or
/// [`Response::json`].
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Drain a wire response into an owned value.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status code, e.g. 204.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Status message for the code, e.g. "No Content".
    pub fn status_message(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up a single header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON into the given type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
