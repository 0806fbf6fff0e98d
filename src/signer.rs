//! HMAC-SHA1 signatures for time-limited temporary URLs.

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Signature for a temp URL granting access to `path` until `expires`.
///
/// The signed message is `{method}\n{expires}\n{path}`; the service
/// validates temp URLs against a GET signature regardless of the verb the
/// URL is eventually used with.
pub(crate) fn signature(key: &str, method: &str, expires: i64, path: &str) -> String {
    hmac_sha1_hex(
        key.as_bytes(),
        format!("{method}\n{expires}\n{path}").as_bytes(),
    )
}

/// Lowercase-hex HMAC-SHA1 digest (40 characters).
pub(crate) fn hmac_sha1_hex(key: &[u8], message: &[u8]) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC key of any length is valid");
    mac.update(message);
    format!("{:x}", mac.finalize().into_bytes())
}
