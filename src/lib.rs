//! Async client library for OpenStack Swift object storage.
//!
//! Authenticates once at construction, caches the auth token and storage
//! endpoint, and transparently re-authenticates when the service rejects a
//! request with 401. Account, container, and object operations return the
//! raw [`Response`], from which headers, body bytes, or a structured JSON
//! parse can be extracted.
//!
//! ```no_run
//! use swiftstore::{Options, SwiftClient};
//!
//! # async fn run() -> swiftstore::Result<()> {
//! let client = SwiftClient::new(
//!     Options::new()
//!         .auth_url("https://example.com/auth/v1.0")
//!         .username("account:username")
//!         .api_key("secret"),
//! )
//! .await?;
//!
//! let containers = client.get_containers(&[]).await?;
//! for entry in containers.json::<Vec<swiftstore::ContainerEntry>>()? {
//!     println!("{} ({} objects)", entry.name, entry.count);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod auth;
mod models;
mod signer;

pub use api::{Error, Response, Result, SwiftClient};
pub use auth::Options;
pub use models::{ContainerEntry, ObjectEntry};
