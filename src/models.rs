//! Typed entries for the JSON listing documents the service returns.
//!
//! Listings come back as plain JSON arrays; parse them out of a
//! [`Response`](crate::Response) with `response.json::<Vec<ContainerEntry>>()`
//! or `response.json::<Vec<ObjectEntry>>()`.

use serde::{Deserialize, Serialize};

/// One container in an account listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEntry {
    pub name: String,
    /// Number of objects in the container.
    pub count: u64,
    /// Total bytes stored in the container.
    pub bytes: u64,
}

/// One object in a container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    /// ETag-style content hash.
    pub hash: String,
    pub last_modified: String,
    pub bytes: u64,
    pub content_type: String,
}
