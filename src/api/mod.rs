//! HTTP client module for the Swift storage API.
//!
//! This module provides the `SwiftClient` for issuing authenticated
//! account, container, and object requests against a Swift storage
//! endpoint, the `Response` value those requests resolve to, and the
//! error taxonomy for everything that can go wrong along the way.

pub mod client;
pub mod error;
pub mod response;

pub use client::SwiftClient;
pub use error::{Error, Result};
pub use response::Response;
