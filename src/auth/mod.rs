//! Authentication module: construction options and cached session state.
//!
//! `Options`/`Credentials` describe how to reach the auth endpoint;
//! `SessionState` is the (token, storage endpoint) pair the auth endpoint
//! hands back, replaced wholesale on every (re-)authentication.

pub mod credentials;
pub mod session;

pub use credentials::{Credentials, Options};
pub use session::SessionState;
