/// Cached (token, storage endpoint) pair from the last successful
/// authentication.
///
/// Owned by the client behind a mutex and replaced as a whole on every
/// (re-)authentication, never field by field. Both fields are non-empty
/// once authentication has succeeded.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) auth_token: String,
    pub(crate) storage_url: String,
}
