use crate::Result as SyncErrorResult;

use async_trait::async_trait;
use lg_core::Identity;
use log::debug;

/// Issues an opaque identity per broadcast session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fails with `SyncError::Auth` when no identity can be issued.
    async fn acquire_identity(&self) -> SyncErrorResult<Identity>;
}

/// Anonymous sign-in: a fresh random identity on every call, no credentials.
#[derive(Debug, Clone, Default)]
pub struct AnonymousIdentityProvider;

impl AnonymousIdentityProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn acquire_identity(&self) -> SyncErrorResult<Identity> {
        let identity = Identity::generate();
        debug!("Issued anonymous identity {identity}");
        Ok(identity)
    }
}
