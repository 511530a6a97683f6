//! Session collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::principal::Principal;

/// Resolves the currently signed-in principal.
#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    /// The signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> AppResult<Option<Principal>>;
}
