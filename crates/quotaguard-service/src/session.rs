//! Session provider and principal resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use quotaguard_core::result::AppResult;
use quotaguard_core::traits::AuthProvider;
use quotaguard_core::types::Principal;

/// An [`AuthProvider`] holding one principal in memory.
///
/// The host signs a user in after its own login flow; the CLI signs in
/// from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    current: Arc<RwLock<Option<Principal>>>,
}

impl StaticSessionProvider {
    /// A provider with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider with `principal` already signed in.
    pub fn signed_in(principal: Principal) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(principal))),
        }
    }

    /// Replace the signed-in principal.
    pub async fn sign_in(&self, principal: Principal) {
        info!(email = %principal.email, account_id = %principal.account_id, "Signed in");
        *self.current.write().await = Some(principal);
    }

    /// Clear the signed-in principal.
    pub async fn sign_out(&self) {
        if let Some(previous) = self.current.write().await.take() {
            info!(email = %previous.email, "Signed out");
        }
    }
}

#[async_trait]
impl AuthProvider for StaticSessionProvider {
    async fn current_user(&self) -> AppResult<Option<Principal>> {
        Ok(self.current.read().await.clone())
    }
}

/// Fill in whichever identifier is missing from the session.
///
/// Explicit identifiers win; when both are given the session is not
/// consulted at all.
pub async fn resolve_principal(
    auth: &dyn AuthProvider,
    email: Option<&str>,
    account_id: Option<&str>,
) -> AppResult<Option<Principal>> {
    if let (Some(email), Some(account_id)) = (email, account_id) {
        return Ok(Some(Principal::new(email, account_id)));
    }
    let Some(session) = auth.current_user().await? else {
        return Ok(None);
    };
    Ok(Some(Principal {
        email: email.map_or(session.email, str::to_string),
        account_id: account_id.map_or(session.account_id, str::to_string),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_identifiers_skip_session() {
        let auth = StaticSessionProvider::new();
        let principal = resolve_principal(&auth, Some("a@example.com"), Some("acct-a"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.account_id, "acct-a");
    }

    #[tokio::test]
    async fn test_missing_identifier_comes_from_session() {
        let auth = StaticSessionProvider::signed_in(Principal::new("s@example.com", "acct-s"));
        let principal = resolve_principal(&auth, Some("x@example.com"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.email, "x@example.com");
        assert_eq!(principal.account_id, "acct-s");
    }

    #[tokio::test]
    async fn test_no_session_resolves_nothing() {
        let auth = StaticSessionProvider::signed_in(Principal::new("s@example.com", "acct-s"));
        auth.sign_out().await;
        assert!(resolve_principal(&auth, None, None).await.unwrap().is_none());
    }
}
