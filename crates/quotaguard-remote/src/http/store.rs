//! HTTP entitlement store.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use quotaguard_core::error::ErrorKind;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::EntitlementStore;
use quotaguard_core::types::{LicenseUpdate, RemoteEntitlementDocument};

use super::client::RemoteHttpClient;

/// [`EntitlementStore`] over `GET/PATCH/PUT {base}/licenses/{account}`.
///
/// A merge write is a `PATCH` carrying only the set fields; a replace is a
/// `PUT`. Device add/remove use the trait's read-modify-write defaults.
#[derive(Debug, Clone)]
pub struct HttpEntitlementStore {
    client: Arc<RemoteHttpClient>,
}

impl HttpEntitlementStore {
    /// Create a store over a shared client.
    pub fn new(client: Arc<RemoteHttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntitlementStore for HttpEntitlementStore {
    async fn get_license(&self, account_id: &str) -> AppResult<Option<RemoteEntitlementDocument>> {
        self.client
            .get_json(&["licenses", account_id], ErrorKind::RemoteUnavailable)
            .await
    }

    async fn set_license(
        &self,
        account_id: &str,
        update: &LicenseUpdate,
        merge: bool,
    ) -> AppResult<()> {
        let method = if merge { Method::PATCH } else { Method::PUT };
        self.client
            .send_json(
                method,
                &["licenses", account_id],
                update,
                ErrorKind::RemoteUnavailable,
            )
            .await
    }

    fn provider_type(&self) -> &'static str {
        "http"
    }
}
