//! Authoritative remote entitlement store.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::document::{LicenseUpdate, RemoteEntitlementDocument};

/// Per-account entitlement documents and device membership.
///
/// Device add/remove are read-modify-write; concurrent writers race and the
/// last one wins.
#[async_trait]
pub trait EntitlementStore: Send + Sync + 'static {
    /// Fetch the document for `account_id`.
    async fn get_license(&self, account_id: &str) -> AppResult<Option<RemoteEntitlementDocument>>;

    /// Write `update`. With `merge` only the set fields change; without it
    /// the document is replaced by the update applied to an empty document.
    async fn set_license(&self, account_id: &str, update: &LicenseUpdate, merge: bool)
    -> AppResult<()>;

    /// The registered device ids, empty when there is no document.
    async fn get_active_devices(&self, account_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .get_license(account_id)
            .await?
            .map(|doc| doc.active_device_ids)
            .unwrap_or_default())
    }

    /// Append `device_id` if absent. `false` when there is no document.
    async fn add_device(&self, account_id: &str, device_id: &str) -> AppResult<bool> {
        let Some(doc) = self.get_license(account_id).await? else {
            return Ok(false);
        };
        if doc.has_device(device_id) {
            return Ok(true);
        }
        let mut devices = doc.active_device_ids;
        devices.push(device_id.to_string());
        self.set_license(account_id, &LicenseUpdate::devices(devices), true)
            .await?;
        Ok(true)
    }

    /// Drop `device_id` if present. `false` only when there is no document.
    async fn remove_device(&self, account_id: &str, device_id: &str) -> AppResult<bool> {
        let Some(doc) = self.get_license(account_id).await? else {
            return Ok(false);
        };
        if !doc.has_device(device_id) {
            return Ok(true);
        }
        let devices = doc
            .active_device_ids
            .into_iter()
            .filter(|id| id != device_id)
            .collect();
        self.set_license(account_id, &LicenseUpdate::devices(devices), true)
            .await?;
        Ok(true)
    }

    /// Backend identifier for logs (e.g. `"http"`, `"memory"`).
    fn provider_type(&self) -> &'static str;
}
