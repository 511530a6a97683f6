//! Device registry.

use std::sync::Arc;

use tracing::{info, warn};

use quotaguard_core::result::AppResult;
use quotaguard_core::traits::{AuthProvider, EntitlementStore};
use quotaguard_core::types::{FlexibleInstant, Principal};

use crate::sync::EntitlementBootstrapper;

/// Idempotent add/remove on the signed-in account's device list.
///
/// Membership lives only on the remote document and is never cached.
/// Writes are read-modify-write on the whole list: two processes changing
/// the same account at once can lose an update.
pub struct DeviceRegistry {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn EntitlementStore>,
    bootstrapper: Arc<EntitlementBootstrapper>,
}

impl std::fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("store", &self.store.provider_type())
            .finish_non_exhaustive()
    }
}

impl DeviceRegistry {
    /// Creates a new device registry.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn EntitlementStore>,
        bootstrapper: Arc<EntitlementBootstrapper>,
    ) -> Self {
        Self {
            auth,
            store,
            bootstrapper,
        }
    }

    /// Add `device_id` to the signed-in account.
    ///
    /// Already present is a successful no-op. A missing document is
    /// bootstrapped first.
    pub async fn add_device(&self, device_id: &str) -> bool {
        let Some(principal) = self.principal().await else {
            return false;
        };
        match self.try_add(&principal, device_id).await {
            Ok(added) => added,
            Err(e) => {
                warn!(account_id = %principal.account_id, device_id, error = %e, "Device add failed");
                false
            }
        }
    }

    async fn try_add(&self, principal: &Principal, device_id: &str) -> AppResult<bool> {
        if self.store.add_device(&principal.account_id, device_id).await? {
            info!(account_id = %principal.account_id, device_id, "Device registered");
            return Ok(true);
        }

        let now = FlexibleInstant::now();
        self.bootstrapper
            .bootstrap(self.store.as_ref(), &principal.account_id, &now)
            .await?;
        let added = self.store.add_device(&principal.account_id, device_id).await?;
        if added {
            info!(account_id = %principal.account_id, device_id, "Device registered on new entitlement");
        }
        Ok(added)
    }

    /// Remove `device_id` from the signed-in account.
    ///
    /// Fails only when the account has no document; an absent id on an
    /// existing document is a successful no-op.
    pub async fn remove_device(&self, device_id: &str) -> bool {
        let Some(principal) = self.principal().await else {
            return false;
        };
        match self.store.remove_device(&principal.account_id, device_id).await {
            Ok(true) => {
                info!(account_id = %principal.account_id, device_id, "Device unregistered");
                true
            }
            Ok(false) => {
                warn!(account_id = %principal.account_id, device_id, "No entitlement to remove a device from");
                false
            }
            Err(e) => {
                warn!(account_id = %principal.account_id, device_id, error = %e, "Device remove failed");
                false
            }
        }
    }

    /// The signed-in account's device ids; `None` when they cannot be read.
    pub async fn list_devices(&self) -> Option<Vec<String>> {
        let principal = self.principal().await?;
        match self.store.get_active_devices(&principal.account_id).await {
            Ok(devices) => Some(devices),
            Err(e) => {
                warn!(account_id = %principal.account_id, error = %e, "Device list unavailable");
                None
            }
        }
    }

    async fn principal(&self) -> Option<Principal> {
        match self.auth.current_user().await {
            Ok(Some(principal)) => Some(principal),
            Ok(None) => {
                warn!("No signed-in user for device operation");
                None
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::Harness;

    #[tokio::test]
    async fn test_add_bootstraps_missing_document() {
        let h = Harness::new("gold").await;
        assert!(h.engine.devices().add_device("laptop").await);

        let doc = h.store.document(&h.principal.account_id).unwrap();
        assert_eq!(doc.tier, "gold");
        assert_eq!(doc.active_device_ids, vec!["laptop".to_string()]);
    }

    #[tokio::test]
    async fn test_add_twice_never_duplicates() {
        let h = Harness::new("gold").await;
        assert!(h.engine.devices().add_device("laptop").await);
        assert!(h.engine.devices().add_device("laptop").await);
        assert_eq!(
            h.engine.devices().list_devices().await,
            Some(vec!["laptop".to_string()])
        );
    }

    #[tokio::test]
    async fn test_remove_contract() {
        let h = Harness::new("gold").await;
        assert!(!h.engine.devices().remove_device("laptop").await);

        h.engine.devices().add_device("laptop").await;
        assert!(h.engine.devices().remove_device("phone").await);
        assert!(h.engine.devices().remove_device("laptop").await);
        assert_eq!(h.engine.devices().list_devices().await, Some(vec![]));
    }

    #[tokio::test]
    async fn test_signed_out_and_unreachable() {
        let h = Harness::new("gold").await;
        h.store.set_available(false);
        assert!(!h.engine.devices().add_device("laptop").await);
        assert!(h.engine.devices().list_devices().await.is_none());

        h.store.set_available(true);
        h.auth.sign_out().await;
        assert!(!h.engine.devices().add_device("laptop").await);
    }
}
