//! Quota enforcer.

use std::sync::Arc;

use tracing::{debug, info, warn};

use quotaguard_core::traits::{AuthProvider, EntitlementStore, PrimaryDatabase};
use quotaguard_core::types::{
    EntitlementStatus, QuotaDecision, QuotaLimit, ResourceKind, ResourceUsage, UsageSummary,
};

use crate::catalog::TierCatalogService;
use crate::device::DeviceRegistry;
use crate::status::EntitlementStatusService;
use crate::sync::EntitlementSyncService;

use super::messages;

/// Allow/deny decisions for the three resource kinds.
///
/// Every check first requires a usable (active, unexpired) entitlement.
/// Groups and accounts are counted live and sync lazily only when the
/// cached status is unusable; devices always sync and read membership from
/// the remote document. Nothing here returns an error.
pub struct QuotaEnforcer {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn EntitlementStore>,
    primary: Arc<dyn PrimaryDatabase>,
    catalog: Arc<TierCatalogService>,
    sync: Arc<EntitlementSyncService>,
    status: Arc<EntitlementStatusService>,
    devices: Arc<DeviceRegistry>,
}

impl std::fmt::Debug for QuotaEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaEnforcer").finish_non_exhaustive()
    }
}

impl QuotaEnforcer {
    /// Creates a new quota enforcer.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn EntitlementStore>,
        primary: Arc<dyn PrimaryDatabase>,
        catalog: Arc<TierCatalogService>,
        sync: Arc<EntitlementSyncService>,
        status: Arc<EntitlementStatusService>,
        devices: Arc<DeviceRegistry>,
    ) -> Self {
        Self {
            auth,
            store,
            primary,
            catalog,
            sync,
            status,
            devices,
        }
    }

    /// Whether another group may be created.
    pub async fn can_add_group(&self) -> QuotaDecision {
        let status = self.status_with_lazy_sync().await;
        if !status.is_usable() {
            return QuotaDecision::deny(messages::RENEWAL_REQUIRED, None, status.max_groups);
        }
        if QuotaLimit::from(status.max_groups).is_unlimited() {
            return QuotaDecision::allow(None, status.max_groups);
        }
        let count = self.primary.count_groups().await;
        self.decide(ResourceKind::Group, &status, status.max_groups, count.ok())
            .await
    }

    /// Whether another external account may be linked.
    pub async fn can_add_account(&self) -> QuotaDecision {
        let status = self.status_with_lazy_sync().await;
        if !status.is_usable() {
            return QuotaDecision::deny(messages::RENEWAL_REQUIRED, None, status.max_accounts);
        }
        if QuotaLimit::from(status.max_accounts).is_unlimited() {
            return QuotaDecision::allow(None, status.max_accounts);
        }
        let count = self.primary.count_linked_accounts().await;
        self.decide(ResourceKind::Account, &status, status.max_accounts, count.ok())
            .await
    }

    /// Whether `device_id` may be registered.
    ///
    /// Always syncs first. An id already on the remote list is allowed
    /// without counting against the limit.
    pub async fn can_add_device(&self, device_id: &str) -> QuotaDecision {
        let device_id = device_id.trim();
        if device_id.is_empty() {
            return QuotaDecision::deny(messages::INVALID_DEVICE_ID, None, 0);
        }
        let principal = match self.auth.current_user().await {
            Ok(Some(principal)) => principal,
            Ok(None) => return QuotaDecision::deny(messages::SIGN_IN_REQUIRED, None, 0),
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                return QuotaDecision::deny(messages::SIGN_IN_REQUIRED, None, 0);
            }
        };

        let synced = self
            .sync
            .sync(Some(&principal.email), Some(&principal.account_id))
            .await;
        let status = self
            .status
            .check_status(Some(&principal.email), Some(&principal.account_id))
            .await;
        if !synced {
            warn!(device_id, "Device check could not sync; denying");
            return QuotaDecision::deny(
                messages::unverifiable(ResourceKind::Device),
                None,
                status.max_devices,
            );
        }
        if !status.is_usable() {
            return QuotaDecision::deny(messages::RENEWAL_REQUIRED, None, status.max_devices);
        }

        let doc = match self.store.get_license(&principal.account_id).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                warn!(account_id = %principal.account_id, "Entitlement vanished after sync");
                return QuotaDecision::deny(
                    messages::unverifiable(ResourceKind::Device),
                    None,
                    status.max_devices,
                );
            }
            Err(e) => {
                warn!(account_id = %principal.account_id, error = %e, "Device list unavailable");
                return QuotaDecision::deny(
                    messages::unverifiable(ResourceKind::Device),
                    None,
                    status.max_devices,
                );
            }
        };

        let current = doc.active_device_ids.len() as u64;
        if doc.has_device(device_id) {
            debug!(device_id, "Device already registered");
            return QuotaDecision::allow(Some(current), doc.max_devices);
        }
        self.decide(ResourceKind::Device, &status, doc.max_devices, Some(current))
            .await
    }

    /// Check, then add the device when allowed.
    pub async fn register_device(&self, device_id: &str) -> QuotaDecision {
        let decision = self.can_add_device(device_id).await;
        if !decision.allowed {
            return decision;
        }
        if self.devices.add_device(device_id.trim()).await {
            decision
        } else {
            QuotaDecision::deny(
                messages::DEVICE_REGISTRATION_FAILED,
                decision.current,
                decision.limit,
            )
        }
    }

    /// Used versus limit for every resource kind.
    pub async fn usage_summary(&self) -> UsageSummary {
        let status = self.status_with_lazy_sync().await;
        let devices = self
            .devices
            .list_devices()
            .await
            .map(|ids| ids.len() as u64);
        let groups = self.primary.count_groups().await.ok();
        let accounts = self.primary.count_linked_accounts().await.ok();

        UsageSummary {
            tier: status.tier.clone(),
            active: status.is_usable(),
            resources: vec![
                ResourceUsage {
                    kind: ResourceKind::Device,
                    used: devices,
                    limit: status.max_devices,
                },
                ResourceUsage {
                    kind: ResourceKind::Group,
                    used: groups,
                    limit: status.max_groups,
                },
                ResourceUsage {
                    kind: ResourceKind::Account,
                    used: accounts,
                    limit: status.max_accounts,
                },
            ],
        }
    }

    /// Cached status; one sync and a re-read when it is unusable.
    async fn status_with_lazy_sync(&self) -> EntitlementStatus {
        let status = self.status.check_status(None, None).await;
        if status.is_usable() {
            return status;
        }
        debug!(from_cache = status.from_cache, "Status unusable; syncing once");
        if self.sync.sync(None, None).await {
            self.status.check_status(None, None).await
        } else {
            status
        }
    }

    async fn decide(
        &self,
        kind: ResourceKind,
        status: &EntitlementStatus,
        max: i64,
        current: Option<u64>,
    ) -> QuotaDecision {
        let Some(current) = current else {
            warn!(%kind, "Usage count unavailable; denying");
            return QuotaDecision::deny(messages::unverifiable(kind), None, max);
        };
        let limit = QuotaLimit::from(max);
        if limit.permits(current) {
            return QuotaDecision::allow(Some(current), max);
        }
        let tier_name = self.catalog.display_name(&status.tier).await;
        info!(%kind, current, max, tier = %status.tier, "Quota limit reached");
        QuotaDecision::deny(messages::limit_reached(kind, &tier_name, max), Some(current), max)
    }
}
