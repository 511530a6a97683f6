//! Entitlement status service.

use std::sync::Arc;

use tracing::{debug, warn};

use quotaguard_core::config::entitlement::EntitlementConfig;
use quotaguard_core::traits::{AuthProvider, LocalCache};
use quotaguard_core::types::{
    EntitlementSnapshot, EntitlementStatus, FlexibleInstant, TierLimits,
};

use crate::catalog::TierCatalogService;

/// Computes entitlement status from the local cache alone.
///
/// Never calls the remote entitlement store. A missing row yields a
/// sentinel status (`is_active = false`, `expired = true`) that callers
/// read as "sync first".
pub struct EntitlementStatusService {
    auth: Arc<dyn AuthProvider>,
    cache: Arc<dyn LocalCache>,
    catalog: Arc<TierCatalogService>,
    config: EntitlementConfig,
}

impl std::fmt::Debug for EntitlementStatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementStatusService")
            .field("default_tier", &self.config.default_tier)
            .finish_non_exhaustive()
    }
}

impl EntitlementStatusService {
    /// Creates a new status service.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        cache: Arc<dyn LocalCache>,
        catalog: Arc<TierCatalogService>,
        config: EntitlementConfig,
    ) -> Self {
        Self {
            auth,
            cache,
            catalog,
            config,
        }
    }

    /// Status for `email`, or for the signed-in user when `None`.
    ///
    /// The account id is accepted for symmetry with sync; the cache is keyed
    /// by email only.
    pub async fn check_status(
        &self,
        email: Option<&str>,
        _account_id: Option<&str>,
    ) -> EntitlementStatus {
        let Some(email) = self.resolve_email(email).await else {
            debug!("No user for status check");
            return self.sentinel().await;
        };

        match self.cache.get_snapshot(&email).await {
            Ok(Some(snapshot)) => status_from_snapshot(&snapshot, &FlexibleInstant::now()),
            Ok(None) => {
                debug!(user_email = %email, "No cached entitlement");
                self.sentinel().await
            }
            Err(e) => {
                warn!(user_email = %email, error = %e, "Entitlement cache read failed");
                self.sentinel().await
            }
        }
    }

    async fn resolve_email(&self, email: Option<&str>) -> Option<String> {
        if let Some(email) = email {
            return Some(email.to_string());
        }
        match self.auth.current_user().await {
            Ok(principal) => principal.map(|p| p.email),
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                None
            }
        }
    }

    /// Inactive, expired status on the default tier's limits.
    async fn sentinel(&self) -> EntitlementStatus {
        let tier = self.config.default_tier.clone();
        let limits = match self.catalog.get_tier(&tier).await {
            Some(definition) => definition.limits(),
            None => TierLimits::from(self.config.fallback_limits),
        };
        EntitlementStatus {
            is_active: false,
            tier,
            expired: true,
            expiration: None,
            days_until_expiration: None,
            max_devices: limits.max_devices,
            max_groups: limits.max_groups,
            max_accounts: limits.max_accounts,
            max_account_actions: limits.max_account_actions,
            from_cache: false,
        }
    }
}

/// Recompute expiry for a cached row at `now`.
pub fn status_from_snapshot(
    snapshot: &EntitlementSnapshot,
    now: &FlexibleInstant,
) -> EntitlementStatus {
    let expired = snapshot.is_expired_at(now);
    let days_until_expiration = match (&snapshot.expiration, expired) {
        (Some(expiration), false) => Some(expiration.duration_since(now).num_days()),
        _ => None,
    };
    EntitlementStatus {
        is_active: snapshot.is_active && !expired,
        tier: snapshot.tier.clone(),
        expired,
        expiration: snapshot.expiration,
        days_until_expiration,
        max_devices: snapshot.max_devices,
        max_groups: snapshot.max_groups,
        max_accounts: snapshot.max_accounts,
        max_account_actions: snapshot.max_account_actions,
        from_cache: true,
    }
}
