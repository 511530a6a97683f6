//! Entitlement sync service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use quotaguard_core::error::AppError;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::{AuthProvider, EntitlementStore, LocalCache};
use quotaguard_core::types::{
    EntitlementSnapshot, FlexibleInstant, Principal, RemoteEntitlementDocument,
};

use crate::catalog::TierCatalogService;
use crate::session::resolve_principal;

use super::bootstrap::EntitlementBootstrapper;
use super::expiration::ExpirationState;

/// Pulls the remote entitlement document into the local cache.
///
/// A missing document is bootstrapped; an expired one runs through
/// [`ExpirationState`]. Any failure leaves the cache untouched so the last
/// good snapshot keeps serving.
pub struct EntitlementSyncService {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn EntitlementStore>,
    cache: Arc<dyn LocalCache>,
    catalog: Arc<TierCatalogService>,
    bootstrapper: Arc<EntitlementBootstrapper>,
}

impl std::fmt::Debug for EntitlementSyncService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementSyncService")
            .field("store", &self.store.provider_type())
            .finish_non_exhaustive()
    }
}

impl EntitlementSyncService {
    /// Creates a new sync service.
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn EntitlementStore>,
        cache: Arc<dyn LocalCache>,
        catalog: Arc<TierCatalogService>,
        bootstrapper: Arc<EntitlementBootstrapper>,
    ) -> Self {
        Self {
            auth,
            store,
            cache,
            catalog,
            bootstrapper,
        }
    }

    /// Sync the entitlement for the given (or signed-in) user.
    ///
    /// Returns `false` when no principal resolves, the remote store fails,
    /// or the snapshot cannot be saved.
    pub async fn sync(&self, email: Option<&str>, account_id: Option<&str>) -> bool {
        self.sync_snapshot(email, account_id).await.is_some()
    }

    /// Like [`sync`](Self::sync), returning the snapshot that was saved.
    pub async fn sync_snapshot(
        &self,
        email: Option<&str>,
        account_id: Option<&str>,
    ) -> Option<EntitlementSnapshot> {
        let span = info_span!("entitlement_sync", sync_id = %Uuid::now_v7());
        async {
            match self.try_sync(email, account_id).await {
                Ok(snapshot) => {
                    info!(
                        user_email = %snapshot.user_email,
                        tier = %snapshot.tier,
                        expiration = ?snapshot.expiration.map(|e| e.to_string()),
                        "Entitlement synced"
                    );
                    Some(snapshot)
                }
                Err(e) if e.is_remote() => {
                    warn!(error = %e, "Remote entitlement unreachable; keeping cached snapshot");
                    None
                }
                Err(e) => {
                    warn!(error = %e, "Entitlement sync failed; keeping cached snapshot");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_sync(
        &self,
        email: Option<&str>,
        account_id: Option<&str>,
    ) -> AppResult<EntitlementSnapshot> {
        let principal = resolve_principal(self.auth.as_ref(), email, account_id)
            .await?
            .ok_or_else(|| AppError::session("No signed-in user to sync"))?;
        let now = FlexibleInstant::now();

        let mut doc = self.fetch_or_bootstrap(&principal, &now).await?;
        let expiration = parse_expiration(&doc, &principal);

        let expiration = match expiration {
            Some(expiration) => Some(self.apply_expiration(&principal, &mut doc, expiration, &now).await?),
            None => None,
        };

        let max_account_actions = match doc.max_account_actions {
            Some(actions) => Some(actions),
            None => self
                .catalog
                .find_listed(&doc.tier)
                .await
                .and_then(|tier| tier.max_account_actions),
        };

        let snapshot = EntitlementSnapshot {
            user_email: principal.email.clone(),
            tier: doc.tier,
            expiration,
            max_devices: doc.max_devices,
            max_groups: doc.max_groups,
            max_accounts: doc.max_accounts,
            max_account_actions,
            is_active: true,
            fetched_at: Utc::now(),
        };
        self.cache.save_snapshot(&snapshot).await?;
        Ok(snapshot)
    }

    async fn fetch_or_bootstrap(
        &self,
        principal: &Principal,
        now: &FlexibleInstant,
    ) -> AppResult<RemoteEntitlementDocument> {
        if let Some(doc) = self.store.get_license(&principal.account_id).await? {
            return Ok(doc);
        }

        info!(account_id = %principal.account_id, "No remote entitlement; bootstrapping");
        self.bootstrapper
            .bootstrap(self.store.as_ref(), &principal.account_id, now)
            .await?;
        self.store
            .get_license(&principal.account_id)
            .await?
            .ok_or_else(|| {
                AppError::remote_unavailable("Bootstrapped entitlement could not be read back")
            })
    }

    /// Run the state machine and return the expiration now in effect.
    async fn apply_expiration(
        &self,
        principal: &Principal,
        doc: &mut RemoteEntitlementDocument,
        expiration: FlexibleInstant,
        now: &FlexibleInstant,
    ) -> AppResult<FlexibleInstant> {
        let trial_tier = &self.bootstrapper.config().trial_tier;
        let state = ExpirationState::classify(&doc.tier, &expiration, now, trial_tier);
        if state == ExpirationState::Active {
            debug!(expiration = %expiration, "Entitlement active");
            return Ok(expiration);
        }

        let trial = self.bootstrapper.trial_terms().await;
        let Some(update) = state.transition(&trial, now)? else {
            return Ok(expiration);
        };
        self.store
            .set_license(&principal.account_id, &update, true)
            .await?;

        let previous_tier = doc.tier.clone();
        doc.apply(&update);
        let renewed = now.plus_days(trial.period_days)?;
        match state {
            ExpirationState::ExpiredTrial => info!(
                account_id = %principal.account_id,
                tier = %doc.tier,
                expired_at = %expiration,
                renewed_until = %renewed,
                "Trial auto-renewed"
            ),
            _ => info!(
                account_id = %principal.account_id,
                from_tier = %previous_tier,
                to_tier = %doc.tier,
                expired_at = %expiration,
                renewed_until = %renewed,
                "Expired paid tier converted to trial"
            ),
        }
        Ok(renewed)
    }
}

/// Parse the document's expiration; an unreadable value becomes `None`,
/// which downstream treats as never expiring.
fn parse_expiration(
    doc: &RemoteEntitlementDocument,
    principal: &Principal,
) -> Option<FlexibleInstant> {
    let raw = doc.expiration_instant.as_ref()?;
    match raw.parse() {
        Ok(instant) => Some(instant),
        Err(e) => {
            warn!(
                account_id = %principal.account_id,
                raw = ?raw,
                error = %e,
                "Unparseable expiration; entitlement will be treated as never expiring"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Harness, WriteOnlyStore};
    use quotaguard_core::traits::TierCatalog;
    use quotaguard_core::types::{LicenseUpdate, RawExpiration};

    #[tokio::test]
    async fn test_bootstrap_on_first_sync() {
        let h = Harness::new("silver").await;
        assert!(h.sync.sync(None, None).await);

        let doc = h.store.document(&h.principal.account_id).unwrap();
        assert_eq!(doc.tier, "silver");
        let snapshot = h.snapshot().await.unwrap();
        assert!(snapshot.is_active);
        assert_eq!(snapshot.max_devices, 1);
        assert_eq!(snapshot.max_account_actions, Some(5));
    }

    #[tokio::test]
    async fn test_no_principal_fails() {
        let h = Harness::new("bronze").await;
        h.auth.sign_out().await;
        assert!(!h.sync.sync(None, None).await);
        assert_eq!(h.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_explicit_identifiers_need_no_session() {
        let h = Harness::new("bronze").await;
        h.auth.sign_out().await;
        assert!(h.sync.sync(Some("other@example.com"), Some("acct-other")).await);
        assert!(h.store.document("acct-other").is_some());
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_cache() {
        let h = Harness::new("gold").await;
        assert!(h.sync.sync(None, None).await);
        let before = h.snapshot().await.unwrap();

        h.store.set_available(false);
        assert!(!h.sync.sync(None, None).await);
        assert_eq!(h.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unparseable_expiration_is_none() {
        let h = Harness::new("gold").await;
        h.seed(RemoteEntitlementDocument {
            tier: "gold".to_string(),
            expiration_instant: Some(RawExpiration::Text("someday".to_string())),
            max_devices: 3,
            max_groups: 10,
            max_accounts: 5,
            ..Default::default()
        });
        assert!(h.sync.sync(None, None).await);
        let snapshot = h.snapshot().await.unwrap();
        assert!(snapshot.expiration.is_none());
        assert_eq!(snapshot.tier, "gold");
        assert_eq!(h.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_expired_trial_renews() {
        let h = Harness::new("bronze").await;
        let past = FlexibleInstant::now().plus_days(-10).unwrap();
        h.seed(RemoteEntitlementDocument {
            tier: "bronze".to_string(),
            expiration_instant: Some(past.into()),
            max_devices: 1,
            max_groups: 1,
            max_accounts: 1,
            ..Default::default()
        });

        let before = FlexibleInstant::now();
        assert!(h.sync.sync(None, None).await);
        let snapshot = h.snapshot().await.unwrap();
        assert_eq!(snapshot.tier, "bronze");
        let expiration = snapshot.expiration.unwrap();
        let delta = expiration.duration_since(&before.plus_days(7).unwrap());
        assert!(delta.num_seconds().abs() <= 1, "{expiration}");

        let remote = h.store.document(&h.principal.account_id).unwrap();
        assert_eq!(remote.expiration_instant.unwrap().parse().unwrap(), expiration);
    }

    #[tokio::test]
    async fn test_expired_paid_converts() {
        let h = Harness::new("bronze").await;
        h.seed(RemoteEntitlementDocument {
            tier: "gold".to_string(),
            expiration_instant: Some(RawExpiration::Text("2020-01-01".to_string())),
            max_devices: 3,
            max_groups: 10,
            max_accounts: 5,
            active_device_ids: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        });

        assert!(h.sync.sync(None, None).await);
        let remote = h.store.document(&h.principal.account_id).unwrap();
        assert_eq!(remote.tier, "bronze");
        assert_eq!(remote.max_devices, 1);
        assert_eq!(remote.active_device_ids.len(), 2);

        let snapshot = h.snapshot().await.unwrap();
        assert_eq!(snapshot.tier, "bronze");
        assert!(!snapshot.is_expired_at(&FlexibleInstant::now()));
    }

    #[tokio::test]
    async fn test_unreadable_bootstrap_fails_without_caching() {
        let h = Harness::new("bronze").await;
        let store = Arc::new(WriteOnlyStore::default());
        let sync = EntitlementSyncService::new(
            Arc::new(h.auth.clone()),
            store.clone(),
            Arc::new(h.cache.clone()),
            h.engine.catalog().clone(),
            Arc::new(EntitlementBootstrapper::new(
                h.engine.catalog().clone(),
                Default::default(),
            )),
        );

        assert!(!sync.sync(None, None).await);
        assert_eq!(store.writes(), 1);
        assert!(h.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_huge_catalog_period_falls_back() {
        let h = Harness::new("bronze").await;
        let mut bronze = h.catalog.get_tier("bronze").await.unwrap().unwrap();
        bronze.period_days = Some(1_000_000_000);
        h.catalog.upsert(bronze);

        // Bootstrap path.
        let before = FlexibleInstant::now();
        assert!(h.sync.sync(None, None).await);
        let expiration = h.snapshot().await.unwrap().expiration.unwrap();
        assert_eq!(expiration.duration_since(&before).num_days(), 7);

        // Renewal path.
        let past = FlexibleInstant::now().plus_days(-3).unwrap();
        h.store
            .set_license(&h.principal.account_id, &LicenseUpdate::expiration(past), true)
            .await
            .unwrap();
        assert!(h.sync.sync(None, None).await);
        let renewed = h.snapshot().await.unwrap().expiration.unwrap();
        assert!(FlexibleInstant::now().is_before(&renewed));
    }
}
