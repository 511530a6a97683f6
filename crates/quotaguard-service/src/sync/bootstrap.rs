//! Default entitlement for accounts without a remote document.

use std::sync::Arc;

use tracing::{info, warn};

use quotaguard_core::config::entitlement::EntitlementConfig;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::EntitlementStore;
use quotaguard_core::types::{
    FlexibleInstant, LicenseUpdate, RemoteEntitlementDocument, TierLimits,
};

use crate::catalog::TierCatalogService;

use super::expiration::TrialTerms;

/// Longest catalog period accepted before falling back to the configured one.
const MAX_PERIOD_DAYS: i64 = 3650;

/// Builds the one default document used by both the sync path and the
/// device-add path.
///
/// Tier is the configured default tier; limits and period come from its
/// catalog entry, or from the configured fallbacks when the catalog has no
/// entry or cannot be reached.
#[derive(Debug)]
pub struct EntitlementBootstrapper {
    catalog: Arc<TierCatalogService>,
    config: EntitlementConfig,
}

impl EntitlementBootstrapper {
    /// Creates a new bootstrapper.
    pub fn new(catalog: Arc<TierCatalogService>, config: EntitlementConfig) -> Self {
        Self { catalog, config }
    }

    /// The configured entitlement settings.
    pub fn config(&self) -> &EntitlementConfig {
        &self.config
    }

    /// The document a new account starts with.
    pub async fn default_document(
        &self,
        now: &FlexibleInstant,
    ) -> AppResult<RemoteEntitlementDocument> {
        let tier_key = &self.config.default_tier;
        let (limits, period_days) = match self.catalog.get_tier(tier_key).await {
            Some(tier) => (tier.limits(), self.period_or_fallback(tier.period_days)),
            None => (
                TierLimits::from(self.config.fallback_limits),
                self.config.fallback_period_days,
            ),
        };

        Ok(RemoteEntitlementDocument {
            tier: tier_key.clone(),
            expiration_instant: Some(now.plus_days(period_days)?.into()),
            max_devices: limits.max_devices,
            max_groups: limits.max_groups,
            max_accounts: limits.max_accounts,
            max_account_actions: limits.max_account_actions,
            active_device_ids: Vec::new(),
        })
    }

    /// Write the default document for `account_id`, replacing whatever is
    /// there.
    pub async fn bootstrap(
        &self,
        store: &dyn EntitlementStore,
        account_id: &str,
        now: &FlexibleInstant,
    ) -> AppResult<RemoteEntitlementDocument> {
        let doc = self.default_document(now).await?;
        store
            .set_license(account_id, &LicenseUpdate::from(&doc), false)
            .await?;
        info!(
            account_id = %account_id,
            tier = %doc.tier,
            max_devices = doc.max_devices,
            "Bootstrapped default entitlement"
        );
        Ok(doc)
    }

    /// What the trial tier grants on renewal or conversion.
    pub async fn trial_terms(&self) -> TrialTerms {
        let tier_key = self.config.trial_tier.clone();
        match self.catalog.get_tier(&tier_key).await {
            Some(tier) => TrialTerms {
                tier_key,
                period_days: self.period_or_fallback(tier.period_days),
                limits: Some(tier.limits()),
            },
            None => TrialTerms {
                tier_key,
                period_days: self.config.fallback_period_days,
                limits: None,
            },
        }
    }

    fn period_or_fallback(&self, period_days: Option<i64>) -> i64 {
        match period_days {
            Some(days) if (1..=MAX_PERIOD_DAYS).contains(&days) => days,
            Some(days) => {
                warn!(
                    period_days = days,
                    fallback_days = self.config.fallback_period_days,
                    "Catalog period out of range; using fallback"
                );
                self.config.fallback_period_days
            }
            None => self.config.fallback_period_days,
        }
    }
}
