//! Tier catalog service.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use quotaguard_core::traits::TierCatalog;
use quotaguard_core::types::{CUSTOM_TIER_KEY, TierDefinition};

/// Resolves tier definitions from the remote catalog.
///
/// The full listing is fetched once and kept until [`clear_cache`] is
/// called; there is no TTL. Single lookups always go to the catalog.
/// Failures are logged and surface as `None` / empty, and are never cached.
///
/// [`clear_cache`]: TierCatalogService::clear_cache
pub struct TierCatalogService {
    catalog: Arc<dyn TierCatalog>,
    cached_tiers: Arc<RwLock<Option<Vec<TierDefinition>>>>,
}

impl std::fmt::Debug for TierCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierCatalogService").finish_non_exhaustive()
    }
}

impl TierCatalogService {
    /// Creates a new catalog service.
    pub fn new(catalog: Arc<dyn TierCatalog>) -> Self {
        Self {
            catalog,
            cached_tiers: Arc::new(RwLock::new(None)),
        }
    }

    /// Look up one tier. `"custom"` resolves to `None` without a remote call.
    pub async fn get_tier(&self, key: &str) -> Option<TierDefinition> {
        if key == CUSTOM_TIER_KEY {
            debug!("Custom tier is never fetched by key");
            return None;
        }
        match self.catalog.get_tier(key).await {
            Ok(tier) => tier,
            Err(e) => {
                warn!(tier = %key, error = %e, "Tier lookup failed");
                None
            }
        }
    }

    /// Every listed tier except `"custom"`, served from memory after the
    /// first successful fetch.
    pub async fn get_all_tiers(&self) -> Vec<TierDefinition> {
        if let Some(tiers) = self.cached_tiers.read().await.as_ref() {
            return tiers.clone();
        }

        match self.catalog.get_all_tiers().await {
            Ok(tiers) => {
                let listed: Vec<TierDefinition> =
                    tiers.into_iter().filter(|tier| !tier.is_custom()).collect();
                debug!(count = listed.len(), "Tier catalog cached");
                *self.cached_tiers.write().await = Some(listed.clone());
                listed
            }
            Err(e) => {
                warn!(error = %e, "Tier catalog listing failed");
                Vec::new()
            }
        }
    }

    /// Drop the cached listing so the next [`get_all_tiers`] refetches.
    ///
    /// [`get_all_tiers`]: TierCatalogService::get_all_tiers
    pub async fn clear_cache(&self) {
        *self.cached_tiers.write().await = None;
        debug!("Tier catalog cache cleared");
    }

    /// Find a tier in the cached listing.
    pub async fn find_listed(&self, key: &str) -> Option<TierDefinition> {
        self.get_all_tiers()
            .await
            .into_iter()
            .find(|tier| tier.tier_key == key)
    }

    /// Human-readable tier name for messages. Falls back to the capitalized
    /// key when the tier is not listed.
    pub async fn display_name(&self, key: &str) -> String {
        match self.find_listed(key).await {
            Some(tier) => tier.display_name,
            None => capitalize(key),
        }
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotaguard_remote::memory::MemoryTierCatalog;

    fn service() -> (TierCatalogService, MemoryTierCatalog) {
        let remote = MemoryTierCatalog::seeded();
        (TierCatalogService::new(Arc::new(remote.clone())), remote)
    }

    #[tokio::test]
    async fn test_custom_is_never_fetched() {
        let (service, remote) = service();
        assert!(service.get_tier("custom").await.is_none());
        assert_eq!(remote.lookup_calls(), 0);
        assert!(service.get_tier("gold").await.is_some());
        assert_eq!(remote.lookup_calls(), 1);
    }

    #[tokio::test]
    async fn test_listing_is_cached_until_cleared() {
        let (service, remote) = service();
        let first = service.get_all_tiers().await;
        assert!(first.iter().all(|tier| tier.tier_key != "custom"));
        assert_eq!(first.len(), 4);

        service.get_all_tiers().await;
        assert_eq!(remote.list_calls(), 1);

        service.clear_cache().await;
        service.get_all_tiers().await;
        assert_eq!(remote.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (service, remote) = service();
        remote.set_available(false);
        assert!(service.get_all_tiers().await.is_empty());
        assert!(service.get_tier("gold").await.is_none());

        remote.set_available(true);
        assert_eq!(service.get_all_tiers().await.len(), 4);
        assert_eq!(remote.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_display_name_fallback() {
        let (service, _remote) = service();
        assert_eq!(service.display_name("gold").await, "Gold");
        assert_eq!(service.display_name("enterprise").await, "Enterprise");
    }
}
