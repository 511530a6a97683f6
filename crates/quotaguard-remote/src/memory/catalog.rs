//! In-memory tier catalog.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use quotaguard_core::error::AppError;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::TierCatalog;
use quotaguard_core::types::TierDefinition;

use super::seed::default_tiers;

/// Process-local [`TierCatalog`]. Listing is ordered by USD price, then key.
#[derive(Debug, Clone)]
pub struct MemoryTierCatalog {
    tiers: Arc<DashMap<String, TierDefinition>>,
    available: Arc<AtomicBool>,
    list_calls: Arc<AtomicUsize>,
    lookup_calls: Arc<AtomicUsize>,
}

impl MemoryTierCatalog {
    /// A catalog holding exactly `tiers`.
    pub fn new(tiers: Vec<TierDefinition>) -> Self {
        let map = DashMap::new();
        for tier in tiers {
            map.insert(tier.tier_key.clone(), tier);
        }
        Self {
            tiers: Arc::new(map),
            available: Arc::new(AtomicBool::new(true)),
            list_calls: Arc::new(AtomicUsize::new(0)),
            lookup_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A catalog holding the default tiers.
    pub fn seeded() -> Self {
        Self::new(default_tiers())
    }

    /// Add or replace a tier.
    pub fn upsert(&self, tier: TierDefinition) {
        self.tiers.insert(tier.tier_key.clone(), tier);
    }

    /// Make every subsequent call succeed (`true`) or fail (`false`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of `get_all_tiers` calls served.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_tier` calls served.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::catalog_unavailable("Tier catalog is unreachable"))
        }
    }
}

#[async_trait]
impl TierCatalog for MemoryTierCatalog {
    async fn get_tier(&self, key: &str) -> AppResult<Option<TierDefinition>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self.tiers.get(key).map(|tier| tier.clone()))
    }

    async fn get_all_tiers(&self) -> AppResult<Vec<TierDefinition>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        let mut tiers: Vec<TierDefinition> =
            self.tiers.iter().map(|entry| entry.value().clone()).collect();
        tiers.sort_by(|a, b| {
            a.price_usd
                .total_cmp(&b.price_usd)
                .then_with(|| a.tier_key.cmp(&b.tier_key))
        });
        Ok(tiers)
    }
}
