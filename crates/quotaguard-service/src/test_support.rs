//! In-memory collaborators for service unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use quotaguard_cache::memory::MemorySnapshotCache;
use quotaguard_core::config::cache::MemoryCacheConfig;
use quotaguard_core::config::entitlement::EntitlementConfig;
use quotaguard_core::error::AppError;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::{EntitlementStore, LocalCache, PrimaryDatabase};
use quotaguard_core::types::{
    EntitlementSnapshot, LicenseUpdate, Principal, RemoteEntitlementDocument,
};
use quotaguard_remote::memory::{MemoryEntitlementStore, MemoryTierCatalog};

use crate::engine::{Collaborators, EntitlementEngine};
use crate::session::StaticSessionProvider;
use crate::sync::EntitlementSyncService;

/// Counters that tests set directly.
#[derive(Debug, Default)]
pub struct FakePrimaryDatabase {
    pub groups: AtomicU64,
    pub accounts: AtomicU64,
    pub broken: AtomicBool,
}

impl FakePrimaryDatabase {
    fn check(&self) -> AppResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            Err(AppError::database("primary database offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PrimaryDatabase for FakePrimaryDatabase {
    async fn count_groups(&self) -> AppResult<u64> {
        self.check()?;
        Ok(self.groups.load(Ordering::SeqCst))
    }

    async fn count_linked_accounts(&self) -> AppResult<u64> {
        self.check()?;
        Ok(self.accounts.load(Ordering::SeqCst))
    }
}

/// Accepts every write but never returns a document.
#[derive(Debug, Default)]
pub struct WriteOnlyStore {
    writes: AtomicU64,
}

impl WriteOnlyStore {
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntitlementStore for WriteOnlyStore {
    async fn get_license(&self, _account_id: &str) -> AppResult<Option<RemoteEntitlementDocument>> {
        Ok(None)
    }

    async fn set_license(
        &self,
        _account_id: &str,
        _update: &LicenseUpdate,
        _merge: bool,
    ) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn provider_type(&self) -> &'static str {
        "write-only"
    }
}

pub struct Harness {
    pub engine: EntitlementEngine,
    pub sync: Arc<EntitlementSyncService>,
    pub auth: StaticSessionProvider,
    pub store: MemoryEntitlementStore,
    pub catalog: MemoryTierCatalog,
    pub cache: MemorySnapshotCache,
    pub primary: Arc<FakePrimaryDatabase>,
    pub principal: Principal,
}

impl Harness {
    /// Signed-in user, empty store, seeded catalog, `default_tier` as the
    /// bootstrap tier and `bronze` as the trial tier.
    pub async fn new(default_tier: &str) -> Self {
        let principal = Principal::new("dara@example.com", "acct-dara");
        let auth = StaticSessionProvider::signed_in(principal.clone());
        let store = MemoryEntitlementStore::new();
        let catalog = MemoryTierCatalog::seeded();
        let cache = MemorySnapshotCache::new(&MemoryCacheConfig::default());
        let primary = Arc::new(FakePrimaryDatabase::default());

        let config = EntitlementConfig {
            default_tier: default_tier.to_string(),
            trial_tier: "bronze".to_string(),
            ..Default::default()
        };
        let engine = EntitlementEngine::new(
            Collaborators {
                auth: Arc::new(auth.clone()),
                store: Arc::new(store.clone()),
                catalog: Arc::new(catalog.clone()),
                cache: Arc::new(cache.clone()),
                primary: primary.clone(),
            },
            config,
        );

        Self {
            sync: engine.sync().clone(),
            engine,
            auth,
            store,
            catalog,
            cache,
            primary,
            principal,
        }
    }

    /// Seed the signed-in account's remote document.
    pub fn seed(&self, doc: RemoteEntitlementDocument) {
        self.store.insert(&self.principal.account_id, doc);
    }

    /// The signed-in user's cached snapshot.
    pub async fn snapshot(&self) -> Option<EntitlementSnapshot> {
        self.cache.get_snapshot(&self.principal.email).await.unwrap()
    }

    pub fn set_groups(&self, count: u64) {
        self.primary.groups.store(count, Ordering::SeqCst);
    }

    pub fn set_accounts(&self, count: u64) {
        self.primary.accounts.store(count, Ordering::SeqCst);
    }
}
