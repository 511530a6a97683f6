//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use quotaguard_cache::SnapshotCacheManager;
use quotaguard_core::config::AppConfig;
use quotaguard_core::traits::LocalCache;
use quotaguard_core::types::{EntitlementSnapshot, FlexibleInstant, Principal, RemoteEntitlementDocument};
use quotaguard_database::{DatabasePool, SqlitePrimaryDatabase};
use quotaguard_remote::memory::{MemoryEntitlementStore, MemoryTierCatalog};
use quotaguard_service::{Collaborators, EntitlementEngine, StaticSessionProvider};

/// Test application context
pub struct TestApp {
    /// The wired services
    pub engine: EntitlementEngine,
    /// Database pool for direct queries
    pub db: DatabasePool,
    /// Group and linked-account repositories
    pub primary: Arc<SqlitePrimaryDatabase>,
    /// Snapshot cache the engine writes to
    pub cache: Arc<SnapshotCacheManager>,
    /// Remote entitlement documents
    pub store: MemoryEntitlementStore,
    /// Remote tier catalog
    pub catalog: MemoryTierCatalog,
    /// Session the engine acts for
    pub session: StaticSessionProvider,
    /// The signed-in user
    pub principal: Principal,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// A signed-in user over an in-memory SQLite database, an empty remote
    /// store and the seeded catalog.
    pub async fn new() -> Self {
        Self::with_config(test_config("sqlite::memory:")).await
    }

    /// Same as [`TestApp::new`] with explicit configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        let store = MemoryEntitlementStore::new();
        let catalog = MemoryTierCatalog::seeded();
        Self::with_remote(config, store, catalog).await
    }

    /// Build over an existing remote store and catalog, as a second
    /// process sharing the same backend would.
    pub async fn with_remote(
        config: AppConfig,
        store: MemoryEntitlementStore,
        catalog: MemoryTierCatalog,
    ) -> Self {
        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to open test database");
        quotaguard_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let cache = Arc::new(
            SnapshotCacheManager::new(&config.cache, &db).expect("Failed to init snapshot cache"),
        );
        let primary = Arc::new(SqlitePrimaryDatabase::new(db.pool().clone()));
        let principal = Principal::new("lena@example.com", "acct-lena");
        let session = StaticSessionProvider::signed_in(principal.clone());

        let engine = EntitlementEngine::new(
            Collaborators {
                auth: Arc::new(session.clone()),
                store: Arc::new(store.clone()),
                catalog: Arc::new(catalog.clone()),
                cache: cache.clone(),
                primary: primary.clone(),
            },
            config.entitlement.clone(),
        );

        Self {
            engine,
            db,
            primary,
            cache,
            store,
            catalog,
            session,
            principal,
            config,
        }
    }

    /// Seed the signed-in account's remote document.
    pub fn seed(&self, doc: RemoteEntitlementDocument) {
        self.store.insert(&self.principal.account_id, doc);
    }

    /// The signed-in account's remote document.
    pub fn document(&self) -> Option<RemoteEntitlementDocument> {
        self.store.document(&self.principal.account_id)
    }

    /// The signed-in user's cached snapshot.
    pub async fn snapshot(&self) -> Option<EntitlementSnapshot> {
        self.cache
            .get_snapshot(&self.principal.email)
            .await
            .expect("Failed to read snapshot")
    }

    /// Create `count` groups directly in the database.
    pub async fn create_groups(&self, count: usize) {
        for i in 0..count {
            self.primary
                .groups()
                .create(&format!("group-{i}"))
                .await
                .expect("Failed to create group");
        }
    }

    /// Link `count` accounts directly in the database.
    pub async fn link_accounts(&self, count: usize) {
        for i in 0..count {
            self.primary
                .accounts()
                .create("telegram", &format!("tg-{i}"), None)
                .await
                .expect("Failed to link account");
        }
    }
}

/// Default config over the given database URL with the SQLite cache.
pub fn test_config(database_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url.to_string();
    config.cache.provider = "sqlite".to_string();
    config
}

/// A paid document expiring `days` from now (negative for the past).
pub fn document(tier: &str, days: i64, devices: i64, groups: i64, accounts: i64) -> RemoteEntitlementDocument {
    RemoteEntitlementDocument {
        tier: tier.to_string(),
        expiration_instant: Some(
            FlexibleInstant::now()
                .plus_days(days)
                .expect("expiration in range")
                .into(),
        ),
        max_devices: devices,
        max_groups: groups,
        max_accounts: accounts,
        ..Default::default()
    }
}
