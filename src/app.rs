//! Wires configuration into a ready entitlement engine.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use quotaguard_cache::SnapshotCacheManager;
use quotaguard_core::config::AppConfig;
use quotaguard_core::error::AppError;
use quotaguard_core::types::Principal;
use quotaguard_database::{DatabasePool, SqlitePrimaryDatabase};
use quotaguard_remote::RemoteBackend;
use quotaguard_service::{Collaborators, EntitlementEngine, StaticSessionProvider};

/// Everything a command needs.
pub struct AppContext {
    /// Local database.
    pub db: DatabasePool,
    /// Group and linked-account repositories.
    pub primary: Arc<SqlitePrimaryDatabase>,
    /// The wired services.
    pub engine: EntitlementEngine,
}

impl AppContext {
    /// Build the context step by step. `principal` overrides the configured
    /// session when given.
    pub async fn build(config: &AppConfig, principal: Option<Principal>) -> Result<Self, AppError> {
        // ── Step 1: Local database + migrations ──────────────────────
        ensure_database_dir(&config.database.url).await?;
        let db = DatabasePool::connect(&config.database).await?;
        if config.database.run_migrations {
            quotaguard_database::migration::run_migrations(db.pool()).await?;
        }

        // ── Step 2: Snapshot cache ───────────────────────────────────
        info!(provider = %config.cache.provider, "Initializing snapshot cache");
        let cache = Arc::new(SnapshotCacheManager::new(&config.cache, &db)?);

        // ── Step 3: Remote store and catalog ─────────────────────────
        let remote = RemoteBackend::from_config(&config.remote)?;

        // ── Step 4: Session ──────────────────────────────────────────
        let session = match principal.or_else(|| configured_principal(config)) {
            Some(principal) => StaticSessionProvider::signed_in(principal),
            None => StaticSessionProvider::new(),
        };

        // ── Step 5: Engine ───────────────────────────────────────────
        let primary = Arc::new(SqlitePrimaryDatabase::new(db.pool().clone()));
        let engine = EntitlementEngine::new(
            Collaborators {
                auth: Arc::new(session),
                store: remote.store,
                catalog: remote.catalog,
                cache,
                primary: primary.clone(),
            },
            config.entitlement.clone(),
        );

        Ok(Self {
            db,
            primary,
            engine,
        })
    }
}

fn configured_principal(config: &AppConfig) -> Option<Principal> {
    match (&config.session.email, &config.session.account_id) {
        (Some(email), Some(account_id)) => Some(Principal::new(email, account_id)),
        _ => None,
    }
}

/// Create the parent directory of a file-backed SQLite URL.
pub async fn ensure_database_dir(url: &str) -> Result<(), AppError> {
    if url.contains(":memory:") || url.contains("mode=memory") {
        return Ok(());
    }
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
