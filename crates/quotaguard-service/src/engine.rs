//! The entitlement engine facade.

use std::sync::Arc;

use tracing::info;

use quotaguard_core::config::entitlement::EntitlementConfig;
use quotaguard_core::traits::{
    AuthProvider, EntitlementStore, LocalCache, PrimaryDatabase, TierCatalog,
};

use crate::catalog::TierCatalogService;
use crate::device::DeviceRegistry;
use crate::quota::QuotaEnforcer;
use crate::status::EntitlementStatusService;
use crate::sync::{EntitlementBootstrapper, EntitlementSyncService};

/// The external collaborators the engine is built from.
#[derive(Clone)]
pub struct Collaborators {
    /// Signed-in principal.
    pub auth: Arc<dyn AuthProvider>,
    /// Remote entitlement documents.
    pub store: Arc<dyn EntitlementStore>,
    /// Remote tier catalog.
    pub catalog: Arc<dyn TierCatalog>,
    /// Persisted snapshot cache.
    pub cache: Arc<dyn LocalCache>,
    /// Live group and account counters.
    pub primary: Arc<dyn PrimaryDatabase>,
}

/// Every entitlement service, wired once at start-up and passed by
/// reference from there on.
#[derive(Clone)]
pub struct EntitlementEngine {
    catalog: Arc<TierCatalogService>,
    sync: Arc<EntitlementSyncService>,
    status: Arc<EntitlementStatusService>,
    devices: Arc<DeviceRegistry>,
    quota: Arc<QuotaEnforcer>,
}

impl std::fmt::Debug for EntitlementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementEngine")
            .field("sync", &self.sync)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl EntitlementEngine {
    /// Build the service graph.
    pub fn new(collaborators: Collaborators, config: EntitlementConfig) -> Self {
        let Collaborators {
            auth,
            store,
            catalog,
            cache,
            primary,
        } = collaborators;

        let catalog = Arc::new(TierCatalogService::new(catalog));
        let bootstrapper = Arc::new(EntitlementBootstrapper::new(
            Arc::clone(&catalog),
            config.clone(),
        ));
        let sync = Arc::new(EntitlementSyncService::new(
            Arc::clone(&auth),
            Arc::clone(&store),
            Arc::clone(&cache),
            Arc::clone(&catalog),
            Arc::clone(&bootstrapper),
        ));
        let status = Arc::new(EntitlementStatusService::new(
            Arc::clone(&auth),
            cache,
            Arc::clone(&catalog),
            config.clone(),
        ));
        let devices = Arc::new(DeviceRegistry::new(
            Arc::clone(&auth),
            Arc::clone(&store),
            bootstrapper,
        ));
        let quota = Arc::new(QuotaEnforcer::new(
            auth,
            store,
            primary,
            Arc::clone(&catalog),
            Arc::clone(&sync),
            Arc::clone(&status),
            Arc::clone(&devices),
        ));

        info!(
            default_tier = %config.default_tier,
            trial_tier = %config.trial_tier,
            "Entitlement engine ready"
        );

        Self {
            catalog,
            sync,
            status,
            devices,
            quota,
        }
    }

    /// Tier catalog lookups.
    pub fn catalog(&self) -> &Arc<TierCatalogService> {
        &self.catalog
    }

    /// Remote-to-local sync.
    pub fn sync(&self) -> &Arc<EntitlementSyncService> {
        &self.sync
    }

    /// Cache-only status.
    pub fn status(&self) -> &Arc<EntitlementStatusService> {
        &self.status
    }

    /// Device membership.
    pub fn devices(&self) -> &Arc<DeviceRegistry> {
        &self.devices
    }

    /// Quota decisions.
    pub fn quota(&self) -> &Arc<QuotaEnforcer> {
        &self.quota
    }
}
