//! In-memory entitlement store using DashMap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use quotaguard_core::error::AppError;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::EntitlementStore;
use quotaguard_core::types::{LicenseUpdate, RemoteEntitlementDocument};

/// Process-local [`EntitlementStore`].
///
/// Suitable for single-process runs and tests. Cloning shares state.
#[derive(Debug, Clone)]
pub struct MemoryEntitlementStore {
    documents: Arc<DashMap<String, RemoteEntitlementDocument>>,
    available: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl Default for MemoryEntitlementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEntitlementStore {
    /// Creates an empty, reachable store.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            available: Arc::new(AtomicBool::new(true)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Seed a document directly, bypassing availability and write counting.
    pub fn insert(&self, account_id: &str, doc: RemoteEntitlementDocument) {
        self.documents.insert(account_id.to_string(), doc);
    }

    /// Read a document directly, bypassing availability.
    pub fn document(&self, account_id: &str) -> Option<RemoteEntitlementDocument> {
        self.documents.get(account_id).map(|doc| doc.clone())
    }

    /// Make every subsequent call succeed (`true`) or fail (`false`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of successful `set_license` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::remote_unavailable("Entitlement store is unreachable"))
        }
    }
}

#[async_trait]
impl EntitlementStore for MemoryEntitlementStore {
    async fn get_license(&self, account_id: &str) -> AppResult<Option<RemoteEntitlementDocument>> {
        self.ensure_available()?;
        Ok(self.document(account_id))
    }

    async fn set_license(
        &self,
        account_id: &str,
        update: &LicenseUpdate,
        merge: bool,
    ) -> AppResult<()> {
        self.ensure_available()?;
        let mut entry = self.documents.entry(account_id.to_string()).or_default();
        if !merge {
            *entry = RemoteEntitlementDocument::default();
        }
        entry.apply(update);
        drop(entry);

        self.writes.fetch_add(1, Ordering::SeqCst);
        debug!(account_id = %account_id, merge, "Entitlement document written");
        Ok(())
    }

    fn provider_type(&self) -> &'static str {
        "memory"
    }
}
