//! Repository implementations backed by the local SQLite database.

pub mod group;
pub mod linked_account;
pub mod primary;
pub mod snapshot;

pub use group::GroupRepository;
pub use linked_account::LinkedAccountRepository;
pub use primary::SqlitePrimaryDatabase;
pub use snapshot::EntitlementSnapshotRepository;

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    use quotaguard_core::config::database::DatabaseConfig;

    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let db = crate::DatabasePool::connect(&config).await.unwrap();
    crate::migration::run_migrations(db.pool()).await.unwrap();
    db.pool().clone()
}
