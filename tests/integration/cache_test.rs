//! Integration tests for the snapshot cache and tier catalog cache.

mod helpers;

use quotaguard_core::traits::LocalCache;
use quotaguard_core::types::TierDefinition;

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("quotaguard.db").display());

    let first = helpers::TestApp::with_config(helpers::test_config(&url)).await;
    first.seed(helpers::document("gold", 30, 3, 10, 5));
    assert!(first.engine.sync().sync(None, None).await);
    let store = first.store.clone();
    let catalog = first.catalog.clone();
    first.db.close().await;

    // Same database, remote now unreachable: status comes from disk.
    store.set_available(false);
    let second = helpers::TestApp::with_remote(helpers::test_config(&url), store, catalog).await;
    let status = second.engine.status().check_status(None, None).await;
    assert!(status.from_cache);
    assert!(status.is_usable());
    assert_eq!(status.tier, "gold");
    assert_eq!(status.max_groups, 10);
}

#[tokio::test]
async fn test_cache_keys_ignore_email_case() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("silver", 30, 1, 3, 2));
    assert!(app.engine.sync().sync(None, None).await);

    let found = app.cache.get_snapshot("  LENA@Example.com ").await.unwrap();
    assert_eq!(found.map(|s| s.tier), Some("silver".to_string()));
}

#[tokio::test]
async fn test_memory_cache_provider() {
    let mut config = helpers::test_config("sqlite::memory:");
    config.cache.provider = "memory".to_string();
    let app = helpers::TestApp::with_config(config).await;
    assert_eq!(app.cache.provider_type(), "memory");

    app.seed(helpers::document("gold", 30, 3, 10, 5));
    assert!(app.engine.sync().sync(None, None).await);
    assert_eq!(app.snapshot().await.unwrap().tier, "gold");

    let persisted: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entitlement_snapshots")
        .fetch_one(app.db.pool())
        .await
        .unwrap();
    assert_eq!(persisted, 0);
}

#[tokio::test]
async fn test_tier_list_is_cached_until_cleared() {
    let app = helpers::TestApp::new().await;
    let catalog = app.engine.catalog();

    let tiers = catalog.get_all_tiers().await;
    let keys: Vec<&str> = tiers.iter().map(|t| t.tier_key.as_str()).collect();
    assert_eq!(keys, vec!["bronze", "silver", "gold", "premium"]);
    assert_eq!(app.catalog.list_calls(), 1);

    app.catalog.upsert(TierDefinition {
        tier_key: "platinum".to_string(),
        display_name: "Platinum".to_string(),
        max_devices: 5,
        max_groups: 20,
        max_accounts: 10,
        max_account_actions: Some(50),
        price_usd: 12.99,
        price_khr: 53_000.0,
        features: Vec::new(),
        period_days: Some(30),
    });
    assert_eq!(catalog.get_all_tiers().await.len(), 4);
    assert_eq!(app.catalog.list_calls(), 1);

    catalog.clear_cache().await;
    assert_eq!(catalog.get_all_tiers().await.len(), 5);
    assert_eq!(app.catalog.list_calls(), 2);
}

#[tokio::test]
async fn test_custom_tier_is_never_fetched() {
    let app = helpers::TestApp::new().await;
    assert!(app.engine.catalog().get_tier("custom").await.is_none());
    assert_eq!(app.catalog.lookup_calls(), 0);
}
