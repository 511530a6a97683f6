//! Integration tests for group and linked-account quotas over SQLite counts.

mod helpers;

use quotaguard_service::quota::messages;

#[tokio::test]
async fn test_group_limit_boundary() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("silver", 30, 1, 3, 2));

    app.create_groups(2).await;
    let decision = app.engine.quota().can_add_group().await;
    assert!(decision.allowed);
    assert_eq!(decision.current, Some(2));
    assert_eq!(decision.limit, 3);

    app.create_groups(1).await;
    let decision = app.engine.quota().can_add_group().await;
    assert!(!decision.allowed);
    assert_eq!(decision.current, Some(3));
    let reason = decision.reason.unwrap();
    assert!(reason.contains("Silver"), "{reason}");
    assert!(reason.contains("group limit (3)"), "{reason}");
}

#[tokio::test]
async fn test_deleting_a_group_frees_quota() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("bronze", 5, 1, 1, 1));
    app.create_groups(1).await;
    assert!(!app.engine.quota().can_add_group().await.allowed);

    assert!(app.primary.groups().delete_by_name("group-0").await.unwrap());
    assert!(app.engine.quota().can_add_group().await.allowed);
}

#[tokio::test]
async fn test_account_limit_boundary() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("gold", 30, 3, 10, 5));

    app.link_accounts(4).await;
    assert!(app.engine.quota().can_add_account().await.allowed);

    app.link_accounts(1).await;
    let decision = app.engine.quota().can_add_account().await;
    assert!(!decision.allowed);
    assert_eq!(decision.current, Some(5));
    assert!(decision.reason.unwrap().contains("account limit (5)"));
}

#[tokio::test]
async fn test_unlimited_tier_skips_counting() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("premium", 30, -1, -1, -1));
    app.create_groups(25).await;

    let groups = app.engine.quota().can_add_group().await;
    assert!(groups.allowed);
    assert_eq!(groups.limit, -1);

    let accounts = app.engine.quota().can_add_account().await;
    assert!(accounts.allowed);
}

#[tokio::test]
async fn test_first_check_syncs_lazily() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("silver", 30, 1, 3, 2));
    assert!(app.snapshot().await.is_none());

    let decision = app.engine.quota().can_add_group().await;
    assert!(decision.allowed);
    assert_eq!(decision.limit, 3);
    assert!(app.snapshot().await.is_some());
}

#[tokio::test]
async fn test_no_cache_and_unreachable_remote_requires_renewal() {
    let app = helpers::TestApp::new().await;
    app.store.set_available(false);

    let decision = app.engine.quota().can_add_group().await;
    assert!(!decision.allowed);
    assert_eq!(decision.reason.as_deref(), Some(messages::RENEWAL_REQUIRED));
}

#[tokio::test]
async fn test_usage_summary_reports_live_counts() {
    let app = helpers::TestApp::new().await;
    let mut doc = helpers::document("gold", 30, 3, 10, 5);
    doc.active_device_ids = vec!["phone".to_string()];
    app.seed(doc);
    app.create_groups(4).await;
    app.link_accounts(2).await;

    let summary = app.engine.quota().usage_summary().await;
    assert_eq!(summary.tier, "gold");
    assert!(summary.active);
    let used: Vec<Option<u64>> = summary.resources.iter().map(|r| r.used).collect();
    assert_eq!(used, vec![Some(1), Some(4), Some(2)]);
    let limits: Vec<i64> = summary.resources.iter().map(|r| r.limit).collect();
    assert_eq!(limits, vec![3, 10, 5]);
}
