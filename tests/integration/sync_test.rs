//! Integration tests for remote-to-local entitlement sync.

mod helpers;

use quotaguard_core::types::{FlexibleInstant, RawExpiration, RemoteEntitlementDocument};

#[tokio::test]
async fn test_first_sync_bootstraps_default_tier() {
    let app = helpers::TestApp::new().await;
    assert!(app.document().is_none());

    assert!(app.engine.sync().sync(None, None).await);

    let doc = app.document().expect("bootstrapped document");
    assert_eq!(doc.tier, "bronze");
    assert_eq!(doc.max_devices, 1);
    assert!(doc.active_device_ids.is_empty());

    let snapshot = app.snapshot().await.expect("snapshot saved");
    assert_eq!(snapshot.tier, "bronze");
    assert!(snapshot.is_active);
    assert_eq!(snapshot.max_account_actions, Some(2));
    let days = snapshot
        .expiration
        .expect("expiration")
        .duration_since(&FlexibleInstant::now())
        .num_days();
    assert!((6..=7).contains(&days), "expected a 7 day trial, got {days}");
}

#[tokio::test]
async fn test_expired_trial_renews_in_place() {
    let app = helpers::TestApp::new().await;
    let mut doc = helpers::document("bronze", -3, 1, 1, 1);
    doc.active_device_ids = vec!["laptop".to_string()];
    app.seed(doc);

    assert!(app.engine.sync().sync(None, None).await);

    let doc = app.document().unwrap();
    assert_eq!(doc.tier, "bronze");
    assert_eq!(doc.active_device_ids, vec!["laptop".to_string()]);
    let renewed = doc.expiration_instant.unwrap().parse().unwrap();
    assert!(FlexibleInstant::now().is_before(&renewed));

    let status = app.engine.status().check_status(None, None).await;
    assert!(status.is_usable());
    assert_eq!(status.tier, "bronze");
    assert!(status.days_until_expiration.unwrap() >= 6);
}

#[tokio::test]
async fn test_expired_paid_tier_converts_to_trial() {
    let app = helpers::TestApp::new().await;
    let mut doc = helpers::document("gold", -1, 3, 10, 5);
    doc.active_device_ids = vec!["a".into(), "b".into(), "c".into()];
    app.seed(doc);

    assert!(app.engine.sync().sync(None, None).await);

    let doc = app.document().unwrap();
    assert_eq!(doc.tier, "bronze");
    assert_eq!(doc.max_devices, 1);
    assert_eq!(doc.max_groups, 1);
    assert_eq!(doc.active_device_ids.len(), 3, "devices are never pruned");

    let snapshot = app.snapshot().await.unwrap();
    assert_eq!(snapshot.tier, "bronze");
    assert_eq!(snapshot.max_devices, 1);
}

#[tokio::test]
async fn test_active_paid_tier_is_left_alone() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("gold", 20, 3, 10, 5));
    let writes_before = app.store.write_count();

    assert!(app.engine.sync().sync(None, None).await);

    assert_eq!(app.store.write_count(), writes_before);
    let snapshot = app.snapshot().await.unwrap();
    assert_eq!(snapshot.tier, "gold");
    assert_eq!(snapshot.max_groups, 10);
    assert_eq!(snapshot.max_account_actions, Some(20));
}

#[tokio::test]
async fn test_outage_keeps_cached_snapshot() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("silver", 10, 1, 3, 2));
    assert!(app.engine.sync().sync(None, None).await);
    let before = app.snapshot().await.unwrap();

    app.store.set_available(false);
    assert!(!app.engine.sync().sync(None, None).await);

    let after = app.snapshot().await.unwrap();
    assert_eq!(after, before);
    let status = app.engine.status().check_status(None, None).await;
    assert!(status.is_usable());
    assert_eq!(status.max_groups, 3);
}

#[tokio::test]
async fn test_sync_without_principal_fails() {
    let app = helpers::TestApp::new().await;
    app.session.sign_out().await;

    assert!(!app.engine.sync().sync(None, None).await);
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_native_and_naive_expirations() {
    let app = helpers::TestApp::new().await;
    let future = chrono::Utc::now() + chrono::TimeDelta::days(15);

    app.seed(RemoteEntitlementDocument {
        expiration_instant: Some(RawExpiration::Native {
            seconds: future.timestamp(),
            nanos: 0,
        }),
        ..helpers::document("gold", 0, 3, 10, 5)
    });
    assert!(app.engine.sync().sync(None, None).await);
    assert_eq!(app.snapshot().await.unwrap().tier, "gold");

    let naive = future.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string();
    app.seed(RemoteEntitlementDocument {
        expiration_instant: Some(RawExpiration::Text(naive)),
        ..helpers::document("gold", 0, 3, 10, 5)
    });
    assert!(app.engine.sync().sync(None, None).await);
    let status = app.engine.status().check_status(None, None).await;
    assert!(status.is_usable());
    assert_eq!(status.tier, "gold");
}

#[tokio::test]
async fn test_unparseable_expiration_never_expires() {
    let app = helpers::TestApp::new().await;
    app.seed(RemoteEntitlementDocument {
        expiration_instant: Some(RawExpiration::Text("someday".to_string())),
        ..helpers::document("silver", 0, 1, 3, 2)
    });

    assert!(app.engine.sync().sync(None, None).await);

    let snapshot = app.snapshot().await.unwrap();
    assert!(snapshot.expiration.is_none());
    let status = app.engine.status().check_status(None, None).await;
    assert!(status.is_usable());
    assert!(status.days_until_expiration.is_none());
}
