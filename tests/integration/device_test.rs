//! Integration tests for device registration against the remote list.

mod helpers;

use quotaguard_service::quota::messages;

#[tokio::test]
async fn test_single_device_plan() {
    let app = helpers::TestApp::new().await;
    let quota = app.engine.quota();

    // New user: bootstrapped onto bronze with one device.
    let first = quota.register_device("laptop").await;
    assert!(first.allowed, "{first:?}");
    assert_eq!(app.document().unwrap().active_device_ids, vec!["laptop".to_string()]);

    let second = quota.register_device("phone").await;
    assert!(!second.allowed);
    assert_eq!(second.current, Some(1));
    assert_eq!(second.limit, 1);
    let reason = second.reason.unwrap();
    assert!(reason.contains("Bronze"), "{reason}");
    assert!(reason.contains("device limit (1)"), "{reason}");

    let again = quota.register_device("laptop").await;
    assert!(again.allowed);
    assert_eq!(app.document().unwrap().active_device_ids.len(), 1);
}

#[tokio::test]
async fn test_removing_a_device_frees_the_slot() {
    let app = helpers::TestApp::new().await;
    let mut doc = helpers::document("bronze", 5, 1, 1, 1);
    doc.active_device_ids = vec!["laptop".to_string()];
    app.seed(doc);

    assert!(!app.engine.quota().can_add_device("phone").await.allowed);
    assert!(app.engine.devices().remove_device("laptop").await);
    assert!(app.engine.quota().register_device("phone").await.allowed);
    assert_eq!(
        app.engine.devices().list_devices().await,
        Some(vec!["phone".to_string()])
    );
}

#[tokio::test]
async fn test_remove_device_contract() {
    let app = helpers::TestApp::new().await;
    assert!(!app.engine.devices().remove_device("laptop").await);

    app.seed(helpers::document("silver", 5, 1, 3, 2));
    assert!(app.engine.devices().remove_device("never-added").await);
}

#[tokio::test]
async fn test_device_ids_are_trimmed() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("gold", 30, 3, 10, 5));

    assert!(app.engine.quota().register_device("  tablet ").await.allowed);
    assert_eq!(app.document().unwrap().active_device_ids, vec!["tablet".to_string()]);

    let blank = app.engine.quota().can_add_device("   ").await;
    assert!(!blank.allowed);
    assert_eq!(blank.reason.as_deref(), Some(messages::INVALID_DEVICE_ID));
}

#[tokio::test]
async fn test_device_check_denies_when_remote_is_down() {
    let app = helpers::TestApp::new().await;
    app.seed(helpers::document("gold", 30, 3, 10, 5));
    assert!(app.engine.sync().sync(None, None).await);

    app.store.set_available(false);
    let decision = app.engine.quota().can_add_device("phone").await;
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some(messages::unverifiable(quotaguard_core::types::ResourceKind::Device).as_str())
    );
}

#[tokio::test]
async fn test_signed_out_user_cannot_register() {
    let app = helpers::TestApp::new().await;
    app.session.sign_out().await;

    let decision = app.engine.quota().register_device("laptop").await;
    assert!(!decision.allowed);
    assert_eq!(decision.reason.as_deref(), Some(messages::SIGN_IN_REQUIRED));
    assert_eq!(app.store.write_count(), 0);
}
