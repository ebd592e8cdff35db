mod common;

use axum_test::TestServer;
use chrono::{Duration, Utc};
use common::{StoreCall, create_test_context, link};
use link_cache::api::routes::app_router;
use link_cache::application::services::CacheTask;

#[tokio::test]
async fn test_redirect_cache_miss_queues_population() {
    let mut ctx = create_test_context(vec![link("link_1", "dub.sh", "launch", "https://x")]);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/launch").add_header("Host", "dub.sh").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://x");

    match ctx.rx.try_recv() {
        Ok(CacheTask::Set(queued)) => assert_eq!(queued.id, "link_1"),
        other => panic!("expected a queued Set task, got {:?}", other),
    }
    assert!(ctx.rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_cache_hit_skips_database() {
    let mut ctx = create_test_context(vec![]);
    ctx.store.insert_raw(
        "dub.sh:launch",
        r#"{"id":"link_1","url":"https://cached","projectId":"proj_1"}"#,
    );
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server
        .get("/LAUNCH")
        .add_header("Host", "Dub.SH:8080")
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://cached");
    assert!(ctx.rx.try_recv().is_err());
    assert_eq!(
        ctx.store.calls(),
        vec![StoreCall::Get {
            key: "dub.sh:launch".to_string()
        }]
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let mut ctx = create_test_context(vec![]);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/missing").add_header("Host", "dub.sh").await;

    assert_eq!(response.status_code(), 404);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert!(ctx.rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_falls_back_to_database_when_cache_down() {
    let mut ctx = create_test_context(vec![link("link_1", "dub.sh", "launch", "https://x")]);
    ctx.store.set_unavailable(true);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/launch").add_header("Host", "dub.sh").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://x");
    assert!(ctx.rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_password_protected() {
    let mut protected = link("link_1", "dub.sh", "secret", "https://x");
    protected.password = Some("hunter2".to_string());
    let ctx = create_test_context(vec![protected]);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/secret").add_header("Host", "dub.sh").await;

    assert_eq!(response.status_code(), 403);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["reason"], "password_required");
}

#[tokio::test]
async fn test_redirect_expired_with_fallback_url() {
    let mut expired = link("link_1", "dub.sh", "old", "https://x");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    expired.expired_url = Some("https://dub.co/expired".to_string());
    let ctx = create_test_context(vec![expired]);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/old").add_header("Host", "dub.sh").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://dub.co/expired");
}

#[tokio::test]
async fn test_redirect_expired_without_fallback_is_gone() {
    let mut expired = link("link_1", "dub.sh", "old", "https://x");
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    let ctx = create_test_context(vec![expired]);
    let server = TestServer::new(app_router(ctx.state.clone())).unwrap();

    let response = server.get("/old").add_header("Host", "dub.sh").await;

    assert_eq!(response.status_code(), 410);
}
