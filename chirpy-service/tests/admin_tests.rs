mod common;

use common::TestApp;
use common::POLKA_API_KEY;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn upgrade_event(user_id: &str) -> Value {
    json!({ "event": "user.upgraded", "data": { "user_id": user_id } })
}

#[tokio::test]
async fn test_webhook_upgrades_account() {
    let app = TestApp::spawn().await;
    let session = app.signed_in("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/api/polka/webhooks")
        .header("Authorization", format!("ApiKey {}", POLKA_API_KEY))
        .json(&upgrade_event(&session.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.login(&session.email, "04234").await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["is_chirpy_red"], true);
}

#[tokio::test]
async fn test_webhook_requires_api_key() {
    let app = TestApp::spawn().await;
    let session = app.signed_in("walt@breakingbad.com", "04234").await;

    let missing = app
        .post("/api/polka/webhooks")
        .json(&upgrade_event(&session.id))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = app
        .post("/api/polka/webhooks")
        .header("Authorization", "ApiKey not-the-key")
        .json(&upgrade_event(&session.id))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let bearer = app
        .post("/api/polka/webhooks")
        .bearer_auth(POLKA_API_KEY)
        .json(&upgrade_event(&session.id))
        .send()
        .await
        .unwrap();
    assert_eq!(bearer.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_unknown_account() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/polka/webhooks")
        .header("Authorization", format!("ApiKey {}", POLKA_API_KEY))
        .json(&upgrade_event(&uuid::Uuid::new_v4().to_string()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_webhook_ignores_other_events() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/polka/webhooks")
        .header("Authorization", format!("ApiKey {}", POLKA_API_KEY))
        .json(&json!({ "event": "user.payment_failed", "data": { "user_id": "whatever" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/healthz").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_metrics_count_api_hits() {
    let app = TestApp::spawn().await;

    app.get("/api/healthz").send().await.unwrap();
    app.get("/api/chirps").send().await.unwrap();

    let body: Value = app
        .get("/admin/metrics")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["hits"], 2);
}

#[tokio::test]
async fn test_reset_clears_accounts_in_dev() {
    let app = TestApp::spawn().await;
    let session = app.signed_in("walt@breakingbad.com", "04234").await;

    let response = app.post("/admin/reset").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["removed_accounts"], 1);

    let response = app.login(&session.email, "04234").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.refresh(&session.refresh_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_forbidden_outside_dev() {
    let app = TestApp::spawn_with_platform(false).await;

    let response = app.post("/admin/reset").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
