mod common;

use chrono::Duration;
use common::error_message;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_chirp_cleans_profanity() {
    let app = TestApp::spawn().await;
    let session = app.signed_in("walt@breakingbad.com", "04234").await;

    let data = app
        .create_chirp(&session.token, "This is a kerfuffle opinion I need to share with the world")
        .await;

    assert_eq!(
        data["body"],
        "This is a **** opinion I need to share with the world"
    );
    assert_eq!(data["user_id"], session.id.as_str());
}

#[tokio::test]
async fn test_create_chirp_too_long() {
    let app = TestApp::spawn().await;
    let session = app.signed_in("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/api/chirps")
        .bearer_auth(&session.token)
        .json(&json!({ "body": "a".repeat(141) }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Chirp is too long");
}

#[tokio::test]
async fn test_create_chirp_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/chirps")
        .json(&json!({ "body": "anonymous" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_chirps_filter_and_sort() {
    let app = TestApp::spawn().await;
    let walt = app.signed_in("walt@breakingbad.com", "04234").await;
    let jesse = app.signed_in("jesse@breakingbad.com", "yo").await;

    app.create_chirp(&walt.token, "first").await;
    app.clock.advance(Duration::seconds(1));
    app.create_chirp(&jesse.token, "second").await;
    app.clock.advance(Duration::seconds(1));
    app.create_chirp(&walt.token, "third").await;

    let bodies = |body: Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["body"].as_str().unwrap().to_string())
            .collect()
    };

    let all: Value = app.get("/api/chirps").send().await.unwrap().json().await.unwrap();
    assert_eq!(bodies(all), vec!["first", "second", "third"]);

    let desc: Value = app
        .get("/api/chirps?sort=desc")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bodies(desc), vec!["third", "second", "first"]);

    let walts: Value = app
        .get(&format!("/api/chirps?author_id={}", walt.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bodies(walts), vec!["first", "third"]);
}

#[tokio::test]
async fn test_get_chirp() {
    let app = TestApp::spawn().await;
    let session = app.signed_in("walt@breakingbad.com", "04234").await;
    let chirp = app.create_chirp(&session.token, "say my name").await;

    let response = app
        .get(&format!("/api/chirps/{}", chirp["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], chirp);

    let missing = app
        .get(&format!("/api/chirps/{}", uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = app.get("/api/chirps/not-a-uuid").send().await.unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_chirp_only_by_author() {
    let app = TestApp::spawn().await;
    let walt = app.signed_in("walt@breakingbad.com", "04234").await;
    let jesse = app.signed_in("jesse@breakingbad.com", "yo").await;
    let chirp = app.create_chirp(&walt.token, "mine").await;
    let path = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());

    let response = app.delete(&path).bearer_auth(&jesse.token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.delete(&path).bearer_auth(&walt.token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.delete(&path).bearer_auth(&walt.token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get(&path).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
