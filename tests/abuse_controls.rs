//! CSRF and rate-limit behavior over the wire.

use credential_intake::config::IntakeConfig;

mod common;

#[tokio::test]
async fn test_missing_csrf_header_rejected_with_403() {
    let server = common::start_server(IntakeConfig::default()).await;
    let client = common::client();
    // Establish a session, but omit the header on submit.
    let _token = common::fetch_token(&client, &server).await;

    let response = client
        .post(server.url("/submit"))
        .json(&common::valid_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid CSRF token");
    assert!(server.stored_records().await.is_empty());
}

#[tokio::test]
async fn test_token_without_session_cookie_rejected() {
    let server = common::start_server(IntakeConfig::default()).await;

    let with_cookies = common::client();
    let token = common::fetch_token(&with_cookies, &server).await;

    // Same token presented from a client with no session cookie.
    let without_cookies = reqwest::Client::builder().no_proxy().build().unwrap();
    let response = without_cookies
        .post(server.url("/submit"))
        .header("X-CSRF-Token", &token)
        .json(&common::valid_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    assert!(server.stored_records().await.is_empty());
}

#[tokio::test]
async fn test_altered_token_rejected() {
    let server = common::start_server(IntakeConfig::default()).await;
    let client = common::client();
    let token = common::fetch_token(&client, &server).await;

    let mut altered = token.clone();
    altered.pop();
    altered.push('!');

    let response = client
        .post(server.url("/submit"))
        .header("X-CSRF-Token", &altered)
        .json(&common::valid_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    assert!(server.stored_records().await.is_empty());
}

#[tokio::test]
async fn test_refetch_supersedes_previous_token() {
    let server = common::start_server(IntakeConfig::default()).await;
    let client = common::client();

    let first = common::fetch_token(&client, &server).await;
    let second = common::fetch_token(&client, &server).await;
    assert_ne!(first, second);

    let response = client
        .post(server.url("/submit"))
        .header("X-CSRF-Token", &first)
        .json(&common::valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    let response = client
        .post(server.url("/submit"))
        .header("X-CSRF-Token", &second)
        .json(&common::valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_submissions_over_ceiling_rejected_with_429() {
    let mut config = IntakeConfig::default();
    config.rate_limit.max_requests = 2;
    let server = common::start_server(config).await;
    let client = common::client();
    let token = common::fetch_token(&client, &server).await;

    for _ in 0..2 {
        let response = client
            .post(server.url("/submit"))
            .header("X-CSRF-Token", &token)
            .json(&common::valid_body())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let response = client
        .post(server.url("/submit"))
        .header("X-CSRF-Token", &token)
        .json(&common::valid_body())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 429);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Too many requests, please try again later.");
    assert_eq!(server.stored_records().await.len(), 2);
}
