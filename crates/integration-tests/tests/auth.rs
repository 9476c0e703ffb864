//! Integration tests for account registration and sessions.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (pachara-cli migrate)
//! - The API server running (cargo run -p pachara-api)
//!
//! Run with: cargo test -p pachara-integration-tests -- --ignored

use pachara_integration_tests::{base_url, browser_client, unique_username};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn register(client: &Client, username: &str, password: &str) -> StatusCode {
    client
        .post(format!("{}/register", base_url()))
        .json(&json!({"username": username, "password": password}))
        .send()
        .await
        .expect("Failed to register")
        .status()
}

async fn login(client: &Client, username: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/login", base_url()))
        .json(&json!({"username": username, "password": password}))
        .send()
        .await
        .expect("Failed to log in")
}

async fn check_login(client: &Client) -> reqwest::Response {
    client
        .get(format!("{}/check-login", base_url()))
        .send()
        .await
        .expect("Failed to check login")
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_then_duplicate_conflicts() {
    let client = browser_client();
    let username = unique_username("dup");

    assert_eq!(register(&client, &username, "pw-1").await, StatusCode::CREATED);
    assert_eq!(register(&client, &username, "pw-2").await, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_response_text() {
    let resp = browser_client()
        .post(format!("{}/register", base_url()))
        .json(&json!({"username": unique_username("text"), "password": "pw", "role": "admin"}))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.text().await.expect("Failed to read response"),
        "User registered successfully"
    );
}

// ============================================================================
// Login / Session
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_full_session_lifecycle() {
    let client = browser_client();
    let username = unique_username("life");

    assert_eq!(register(&client, &username, "hunter2").await, StatusCode::CREATED);

    // Not logged in yet
    assert_eq!(check_login(&client).await.status(), StatusCode::UNAUTHORIZED);

    let resp = login(&client, &username, "hunter2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("Login should set a cookie")
        .to_owned();
    assert!(set_cookie.starts_with("session-id="));
    assert!(set_cookie.contains("HttpOnly"));
    let body: Value = resp.json().await.expect("Failed to parse login body");
    assert_eq!(body, json!({"username": username}));

    let resp = check_login(&client).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse check-login body");
    assert_eq!(body, json!({"user": {"username": username}}));

    let resp = client
        .post(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse logout body");
    assert_eq!(body, json!({"message": "Logout successful"}));

    assert_eq!(check_login(&client).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let client = browser_client();
    let username = unique_username("wrong");
    assert_eq!(register(&client, &username, "right").await, StatusCode::CREATED);

    let wrong = login(&client, &username, "wrong").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_text = wrong.text().await.expect("Failed to read response");

    let unknown = login(&client, &unique_username("ghost"), "right").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_text = unknown.text().await.expect("Failed to read response");

    assert_eq!(wrong_text, "Invalid credentials");
    assert_eq!(wrong_text, unknown_text);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_logout_without_session_succeeds() {
    let resp = browser_client()
        .post(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_session_cookie_not_shared_between_clients() {
    let alice = browser_client();
    let username = unique_username("solo");
    assert_eq!(register(&alice, &username, "pw").await, StatusCode::CREATED);
    assert_eq!(login(&alice, &username, "pw").await.status(), StatusCode::OK);

    let stranger = browser_client();
    assert_eq!(check_login(&stranger).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(check_login(&alice).await.status(), StatusCode::OK);
}
