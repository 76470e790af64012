mod common;

use chrono::Duration;
use chrono::Utc;
use common::unauthenticated_body;
use common::TestApp;
use reqwest::header::SET_COOKIE;
use reqwest::StatusCode;
use serde_json::json;
use user_service::inbound::http::session_cookie::SessionCookieSettings;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["message"], "User created successfully");
    assert_eq!(body["data"]["user"]["email"], "nicola@example.com");
    assert!(body["data"]["user"]["id"].is_string());
    assert!(body["data"]["user"]["password_hash"].is_null());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app
        .post("/api/user")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "another_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({ "email": "nicola@example.com" }),
        json!({ "email": "nicola@example.com", "password": "" }),
        json!({ "email": "blank@example.com", "password": "   " }),
        json!({ "email": "", "password": "pass_word!" }),
        json!({ "email": "not-an-email", "password": "pass_word!" }),
        json!({ "email": "nicola@example.com", "password": "x".repeat(73) }),
    ];

    for case in cases {
        let response = app
            .post("/api/user")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {case}");
    }
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app.login("nicola@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("Missing Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("Authorization="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(!cookie.contains("Secure"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Logged in");
    assert!(body["data"]["expires_at"].is_string());
    assert!(body["data"]["token"].is_null());
}

#[tokio::test]
async fn test_login_cookie_secure_when_configured() {
    let app = TestApp::spawn_with_cookie_settings(SessionCookieSettings { secure: true }).await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app.login("nicola@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("Missing Set-Cookie header")
        .to_str()
        .unwrap();
    assert!(cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let wrong_password = app.login("nicola@example.com", "wrong_password").await;
    let unknown_email = app.login("nobody@example.com", "pass_word!").await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    assert!(wrong_password.headers().get(SET_COOKIE).is_none());
    assert!(unknown_email.headers().get(SET_COOKIE).is_none());

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password["data"]["message"],
        "Invalid email or password"
    );
}

#[tokio::test]
async fn test_login_truncated_password_does_not_match() {
    let app = TestApp::spawn().await;
    let password = "p".repeat(72);
    app.register("nicola@example.com", &password).await;

    let response = app
        .login("nicola@example.com", &format!("{password}x"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_login_validate_workflow() {
    let app = TestApp::spawn().await;
    let registered = app.register("nicola@example.com", "pass_word!").await;
    let user_id = registered["data"]["user"]["id"].as_str().unwrap().to_string();

    let response = app.login("nicola@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    // The cookie store replays the session cookie.
    let response = app
        .get("/api/validate")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["id"], user_id);
    assert_eq!(body["data"]["user"]["email"], "nicola@example.com");
    assert!(body["data"]["user"]["password_hash"].is_null());
}

#[tokio::test]
async fn test_list_users_requires_session() {
    let app = TestApp::spawn().await;
    app.register("first@example.com", "pass_word!").await;
    app.register("second@example.com", "pass_word!").await;

    let response = app
        .get("/api/user")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.login("first@example.com", "pass_word!").await;

    let response = app
        .get("/api/user")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let users = body["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user["email"].is_string());
        assert!(user["password_hash"].is_null());
    }
}

#[tokio::test]
async fn test_gate_rejections_share_one_body() {
    let app = TestApp::spawn().await;
    let registered = app.register("nicola@example.com", "pass_word!").await;
    let user_id = registered["data"]["user"]["id"].as_str().unwrap().to_string();

    let expired = app
        .token_issuer
        .issue_at(&user_id, Duration::hours(24), Utc::now() - Duration::hours(25))
        .unwrap()
        .token;

    let valid = app
        .token_issuer
        .issue(&user_id, Duration::hours(24))
        .unwrap()
        .token;
    let mut tampered = valid.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let unknown_subject = app
        .token_issuer
        .issue(uuid::Uuid::new_v4(), Duration::hours(24))
        .unwrap()
        .token;

    let forged = auth::TokenIssuer::new(b"some-other-secret-entirely")
        .unwrap()
        .issue(&user_id, Duration::hours(24))
        .unwrap()
        .token;

    let mut responses = vec![app
        .bare_client
        .get(&format!("{}/api/validate", app.address))
        .send()
        .await
        .expect("Failed to execute request")];
    for token in [expired, tampered, unknown_subject, forged, "garbage".to_string()] {
        responses.push(
            app.get_with_session("/api/validate", &token)
                .send()
                .await
                .expect("Failed to execute request"),
        );
    }

    for response in responses {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, unauthenticated_body());
    }

    // The untouched token still works.
    let response = app
        .get_with_session("/api/validate", &valid)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
