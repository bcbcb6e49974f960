mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn register_then_login() -> Result<()> {
    let server = common::spawn_app().await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "username": "eve", "password": "hemu-secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["admin"]["username"], "eve");
    assert!(body["admin"].get("password_hash").is_none());

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "eve", "password": "hemu-secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["admin"]["id"], 1);
    Ok(())
}

#[tokio::test]
async fn register_validates_input() -> Result<()> {
    let server = common::spawn_app().await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "username": "eve" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Username and password are required");

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "username": "eve", "password": "short" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Password must be at least 6 characters");
    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_username() -> Result<()> {
    let server = common::spawn_app().await?;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let res = server
            .client
            .post(server.url("/api/auth/register"))
            .json(&json!({ "username": "eve", "password": "hemu-secret" }))
            .send()
            .await?;
        assert_eq!(res.status(), expected);
    }

    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> Result<()> {
    let server = common::spawn_app().await?;
    common::admin_token(&server).await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "nobody", "password": "hemu-secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Invalid credentials");

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "eve", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_token() -> Result<()> {
    let server = common::spawn_app().await?;

    let res = server
        .client
        .put(server.url("/api/hero"))
        .json(&json!({ "title_cn": "新标题" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Unauthorized");

    let res = server
        .client
        .post(server.url("/api/services"))
        .bearer_auth("not-a-real-token")
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Invalid token");

    let res = server
        .client
        .delete(server.url("/api/cases/1"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn reads_stay_public() -> Result<()> {
    let server = common::spawn_app().await?;

    for path in [
        "/api/hero",
        "/api/about",
        "/api/services",
        "/api/process",
        "/api/cases",
        "/api/cases/1",
    ] {
        let res = server.client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "GET {} should be public", path);
    }
    Ok(())
}
