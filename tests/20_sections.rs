mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn hero_serves_seeded_content() -> Result<()> {
    let server = common::spawn_app().await?;

    let res = server.client.get(server.url("/api/hero")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let hero: Value = res.json().await?;
    assert_eq!(hero["id"], 1);
    assert_eq!(hero["title_cn"], "HEMU");
    assert_eq!(hero["subtitle_cn"], "探索美学与商业的无限可能");
    assert_eq!(hero["cta_text_cn"], "WHO WE ARE");
    assert_eq!(hero["background_image"], "../assets/images/fullscreen.png");
    Ok(())
}

#[tokio::test]
async fn about_serves_seeded_content() -> Result<()> {
    let server = common::spawn_app().await?;

    let res = server.client.get(server.url("/api/about")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let about: Value = res.json().await?;
    assert_eq!(about["title_cn"], "禾木");
    assert_eq!(about["projects_count"], 100);
    assert_eq!(about["partners_count"], 50);
    Ok(())
}

#[tokio::test]
async fn hero_update_merges_partial_payload() -> Result<()> {
    let server = common::spawn_app().await?;
    let token = common::admin_token(&server).await?;

    let res = server
        .client
        .put(server.url("/api/hero"))
        .bearer_auth(&token)
        .json(&json!({ "title_cn": "新标题", "title_en": "New Title" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let hero: Value = res.json().await?;
    assert_eq!(hero["title_cn"], "新标题");
    assert_eq!(hero["title_en"], "New Title");
    // untouched fields keep their seeded values
    assert_eq!(hero["cta_text_cn"], "WHO WE ARE");

    let persisted: Value = server
        .client
        .get(server.url("/api/hero"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(persisted["title_cn"], "新标题");
    Ok(())
}

#[tokio::test]
async fn about_update_accepts_counters() -> Result<()> {
    let server = common::spawn_app().await?;
    let token = common::admin_token(&server).await?;

    let res = server
        .client
        .put(server.url("/api/about"))
        .bearer_auth(&token)
        .json(&json!({ "projects_count": 120, "partners_count": 64 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let about: Value = res.json().await?;
    assert_eq!(about["projects_count"], 120);
    assert_eq!(about["partners_count"], 64);
    Ok(())
}

#[tokio::test]
async fn section_updates_reject_bad_fields() -> Result<()> {
    let server = common::spawn_app().await?;
    let token = common::admin_token(&server).await?;

    let res = server
        .client
        .put(server.url("/api/hero"))
        .bearer_auth(&token)
        .json(&json!({ "favourite_color": "green" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Unknown field 'favourite_color'");

    let res = server
        .client
        .put(server.url("/api/hero"))
        .bearer_auth(&token)
        .json(&json!({ "title_cn": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Field 'title_cn' cannot be null");

    // id is server-managed on the singletons
    let res = server
        .client
        .put(server.url("/api/about"))
        .bearer_auth(&token)
        .json(&json!({ "id": 9 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn empty_section_update_is_a_no_op() -> Result<()> {
    let server = common::spawn_app().await?;
    let token = common::admin_token(&server).await?;

    let before: Value = server
        .client
        .get(server.url("/api/hero"))
        .send()
        .await?
        .json()
        .await?;

    let res = server
        .client
        .put(server.url("/api/hero"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let after: Value = res.json().await?;
    assert_eq!(after["updated_at"], before["updated_at"]);
    Ok(())
}
