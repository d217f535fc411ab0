mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn root_describes_the_api() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "moviedb-api");
    assert!(body["endpoints"].is_object(), "missing endpoints: {}", body);

    Ok(())
}

#[tokio::test]
async fn health_reports_status_without_a_database() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/health", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "degraded");

    Ok(())
}

#[tokio::test]
async fn login_without_password_is_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": "ana@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap_or_default().contains("password"));

    Ok(())
}

#[tokio::test]
async fn register_with_blank_fields_is_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&json!({ "email": "ana@example.com", "password": "", "gender": "female", "role": "user" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
