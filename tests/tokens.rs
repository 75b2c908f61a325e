//! Personal access token integration tests.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{Auth, TestApp};

#[tokio::test]
async fn test_create_token_defaults_to_all_scopes() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.signup().await;

    let response = app
        .request(
            "POST",
            "/users/tokens",
            Some(json!({ "label": "  ci  " })),
            Auth::Session(&user.session),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let token = response.body["token"].as_str().unwrap();
    let preview = response.body["token_preview"].as_str().unwrap();
    assert_eq!(preview.len(), 6);
    assert!(token.ends_with(preview));
    assert_eq!(response.body["pat"]["label"], "ci");
    assert_eq!(
        response.body["pat"]["scopes"],
        json!(["links:read", "links:write", "links:delete"])
    );
    assert!(response.body["pat"]["revoked_at"].is_null());

    let listed = app
        .request("GET", "/users/tokens", None, Auth::Session(&user.session))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let rows = listed.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], response.body["pat"]["id"]);
    // The raw token is never listed.
    assert!(rows[0].get("token").is_none());
    assert!(rows[0].get("token_hash").is_none());
}

#[tokio::test]
async fn test_unknown_scope_rejected() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.signup().await;

    let response = app
        .request(
            "POST",
            "/users/tokens",
            Some(json!({ "scopes": ["links:read", "admin"] })),
            Auth::Session(&user.session),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_scopes_limit_pat_access() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.signup().await;
    let results = app
        .create_bulk(&user, json!([{ "item_id": "scoped", "secret": "x" }]))
        .await;
    let link = results[0]["link_token"].as_str().unwrap().to_string();

    let read_only = app.create_pat(&user, &["links:read"]).await;

    let status = app
        .request("GET", "/links/status", None, Auth::Bearer(&read_only))
        .await;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(status.body.as_array().unwrap().len(), 1);

    let create = app
        .request(
            "POST",
            "/links/bulk",
            Some(json!([{ "item_id": "other", "secret": "y" }])),
            Auth::Bearer(&read_only),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/links/{link}"), None, Auth::Bearer(&read_only))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let writer = app.create_pat(&user, &["links:write", "links:delete"]).await;
    let create = app
        .request(
            "POST",
            "/links/bulk",
            Some(json!([{ "item_id": "other", "secret": "y" }])),
            Auth::Bearer(&writer),
        )
        .await;
    assert_eq!(create.status, StatusCode::CREATED);
    assert_eq!(create.body["results"][0]["status"], "created");

    let delete = app
        .request("DELETE", &format!("/links/{link}"), None, Auth::Bearer(&writer))
        .await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);

    let status = app
        .request("GET", "/links/status", None, Auth::Bearer(&writer))
        .await;
    assert_eq!(status.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_revoked_token_stops_working() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.signup().await;

    let created = app
        .request(
            "POST",
            "/users/tokens",
            Some(json!({ "scopes": ["links:read"] })),
            Auth::Session(&user.session),
        )
        .await;
    let token = created.body["token"].as_str().unwrap().to_string();
    let id = created.body["pat"]["id"].as_str().unwrap().to_string();
    let path = format!("/users/tokens/{id}");

    let before = app
        .request("GET", "/links/status", None, Auth::Bearer(&token))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    let revoked = app
        .request("DELETE", &path, None, Auth::Session(&user.session))
        .await;
    assert_eq!(revoked.status, StatusCode::NO_CONTENT);

    let after = app
        .request("GET", "/links/status", None, Auth::Bearer(&token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let first_revoked_at = fetch_revoked_at(&app, &user.session).await;
    assert!(first_revoked_at.is_some());

    let again = app
        .request("DELETE", &path, None, Auth::Session(&user.session))
        .await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);
    assert_eq!(fetch_revoked_at(&app, &user.session).await, first_revoked_at);
}

async fn fetch_revoked_at(app: &TestApp, session: &str) -> Option<String> {
    let listed = app
        .request("GET", "/users/tokens", None, Auth::Session(session))
        .await;
    listed.body[0]["revoked_at"].as_str().map(str::to_string)
}

#[tokio::test]
async fn test_revoke_foreign_or_malformed_id() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.signup().await;
    let stranger = app.signup().await;

    let created = app
        .request("POST", "/users/tokens", Some(json!({})), Auth::Session(&owner.session))
        .await;
    let id = created.body["pat"]["id"].as_str().unwrap().to_string();

    let foreign = app
        .request(
            "DELETE",
            &format!("/users/tokens/{id}"),
            None,
            Auth::Session(&stranger.session),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request(
            "DELETE",
            "/users/tokens/not-a-uuid",
            None,
            Auth::Session(&owner.session),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);

    assert!(fetch_revoked_at(&app, &owner.session).await.is_none());
}

#[tokio::test]
async fn test_pat_cannot_mint_tokens() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.signup().await;
    let pat = app.create_pat(&user, &["links:read", "links:write", "links:delete"]).await;

    let response = app
        .request("POST", "/users/tokens", Some(json!({})), Auth::Bearer(&pat))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
