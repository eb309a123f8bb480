#![allow(dead_code)]

//! Test infrastructure for sso-server API tests

use sso_config::SiteConfig;
use sso_core::{NewUser, Provider, SettingsStore, SsoSettings, Uid};
use sso_db::{Database, UserRepository};
use sso_link::ProviderProfile;
use sso_server::{AppState, OAuthClient, OAuthError, OAuthResult};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use reqwest::Url;
use tower::ServiceExt;

pub const SITE_URL: &str = "https://forum.example.com";
pub const ADMIN_UID: i64 = 1;
pub const CLIENT_ID: &str = "test-client";
pub const CALLBACK: &str = "/auth/github/callback";

/// Stands in for the provider: only codes handed out with [`grant`] redeem.
///
/// [`grant`]: FakeOAuthClient::grant
#[derive(Default)]
pub struct FakeOAuthClient {
    grants: Mutex<HashMap<String, ProviderProfile>>,
    redeemed: Mutex<Vec<String>>,
}

impl FakeOAuthClient {
    /// Make `code` redeemable for `profile` (JSON in the normalized shape)
    pub fn grant(&self, code: &str, profile: serde_json::Value) {
        let profile = serde_json::from_value(profile).expect("Invalid test profile");
        self.grants
            .lock()
            .unwrap()
            .insert(code.to_string(), profile);
    }

    /// Codes the server tried to redeem, in order
    pub fn redeemed(&self) -> Vec<String> {
        self.redeemed.lock().unwrap().clone()
    }
}

#[async_trait]
impl OAuthClient for FakeOAuthClient {
    async fn fetch_profile(
        &self,
        code: &str,
        _redirect_uri: &str,
        settings: &SsoSettings,
    ) -> OAuthResult<ProviderProfile> {
        if !settings.is_configured() {
            return Err(OAuthError::not_configured());
        }

        self.redeemed.lock().unwrap().push(code.to_string());
        self.grants
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| OAuthError::invalid_code("bad_verification_code"))
    }
}

/// AppState over an in-memory database, GitHub provider, uid 1 as admin
pub async fn create_test_state() -> AppState {
    create_test_state_with_oauth().await.0
}

/// Same as [`create_test_state`], also returning the fake provider
pub async fn create_test_state_with_oauth() -> (AppState, Arc<FakeOAuthClient>) {
    let pool = Database::in_memory()
        .await
        .expect("Failed to create test database");

    let site = SiteConfig {
        url: SITE_URL.to_string(),
        relative_path: String::new(),
        admin_uids: vec![ADMIN_UID],
    };

    let oauth = Arc::new(FakeOAuthClient::default());
    let state = AppState::new(pool, Provider::github(), site, oauth.clone());

    (state, oauth)
}

/// Store client credentials so the login routes are enabled
pub async fn configure_provider(state: &AppState) {
    state
        .settings
        .save(&SsoSettings {
            client_id: Some(CLIENT_ID.to_string()),
            client_secret: Some("test-secret".to_string()),
            disable_registration: false,
        })
        .await
        .expect("Failed to save settings");
}

/// Follow `GET /auth/github` and return the redirect target
pub async fn authorize_redirect(state: &AppState, token: Option<&str>) -> Url {
    let response = build(state).oneshot(get("/auth/github", token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");

    Url::parse(location).expect("Invalid authorize URL")
}

/// Issue a `state` through the authorize endpoint
pub async fn start_login(state: &AppState, token: Option<&str>) -> String {
    authorize_redirect(state, token)
        .await
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .expect("Missing state parameter")
}

pub fn callback_uri(code: &str, oauth_state: &str) -> String {
    format!("{}?code={}&state={}", CALLBACK, code, oauth_state)
}

/// Full browser round trip: authorize, provider grants `profile`, callback
pub async fn login_with_provider(
    state: &AppState,
    oauth: &FakeOAuthClient,
    profile: serde_json::Value,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    configure_provider(state).await;

    let code = format!("code-{}", profile["id"]);
    oauth.grant(&code, profile);
    let oauth_state = start_login(state, token).await;

    send(build(state), get(&callback_uri(&code, &oauth_state), token)).await
}

fn build(state: &AppState) -> Router {
    sso_server::build_router(state.clone())
}

pub async fn create_test_user(state: &AppState, username: &str, email: &str) -> Uid {
    UserRepository::new(state.pool.clone())
        .create(&NewUser::new(username, email))
        .await
        .expect("Failed to create test user")
}

/// Start a session for `uid` and return its token
pub async fn login(state: &AppState, uid: Uid) -> String {
    state
        .sessions
        .create(uid)
        .await
        .expect("Failed to create session")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, Body::empty())
}

pub fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    request("POST", uri, token, Body::from(body.to_string()))
}

pub fn put_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    request("PUT", uri, token, Body::from(body.to_string()))
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request("DELETE", uri, token, Body::empty())
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header("X-Session-Token", token);
    }

    builder.body(body).unwrap()
}

/// Send a request and parse the JSON body (Null when the body is empty)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Normalized GitHub profile as the provider client returns it
pub fn github_profile(id: u64, username: &str, email: Option<&str>) -> serde_json::Value {
    let emails: Vec<serde_json::Value> = email
        .map(|e| vec![serde_json::json!({ "value": e })])
        .unwrap_or_default();

    serde_json::json!({
        "id": id,
        "displayName": format!("{} Display", username),
        "username": username,
        "emails": emails,
        "photos": [{ "value": format!("https://avatars.example.com/u/{}", id) }],
    })
}
