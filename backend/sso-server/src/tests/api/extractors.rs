use crate::{AdminUser, AppState, CurrentUser, GitHubClient, SessionUser, session_token};

use sso_config::SiteConfig;
use sso_core::{NewUser, Provider};
use sso_db::{Database, UserRepository};

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, Request, StatusCode, request::Parts},
};
use googletest::prelude::*;

fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(*name, HeaderValue::from_str(value).unwrap());
    }
    map
}

fn parts_with_token(token: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri("/");
    if let Some(token) = token {
        builder = builder.header("X-Session-Token", token);
    }
    builder.body(()).unwrap().into_parts().0
}

async fn test_state() -> AppState {
    let pool = Database::in_memory().await.unwrap();
    let site = SiteConfig {
        admin_uids: vec![1],
        ..SiteConfig::default()
    };
    let oauth = Arc::new(GitHubClient::new(&Provider::github()).unwrap());
    AppState::new(pool, Provider::github(), site, oauth)
}

#[test]
fn test_token_from_header() {
    let map = headers(&[("x-session-token", " abc ")]);

    assert_that!(session_token(&map).as_deref(), some(eq("abc")));
}

#[test]
fn test_token_from_cookie() {
    let map = headers(&[("cookie", "theme=dark; sso_session=xyz; lang=en")]);

    assert_that!(session_token(&map).as_deref(), some(eq("xyz")));
}

#[test]
fn test_header_wins_over_cookie() {
    let map = headers(&[
        ("x-session-token", "from-header"),
        ("cookie", "sso_session=from-cookie"),
    ]);

    assert_that!(session_token(&map).as_deref(), some(eq("from-header")));
}

#[test]
fn test_empty_values_are_ignored() {
    let map = headers(&[("x-session-token", ""), ("cookie", "sso_session=")]);

    assert_that!(session_token(&map), none());
}

#[tokio::test]
async fn given_unknown_token_when_extracting_then_anonymous() {
    let state = test_state().await;
    let mut parts = parts_with_token(Some("not-a-session"));

    let SessionUser(uid) = SessionUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    assert_that!(uid, none());
}

#[tokio::test]
async fn given_no_token_when_current_user_required_then_401() {
    let state = test_state().await;
    let mut parts = parts_with_token(None);

    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert_that!(
        result.err().map(|e| e.status()),
        some(eq(StatusCode::UNAUTHORIZED))
    );
}

#[tokio::test]
async fn given_admin_and_member_when_admin_required_then_only_admin_passes() {
    // Given
    let state = test_state().await;
    let users = UserRepository::new(state.pool.clone());
    let admin = users
        .create(&NewUser::new("admin", "admin@example.com"))
        .await
        .unwrap();
    let member = users
        .create(&NewUser::new("member", "member@example.com"))
        .await
        .unwrap();
    let admin_token = state.sessions.create(admin).await.unwrap();
    let member_token = state.sessions.create(member).await.unwrap();

    // When
    let as_admin =
        AdminUser::from_request_parts(&mut parts_with_token(Some(&admin_token)), &state).await;
    let as_member =
        AdminUser::from_request_parts(&mut parts_with_token(Some(&member_token)), &state).await;

    // Then
    assert_that!(as_admin.ok().map(|AdminUser(uid)| uid), some(eq(admin)));
    assert_that!(
        as_member.err().map(|e| e.status()),
        some(eq(StatusCode::FORBIDDEN))
    );
}
