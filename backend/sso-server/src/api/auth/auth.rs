//! Provider login handlers

use crate::{
    ApiError, ApiResult, AppState, CallbackParams, CallbackResponse, RequestSession,
    SESSION_COOKIE, SessionUser, StrategyListResponse,
};

use sso_core::{ExternalIdentity, SettingsStore, SsoSettings};

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use log::{info, warn};
use reqwest::Url;

/// GET /auth/{slug}
///
/// Starts the authorization-code flow: issues a single-use `state` bound to
/// the current session and redirects the browser to the provider.
pub async fn authorize(
    State(state): State<AppState>,
    SessionUser(current): SessionUser,
) -> ApiResult<Redirect> {
    let settings = configured_settings(&state).await?;
    let client_id = settings.client_id.unwrap_or_default();

    let oauth_state = state.oauth_states.issue(current).await?;
    let callback_url = state.callback_url();

    let url = Url::parse_with_params(
        &state.provider.authorize_url,
        [
            ("client_id", client_id.as_str()),
            ("redirect_uri", callback_url.as_str()),
            ("scope", state.provider.scope.as_str()),
            ("state", oauth_state.as_str()),
            ("response_type", "code"),
        ],
    )
    .map_err(|e| ApiError::internal(format!("Invalid authorize URL: {}", e)))?;

    Ok(Redirect::to(url.as_str()))
}

/// GET /auth/{slug}/callback?code=..&state=..
///
/// Redeems the code with the provider and logs the resulting profile in.
/// Anonymous requests get a session token back, both in the body and as a
/// cookie.
pub async fn callback(
    State(state): State<AppState>,
    SessionUser(current): SessionUser,
    Query(params): Query<CallbackParams>,
) -> ApiResult<Response> {
    if let Some(error) = params.error {
        warn!(
            "{} Provider declined the login: {}",
            state.provider.log_tag(),
            error
        );
        return Err(ApiError::unauthorized(
            params.error_description.unwrap_or(error),
        ));
    }

    let oauth_state = params
        .state
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing state", Some("state")))?;
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing authorization code", Some("code")))?;

    let pending = state
        .oauth_states
        .consume(&oauth_state)
        .await?
        .ok_or_else(|| ApiError::bad_request("Unknown or expired state", Some("state")))?;

    // The flow must finish in the session that started it.
    if pending.uid != current {
        return Err(ApiError::bad_request(
            "Login was started from a different session",
            Some("state"),
        ));
    }

    let settings = configured_settings(&state).await?;
    let profile = state
        .oauth
        .fetch_profile(&code, &state.callback_url(), &settings)
        .await?;

    let identity = ExternalIdentity::from(profile);
    let session = RequestSession::new(current, state.sessions.clone());

    let resolution = state.linker.login(&session, &identity).await?;
    let session_token = session.into_issued_token();

    let cookie = session_token
        .as_ref()
        .map(|token| session_cookie(&state, token))
        .transpose()?;

    let body = Json(CallbackResponse {
        uid: resolution.uid,
        kind: resolution.kind,
        session_token,
    });

    let mut response = body.into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

/// GET /api/auth/strategies
///
/// Login strategies to offer on the login page; empty until configured.
pub async fn list_strategies(
    State(state): State<AppState>,
) -> ApiResult<Json<StrategyListResponse>> {
    let strategies = state.linker.login_strategy().await?;

    Ok(Json(StrategyListResponse {
        strategies: strategies.into_iter().collect(),
    }))
}

async fn configured_settings(state: &AppState) -> ApiResult<SsoSettings> {
    let settings = state.settings.load().await?;

    if !settings.is_configured() {
        info!(
            "{} Login attempted before client credentials were set",
            state.provider.log_tag()
        );
        return Err(ApiError::not_found(format!(
            "{} login is not configured",
            state.provider.name
        )));
    }

    Ok(settings)
}

fn session_cookie(state: &AppState, token: &str) -> ApiResult<HeaderValue> {
    let cookie = format!(
        "{}={}; Path={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        token,
        state.site.local_path("/")
    );

    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal(format!("Invalid session cookie: {}", e)))
}
