//! Axum extractors resolving the session token to a user

use crate::{ApiError, AppState};

use sso_core::Uid;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

pub const SESSION_HEADER: &str = "X-Session-Token";
pub const SESSION_COOKIE: &str = "sso_session";

/// The logged-in user, if the request carries a valid session token.
///
/// Checks the `X-Session-Token` header first, then the `sso_session` cookie.
/// Unknown tokens count as anonymous.
pub struct SessionUser(pub Option<Uid>);

/// A logged-in user; rejects anonymous requests with 401.
pub struct CurrentUser(pub Uid);

/// A logged-in site administrator; 401 when anonymous, 403 otherwise.
pub struct AdminUser(pub Uid);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Some(token) = session_token(&parts.headers) else {
                return Ok(SessionUser(None));
            };

            let uid = state.sessions.find_uid(&token).await?;
            if uid.is_none() {
                log::debug!("Ignoring unknown session token");
            }

            Ok(SessionUser(uid))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match SessionUser::from_request_parts(parts, state).await? {
                SessionUser(Some(uid)) => Ok(CurrentUser(uid)),
                SessionUser(None) => Err(ApiError::unauthorized("Login required")),
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let CurrentUser(uid) = CurrentUser::from_request_parts(parts, state).await?;

            if !state.site.is_admin(uid.get()) {
                return Err(ApiError::forbidden(format!("uid {} is not an administrator", uid)));
            }

            Ok(AdminUser(uid))
        }
    }
}

/// Token from the session header, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
