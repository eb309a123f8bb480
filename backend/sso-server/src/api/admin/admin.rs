//! SSO administration handlers

use crate::{
    AdminSettingsResponse, AdminUser, ApiError, ApiResult, AppState, UpdateSettingsRequest,
    UserDataDeletedResponse,
};

use sso_core::{SettingsStore, SsoSettings, Uid};
use sso_link::AdminMenuItem;

use axum::{
    Json,
    extract::{Path, State},
};
use log::info;

/// GET /api/admin/plugins/sso-{slug}
pub async fn get_settings(
    State(state): State<AppState>,
    AdminUser(_uid): AdminUser,
) -> ApiResult<Json<AdminSettingsResponse>> {
    let settings = state.settings.load().await?;

    Ok(Json(AdminSettingsResponse::new(state.callback_url(), &settings)))
}

/// PUT /api/admin/plugins/sso-{slug}
pub async fn update_settings(
    State(state): State<AppState>,
    AdminUser(uid): AdminUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<AdminSettingsResponse>> {
    let current = state.settings.load().await?;

    let settings = SsoSettings {
        client_id: request.client_id,
        client_secret: request.client_secret.or(current.client_secret),
        disable_registration: request.disable_registration,
    };
    state.settings.save(&settings).await?;

    info!(
        "{} Settings updated by uid {} (registration {})",
        state.provider.log_tag(),
        uid,
        if settings.disable_registration {
            "disabled"
        } else {
            "enabled"
        }
    );

    Ok(Json(AdminSettingsResponse::new(state.callback_url(), &settings)))
}

/// GET /api/admin/menu
pub async fn get_menu(
    State(state): State<AppState>,
    AdminUser(_uid): AdminUser,
) -> Json<Vec<AdminMenuItem>> {
    Json(vec![AdminMenuItem::from(&state.provider)])
}

/// DELETE /api/admin/users/{uid}/sso
///
/// Account-deletion hook: drops the user's link and index entry.
pub async fn delete_user_data(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(uid): Path<String>,
) -> ApiResult<Json<UserDataDeletedResponse>> {
    let uid: Uid = uid
        .parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid uid: {}", e), Some("uid")))?;

    let uid = state.linker.delete_user_data(uid).await?;
    info!(
        "{} SSO data of uid {} deleted by uid {}",
        state.provider.log_tag(),
        uid,
        admin
    );

    Ok(Json(UserDataDeletedResponse { uid }))
}
