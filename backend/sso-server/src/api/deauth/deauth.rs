//! Disconnecting the provider from the logged-in account

use crate::{ApiResult, AppState, CurrentUser, DeauthView};

use axum::{Json, extract::State, response::Redirect};

/// GET /deauth/{slug}
pub async fn confirm_deauth(
    State(state): State<AppState>,
    CurrentUser(_uid): CurrentUser,
) -> Json<DeauthView> {
    Json(DeauthView {
        service: state.provider.name.clone(),
    })
}

/// POST /deauth/{slug}
///
/// Unlinks the provider and sends the user back to their profile editor.
pub async fn deauth(
    State(state): State<AppState>,
    CurrentUser(uid): CurrentUser,
) -> ApiResult<Redirect> {
    state.linker.unlink(uid).await?;

    Ok(Redirect::to(&state.site.local_path("/me/edit")))
}
