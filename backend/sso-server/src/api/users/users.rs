//! Account page handlers

use crate::{ApiError, ApiResult, AppState, CurrentUser};

use sso_core::{AssociationInfo, Uid};

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Map, Value};

/// GET /api/user/{uid}/association
///
/// Whether the user's account is linked to the provider. Owner only.
pub async fn get_association(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(uid): Path<String>,
) -> ApiResult<Json<AssociationInfo>> {
    let uid: Uid = uid
        .parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid uid: {}", e), Some("uid")))?;

    if uid != current {
        return Err(ApiError::forbidden(format!(
            "uid {} cannot view the association of uid {}",
            current, uid
        )));
    }

    let info = state.linker.association_status(uid).await?;

    Ok(Json(info))
}

/// GET /api/user/{uid}
///
/// Public profile: only whitelisted fields, absent ones omitted.
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Map<String, Value>>> {
    let uid: Uid = uid
        .parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid uid: {}", e), Some("uid")))?;

    if state.users.find_by_uid(uid).await?.is_none() {
        return Err(ApiError::not_found(format!("User {} not found", uid)));
    }

    let fields = state.users.get_fields(uid, &state.public_fields).await?;

    let mut profile = Map::new();
    profile.insert("uid".to_string(), Value::from(uid.get()));
    for field in &state.public_fields {
        if let Some(value) = fields.get(*field) {
            profile.insert(field.as_str().to_string(), Value::from(value));
        }
    }

    Ok(Json(profile))
}
