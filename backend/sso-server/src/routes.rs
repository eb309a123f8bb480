use crate::{
    AppState, authorize, callback, confirm_deauth, deauth, delete_user_data, get_association,
    get_menu, get_public_profile, get_settings, health, list_strategies, prometheus,
    update_settings,
};

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let provider = state.provider.clone();
    let admin_settings_path = format!("/api/admin{}", provider.admin_route());

    Router::new()
        // Provider login and unlinking
        .route(&provider.auth_path(), get(authorize))
        .route(&provider.callback_path(), get(callback))
        .route(&provider.deauth_path(), get(confirm_deauth).post(deauth))
        // Account and login page data
        .route("/api/auth/strategies", get(list_strategies))
        .route("/api/user/{uid}", get(get_public_profile))
        .route("/api/user/{uid}/association", get(get_association))
        // Administration
        .route(&admin_settings_path, get(get_settings).put(update_settings))
        .route("/api/admin/menu", get(get_menu))
        .route("/api/admin/users/{uid}/sso", delete(delete_user_data))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(prometheus::render_metrics))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
