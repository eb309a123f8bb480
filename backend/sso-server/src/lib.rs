pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod oauth;
pub mod prometheus;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    admin::{
        admin::{delete_user_data, get_menu, get_settings, update_settings},
        admin_settings_response::AdminSettingsResponse,
        update_settings_request::UpdateSettingsRequest,
        user_data_deleted_response::UserDataDeletedResponse,
    },
    auth::{
        auth::{authorize, callback, list_strategies},
        callback_params::CallbackParams,
        callback_response::CallbackResponse,
        strategy_list_response::StrategyListResponse,
    },
    deauth::{
        deauth::{confirm_deauth, deauth},
        deauth_view::DeauthView,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::session_user::{
        AdminUser, CurrentUser, SESSION_COOKIE, SESSION_HEADER, SessionUser, session_token,
    },
    request_session::RequestSession,
    users::users::{get_association, get_public_profile},
};
pub use app_state::AppState;
pub use oauth::{
    error::{OAuthError, Result as OAuthResult},
    github_client::GitHubClient,
    oauth_client::OAuthClient,
};

pub use crate::routes::build_router;
