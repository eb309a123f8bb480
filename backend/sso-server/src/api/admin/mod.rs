pub mod admin;
pub mod admin_settings_response;
pub mod update_settings_request;
pub mod user_data_deleted_response;
