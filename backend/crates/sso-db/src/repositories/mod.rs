pub mod identity_index_repository;
pub mod oauth_state_repository;
pub mod session_repository;
pub mod settings_repository;
pub mod user_repository;
pub mod validation_repository;
