pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::database::Database;
pub use error::{DbError, Result};
pub use repositories::identity_index_repository::IdentityIndexRepository;
pub use repositories::oauth_state_repository::{
    OAuthStateRepository, PendingLogin, STATE_TTL_SECS,
};
pub use repositories::session_repository::SessionRepository;
pub use repositories::settings_repository::SettingsRepository;
pub use repositories::user_repository::UserRepository;
pub use repositories::validation_repository::ValidationRepository;
