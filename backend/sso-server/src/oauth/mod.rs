pub mod error;
pub mod github_client;
pub mod oauth_client;
