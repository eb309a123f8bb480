pub mod admin;
pub mod auth;
pub mod deauth;
pub mod error;
pub mod extractors;
pub mod request_session;
pub mod users;
