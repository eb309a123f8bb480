pub mod association_info;
pub mod external_identity;
pub mod local_user;
pub mod provider;
pub mod sso_settings;
pub mod uid;
pub mod user_field;
pub mod user_fields;
