mod external_identity;
mod provider;
mod sso_settings;
mod uid;
mod user_field;
mod user_fields;
