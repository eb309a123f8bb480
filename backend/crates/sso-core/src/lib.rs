pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use models::association_info::AssociationInfo;
pub use models::external_identity::ExternalIdentity;
pub use models::local_user::{LocalUser, NewUser};
pub use models::provider::Provider;
pub use models::sso_settings::SsoSettings;
pub use models::uid::Uid;
pub use models::user_field::UserField;
pub use models::user_fields::UserFields;
pub use store::store_error::{StoreError, StoreResult};
pub use store::{IdentityIndex, SessionContext, SettingsStore, UserStore, ValidationRegistry};

pub use error_location::ErrorLocation;

#[cfg(test)]
mod tests;
