//! Storage and session collaborators required by the identity linker.
//!
//! Every operation is individually atomic. Nothing here offers multi-call
//! transactions, so callers must tolerate a crash between two writes.

pub mod store_error;

use crate::{NewUser, SsoSettings, Uid, UserField, UserFields};

use store_error::StoreResult;

use async_trait::async_trait;

/// User records, addressed field by field.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`store_error::StoreError::Duplicate`] when the email is taken.
    async fn create_user(&self, user: &NewUser) -> StoreResult<Uid>;

    /// `None` for an unset field or an unknown user.
    async fn user_field(&self, uid: Uid, field: UserField) -> StoreResult<Option<String>>;

    async fn user_fields(&self, uid: Uid, fields: &[UserField]) -> StoreResult<UserFields>;

    async fn set_user_field(&self, uid: Uid, field: UserField, value: &str) -> StoreResult<()>;

    async fn delete_user_field(&self, uid: Uid, field: UserField) -> StoreResult<()>;

    async fn uid_by_email(&self, email: &str) -> StoreResult<Option<Uid>>;
}

/// External id -> local uid mapping for one provider.
#[async_trait]
pub trait IdentityIndex: Send + Sync {
    async fn get(&self, external_id: &str) -> StoreResult<Option<Uid>>;

    /// Creates or overwrites the entry.
    async fn set(&self, external_id: &str, uid: Uid) -> StoreResult<()>;

    /// Deleting an absent entry is a no-op.
    async fn delete(&self, external_id: &str) -> StoreResult<()>;
}

/// Registration bookkeeping that a provider-verified email makes obsolete.
#[async_trait]
pub trait ValidationRegistry: Send + Sync {
    /// Drop the user from the "awaiting validation" set.
    async fn remove_pending(&self, uid: Uid) -> StoreResult<()>;

    /// Forget any outstanding email-confirmation token.
    async fn clear_email_confirmation(&self, uid: Uid) -> StoreResult<()>;
}

/// Administrator settings for one provider, read fresh on every call.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> StoreResult<SsoSettings>;

    async fn save(&self, settings: &SsoSettings) -> StoreResult<()>;

    async fn registration_disabled(&self) -> StoreResult<bool> {
        Ok(self.load().await?.disable_registration)
    }
}

/// The authenticated-ness of the request driving the current login.
#[async_trait]
pub trait SessionContext: Send + Sync {
    /// The user already logged in on this request, if any.
    fn current_uid(&self) -> Option<Uid>;

    /// Log `uid` in on this request.
    async fn establish_session(&self, uid: Uid) -> StoreResult<()>;
}
