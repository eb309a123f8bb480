//! Identity linking: decides which local account an external identity logs
//! into, and keeps the user record and the identity index in step.
//!
//! ## Decision chain
//!
//! Evaluated in order, first match wins:
//!
//! 1. The request is already authenticated: link to that user.
//! 2. The external id is in the index: log that user in, no writes.
//! 3. No email from the provider: use `username@<noreply domain>`.
//! 4. A user owns that email: merge, i.e. link to that user.
//! 5. Otherwise provision a new account, unless registration is disabled.
//!
//! ## Write ordering
//!
//! A link is two independent writes: the user's `external_id` field, then
//! the index entry. A crash in between leaves a user without an index entry;
//! the next login heals it through the email branch.

use crate::{
    LinkError, LinkMetrics, LoginGuard, LoginStrategy, Resolution, ResolutionKind,
    Result as LinkErrorResult,
};

use sso_core::{
    AssociationInfo, ExternalIdentity, IdentityIndex, NewUser, Provider, SessionContext,
    SettingsStore, Uid, UserField, UserStore, ValidationRegistry,
};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};

const EMAIL_CONFIRMED: &str = "1";

#[derive(Clone)]
pub struct IdentityLinker {
    provider: Provider,
    site_url: String,
    users: Arc<dyn UserStore>,
    index: Arc<dyn IdentityIndex>,
    validation: Arc<dyn ValidationRegistry>,
    settings: Arc<dyn SettingsStore>,
    guard: LoginGuard,
    metrics: LinkMetrics,
}

impl IdentityLinker {
    pub fn new(
        provider: Provider,
        site_url: impl Into<String>,
        users: Arc<dyn UserStore>,
        index: Arc<dyn IdentityIndex>,
        validation: Arc<dyn ValidationRegistry>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            provider,
            site_url: site_url.into().trim_end_matches('/').to_string(),
            users,
            index,
            validation,
            settings,
            guard: LoginGuard::new(),
            metrics: LinkMetrics::new(),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn guard(&self) -> &LoginGuard {
        &self.guard
    }

    /// Resolve the identity, then log the user in unless the request already
    /// was authenticated.
    pub async fn login(
        &self,
        session: &dyn SessionContext,
        identity: &ExternalIdentity,
    ) -> LinkErrorResult<Resolution> {
        let resolution = self.resolve_login(session, identity).await?;

        if resolution.kind.needs_session() {
            session
                .establish_session(resolution.uid)
                .await
                .map_err(|e| {
                    let err = LinkError::storage(e, Some(resolution.uid));
                    self.record_failure(&err);
                    err
                })?;
        }

        Ok(resolution)
    }

    /// Map a verified external identity to a local account.
    pub async fn resolve_login(
        &self,
        session: &dyn SessionContext,
        identity: &ExternalIdentity,
    ) -> LinkErrorResult<Resolution> {
        match self.resolve(session, identity).await {
            Ok(resolution) => {
                self.metrics.login_resolved(resolution.kind);
                info!(
                    "{} {} login for external id {} -> uid {}",
                    self.provider.log_tag(),
                    resolution.kind,
                    identity.external_id,
                    resolution.uid
                );
                Ok(resolution)
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    async fn resolve(
        &self,
        session: &dyn SessionContext,
        identity: &ExternalIdentity,
    ) -> LinkErrorResult<Resolution> {
        if identity.external_id.trim().is_empty() {
            return Err(LinkError::InvalidIdentity {
                message: "external id is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let _permit = self.guard.acquire(&identity.external_id).await;

        if let Some(uid) = session.current_uid() {
            let current = self.linked_id(uid).await?;

            self.link(uid, &identity.external_id).await?;
            if current.as_deref() != Some(identity.external_id.as_str()) {
                self.enrich(uid, identity).await?;
            }
            return Ok(Resolution::new(uid, ResolutionKind::SessionAttach));
        }

        if let Some(uid) = self
            .index
            .get(&identity.external_id)
            .await
            .map_err(|e| LinkError::storage(e, None))?
        {
            return Ok(Resolution::new(uid, ResolutionKind::Existing));
        }

        let email = identity.email_or_placeholder(&self.provider.noreply_domain);

        if let Some(uid) = self
            .users
            .uid_by_email(&email)
            .await
            .map_err(|e| LinkError::storage(e, None))?
        {
            debug!(
                "{} Merging external id {} into existing uid {}",
                self.provider.log_tag(),
                identity.external_id,
                uid
            );
            self.link(uid, &identity.external_id).await?;
            self.enrich(uid, identity).await?;
            return Ok(Resolution::new(uid, ResolutionKind::Merged));
        }

        if self
            .settings
            .registration_disabled()
            .await
            .map_err(|e| LinkError::storage(e, None))?
        {
            return Err(LinkError::registration_disabled(&self.provider.name));
        }

        let uid = self
            .users
            .create_user(&NewUser::new(&identity.username, &email))
            .await
            .map_err(|e| LinkError::storage(e, None))?;

        self.link(uid, &identity.external_id).await?;
        self.enrich(uid, identity).await?;

        Ok(Resolution::new(uid, ResolutionKind::Provisioned))
    }

    /// Record `external_id` on the user, then point the index at the user.
    ///
    /// One user holds at most one external id and one external id maps to at
    /// most one user: the user's previous index entry is dropped and a
    /// displaced owner loses its field before the new pair is written.
    async fn link(&self, uid: Uid, external_id: &str) -> LinkErrorResult<()> {
        let previous = self.linked_id(uid).await?;
        if let Some(previous) = previous.filter(|p| p != external_id) {
            self.drop_index_entry(&previous, uid).await?;
        }

        let owner = self
            .index
            .get(external_id)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;
        if let Some(owner) = owner.filter(|owner| *owner != uid) {
            if self.linked_id(owner).await?.as_deref() == Some(external_id) {
                self.users
                    .delete_user_field(owner, UserField::ExternalId)
                    .await
                    .map_err(|e| LinkError::storage(e, Some(owner)))?;
            }
            info!(
                "{} External id {} moved from uid {} to uid {}",
                self.provider.log_tag(),
                external_id,
                owner,
                uid
            );
        }

        self.users
            .set_user_field(uid, UserField::ExternalId, external_id)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        self.index
            .set(external_id, uid)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        Ok(())
    }

    /// Stored external id of `uid`, empty values treated as absent.
    async fn linked_id(&self, uid: Uid) -> LinkErrorResult<Option<String>> {
        Ok(self
            .users
            .user_field(uid, UserField::ExternalId)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?
            .filter(|id| !id.is_empty()))
    }

    /// Delete the index entry for `external_id` only while it still points
    /// at `uid`.
    async fn drop_index_entry(&self, external_id: &str, uid: Uid) -> LinkErrorResult<()> {
        let owner = self
            .index
            .get(external_id)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        if owner == Some(uid) {
            self.index
                .delete(external_id)
                .await
                .map_err(|e| LinkError::storage(e, Some(uid)))?;
        }

        Ok(())
    }

    /// First-login enrichment. The provider verified the email, and profile
    /// data only fills gaps.
    async fn enrich(&self, uid: Uid, identity: &ExternalIdentity) -> LinkErrorResult<()> {
        self.users
            .set_user_field(uid, UserField::EmailConfirmed, EMAIL_CONFIRMED)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        self.validation
            .clear_email_confirmation(uid)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        self.validation
            .remove_pending(uid)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        let profile = self
            .users
            .user_fields(uid, &[UserField::Picture, UserField::Fullname])
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        if !profile.has(UserField::Picture) && !identity.avatar_url.is_empty() {
            for field in [UserField::UploadedPicture, UserField::Picture] {
                self.users
                    .set_user_field(uid, field, &identity.avatar_url)
                    .await
                    .map_err(|e| LinkError::storage(e, Some(uid)))?;
            }
        }

        if !profile.has(UserField::Fullname) && !identity.display_name.is_empty() {
            self.users
                .set_user_field(uid, UserField::Fullname, &identity.display_name)
                .await
                .map_err(|e| LinkError::storage(e, Some(uid)))?;
        }

        Ok(())
    }

    /// Linked state of `uid` for the account settings page.
    pub async fn association_status(&self, uid: Uid) -> LinkErrorResult<AssociationInfo> {
        let associated = self
            .users
            .user_field(uid, UserField::ExternalId)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?
            .is_some_and(|id| !id.is_empty());

        let path = if associated {
            self.provider.deauth_path()
        } else {
            self.provider.auth_path()
        };

        Ok(AssociationInfo {
            associated,
            name: self.provider.name.clone(),
            icon: self.provider.icon.clone(),
            action_url: format!("{}{}", self.site_url, path),
        })
    }

    /// Remove the link for `uid`. Unlinked users are left alone.
    ///
    /// The index entry goes first, and only if it still points at `uid`;
    /// then the user field. There is no rollback:
    /// after a failure in between, calling again finishes the job.
    pub async fn unlink(&self, uid: Uid) -> LinkErrorResult<()> {
        match self.remove_link(uid).await {
            Ok(true) => {
                self.metrics.unlinked();
                info!("{} Unlinked uid {}", self.provider.log_tag(), uid);
                Ok(())
            }
            Ok(false) => {
                debug!("{} uid {} has no link to remove", self.provider.log_tag(), uid);
                Ok(())
            }
            Err(e) => {
                error!(
                    "{} Could not remove OAuthId data for uid {}. Error: {}",
                    self.provider.log_tag(),
                    uid,
                    e
                );
                self.metrics.error_occurred(e.kind());
                Err(e)
            }
        }
    }

    async fn remove_link(&self, uid: Uid) -> LinkErrorResult<bool> {
        let Some(external_id) = self.linked_id(uid).await? else {
            return Ok(false);
        };

        self.drop_index_entry(&external_id, uid).await?;

        self.users
            .delete_user_field(uid, UserField::ExternalId)
            .await
            .map_err(|e| LinkError::storage(e, Some(uid)))?;

        Ok(true)
    }

    /// Account deletion hook.
    pub async fn delete_user_data(&self, uid: Uid) -> LinkErrorResult<Uid> {
        self.unlink(uid).await?;
        Ok(uid)
    }

    /// Login strategy for the host login page, from the current admin settings.
    pub async fn login_strategy(&self) -> LinkErrorResult<Option<LoginStrategy>> {
        let settings = self
            .settings
            .load()
            .await
            .map_err(|e| LinkError::storage(e, None))?;

        Ok(LoginStrategy::for_provider(&self.provider, &settings))
    }

    fn record_failure(&self, err: &LinkError) {
        self.metrics.error_occurred(err.kind());

        match err {
            LinkError::RegistrationDisabled { .. } | LinkError::InvalidIdentity { .. } => {
                warn!("{} Login rejected: {}", self.provider.log_tag(), err)
            }
            _ => error!("{} Login failed: {}", self.provider.log_tag(), err),
        }
    }
}

/// Add the linked-id field to the host's public user-field whitelist.
pub fn append_user_field_whitelist(whitelist: &mut Vec<String>) {
    let field = UserField::ExternalId.as_str();
    if !whitelist.iter().any(|f| f == field) {
        whitelist.push(field.to_string());
    }
}
