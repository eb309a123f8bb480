use sso_core::{SessionContext, StoreResult, Uid};
use sso_db::SessionRepository;

use std::sync::Mutex;

use async_trait::async_trait;

/// Session state of one HTTP request.
///
/// Logging a user in issues a token, which the handler hands back to the
/// client.
pub struct RequestSession {
    current: Option<Uid>,
    sessions: SessionRepository,
    issued: Mutex<Option<String>>,
}

impl RequestSession {
    pub fn new(current: Option<Uid>, sessions: SessionRepository) -> Self {
        Self {
            current,
            sessions,
            issued: Mutex::new(None),
        }
    }

    /// Token issued by [`SessionContext::establish_session`], if any.
    pub fn into_issued_token(self) -> Option<String> {
        self.issued
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionContext for RequestSession {
    fn current_uid(&self) -> Option<Uid> {
        self.current
    }

    async fn establish_session(&self, uid: Uid) -> StoreResult<()> {
        let token = self.sessions.create(uid).await?;
        log::debug!("Session established for uid {}", uid);

        *self
            .issued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);

        Ok(())
    }
}
