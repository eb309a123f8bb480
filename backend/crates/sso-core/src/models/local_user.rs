use crate::Uid;

use serde::{Deserialize, Serialize};

/// Local account as far as SSO linking is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    pub uid: Uid,
    pub username: String,
    pub email: String,
    pub email_confirmed: bool,
    pub fullname: Option<String>,
    pub picture: Option<String>,
    pub uploaded_picture: Option<String>,
    /// Linked provider account id, at most one per user
    pub external_id: Option<String>,
}

impl LocalUser {
    pub fn is_linked(&self) -> bool {
        self.external_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Fields required to provision a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
