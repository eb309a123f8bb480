use sso_core::Uid;

use serde::Serialize;

/// Which branch of the login decision chain produced the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Linked to the user already logged in on the request
    SessionAttach,
    /// External id was already linked
    Existing,
    /// Linked to an account found by email
    Merged,
    /// New account created
    Provisioned,
}

impl ResolutionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionAttach => "session_attach",
            Self::Existing => "existing",
            Self::Merged => "merged",
            Self::Provisioned => "provisioned",
        }
    }

    /// A request that was already authenticated needs no new session.
    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::SessionAttach)
    }
}

impl std::fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a successful login resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub uid: Uid,
    pub kind: ResolutionKind,
}

impl Resolution {
    pub fn new(uid: Uid, kind: ResolutionKind) -> Self {
        Self { uid, kind }
    }
}
