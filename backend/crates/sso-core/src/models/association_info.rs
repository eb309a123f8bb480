use serde::Serialize;

/// Whether a local account is linked to the provider, and what the account
/// page should offer next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationInfo {
    pub associated: bool,
    /// Provider display name, e.g. "GitHub"
    pub name: String,
    pub icon: String,
    /// Deauthorization page when linked, start-linking route otherwise
    pub action_url: String,
}
