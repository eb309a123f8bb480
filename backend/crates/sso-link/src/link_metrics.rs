use crate::ResolutionKind;

use metrics::counter;

/// Metrics collector for SSO linking
#[derive(Clone)]
pub struct LinkMetrics {
    prefix: &'static str,
}

impl Default for LinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMetrics {
    pub fn new() -> Self {
        Self { prefix: "sso_link" }
    }

    /// Record a successful login and the branch that produced it
    pub fn login_resolved(&self, kind: ResolutionKind) {
        counter!(format!("{}.logins.total", self.prefix)).increment(1);
        counter!(format!("{}.logins.{}", self.prefix, kind.as_str())).increment(1);
    }

    /// Record a failed operation
    pub fn error_occurred(&self, error_kind: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_kind)).increment(1);
    }

    pub fn unlinked(&self) {
        counter!(format!("{}.unlinks", self.prefix)).increment(1);
    }
}
