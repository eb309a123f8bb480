use crate::OAuthResult;

use sso_core::SsoSettings;
use sso_link::ProviderProfile;

use async_trait::async_trait;

/// Server side of the authorization-code flow.
///
/// The callback handler only trusts profiles obtained through this trait:
/// the code is redeemed with the stored client credentials and the profile is
/// read from the provider with the resulting token.
#[async_trait]
pub trait OAuthClient: Send + Sync {
    async fn fetch_profile(
        &self,
        code: &str,
        redirect_uri: &str,
        settings: &SsoSettings,
    ) -> OAuthResult<ProviderProfile>;
}
