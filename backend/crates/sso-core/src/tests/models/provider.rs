use crate::Provider;

#[test]
fn test_github_routes_derive_from_slug() {
    let provider = Provider::github();
    assert_eq!(provider.auth_path(), "/auth/github");
    assert_eq!(provider.callback_path(), "/auth/github/callback");
    assert_eq!(provider.deauth_path(), "/deauth/github");
    assert_eq!(provider.admin_route(), "/plugins/sso-github");
    assert_eq!(provider.log_tag(), "[sso-github]");
}

#[test]
fn test_default_provider_is_github() {
    let provider = Provider::default();
    assert_eq!(provider.name, "GitHub");
    assert_eq!(provider.noreply_domain, "users.noreply.github.com");
    assert_eq!(provider.scope, "user:email");
    assert_eq!(provider.authorize_url, "https://github.com/login/oauth/authorize");
    assert_eq!(provider.api_url, "https://api.github.com");
}
