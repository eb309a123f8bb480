//! GitHub OAuth App client: code exchange and profile lookup.

use crate::{OAuthClient, OAuthError, OAuthResult};

use sso_core::{Provider, SsoSettings};
use sso_link::{ProfileId, ProfileValue, ProviderProfile};

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("sso-server/", env!("CARGO_PKG_VERSION"));

/// Token endpoint reply. GitHub answers 200 for both outcomes.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: u64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

pub struct GitHubClient {
    token_url: String,
    api_url: String,
    client: ReqwestClient,
}

impl GitHubClient {
    pub fn new(provider: &Provider) -> OAuthResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            token_url: provider.token_url.clone(),
            api_url: provider.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
        client_id: &str,
        client_secret: &str,
    ) -> OAuthResult<String> {
        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .header(header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::provider(format!(
                "token endpoint answered {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await?;
        match (token.access_token, token.error) {
            (Some(access_token), None) if !access_token.is_empty() => Ok(access_token),
            (_, error) => Err(OAuthError::invalid_code(
                token
                    .error_description
                    .or(error)
                    .unwrap_or_else(|| "no access token issued".to_string()),
            )),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> OAuthResult<T> {
        let response = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(OAuthError::invalid_code(format!("{} rejected the token", path)));
        }
        if !status.is_success() {
            return Err(OAuthError::provider(format!("{} answered {}", path, status)));
        }

        Ok(response.json().await?)
    }

    /// Primary verified address, else any verified one. Unverified addresses
    /// are never returned.
    async fn verified_email(&self, token: &str) -> Option<String> {
        match self.get::<Vec<GitHubEmail>>("/user/emails", token).await {
            Ok(emails) => {
                let mut verified: Vec<_> = emails.into_iter().filter(|e| e.verified).collect();
                verified.sort_by_key(|e| !e.primary);
                verified.into_iter().next().map(|e| e.email)
            }
            Err(e) => {
                warn!("Could not list GitHub emails, continuing without: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl OAuthClient for GitHubClient {
    async fn fetch_profile(
        &self,
        code: &str,
        redirect_uri: &str,
        settings: &SsoSettings,
    ) -> OAuthResult<ProviderProfile> {
        let (Some(client_id), Some(client_secret)) =
            (settings.client_id.as_deref(), settings.client_secret.as_deref())
        else {
            return Err(OAuthError::not_configured());
        };

        let token = self
            .exchange_code(code, redirect_uri, client_id, client_secret)
            .await?;
        let user: GitHubUser = self.get("/user", &token).await?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => Some(email),
            None => self.verified_email(&token).await,
        };
        debug!(
            "GitHub user {} ({}) fetched, email {}",
            user.login,
            user.id,
            if email.is_some() { "present" } else { "absent" }
        );

        let value = |value: String| ProfileValue { value };

        Ok(ProviderProfile {
            id: ProfileId::Number(user.id),
            display_name: user.name,
            username: Some(user.login),
            emails: email.into_iter().map(value).collect(),
            photos: user.avatar_url.into_iter().map(value).collect(),
        })
    }
}
