use crate::OAuthClient;

use sso_config::SiteConfig;
use sso_core::{Provider, UserField};
use sso_db::{
    IdentityIndexRepository, OAuthStateRepository, SessionRepository, SettingsRepository,
    UserRepository, ValidationRepository,
};
use sso_link::{IdentityLinker, append_user_field_whitelist};

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Fields anyone may read from a user record, before plugins extend it.
const BASE_PUBLIC_FIELDS: &[&str] = &["username", "fullname", "picture"];

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub provider: Provider,
    pub site: SiteConfig,
    pub linker: IdentityLinker,
    pub users: UserRepository,
    /// Host whitelist with the linker's additions applied
    pub public_fields: Vec<UserField>,
    pub settings: SettingsRepository,
    pub sessions: SessionRepository,
    pub oauth_states: OAuthStateRepository,
    pub oauth: Arc<dyn OAuthClient>,
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the SQLite repositories into a linker for `provider`.
    pub fn new(
        pool: SqlitePool,
        provider: Provider,
        site: SiteConfig,
        oauth: Arc<dyn OAuthClient>,
    ) -> Self {
        let settings = SettingsRepository::new(pool.clone(), provider.plugin_id());
        let users = UserRepository::new(pool.clone());

        let linker = IdentityLinker::new(
            provider.clone(),
            site.base_url(),
            Arc::new(users.clone()),
            Arc::new(IdentityIndexRepository::new(pool.clone(), provider.slug.clone())),
            Arc::new(ValidationRepository::new(pool.clone())),
            Arc::new(settings.clone()),
        );

        Self {
            sessions: SessionRepository::new(pool.clone()),
            oauth_states: OAuthStateRepository::new(pool.clone()),
            oauth,
            public_fields: public_fields(),
            users,
            pool,
            provider,
            site,
            linker,
            settings,
            prometheus: None,
        }
    }

    /// Absolute callback URL registered with the provider
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.site.base_url(), self.provider.callback_path())
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

fn public_fields() -> Vec<UserField> {
    let mut whitelist: Vec<String> = BASE_PUBLIC_FIELDS.iter().map(|f| f.to_string()).collect();
    append_user_field_whitelist(&mut whitelist);

    whitelist
        .iter()
        .filter_map(|name| name.parse::<UserField>().ok())
        .collect()
}
