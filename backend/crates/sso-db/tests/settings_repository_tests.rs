mod common;

use common::create_test_pool;

use sso_core::{SettingsStore, SsoSettings};
use sso_db::SettingsRepository;

use googletest::prelude::*;

#[tokio::test]
async fn given_no_rows_when_loaded_then_defaults() {
    let pool = create_test_pool().await;
    let repo = SettingsRepository::new(pool, "sso-github");

    let settings = repo.load().await.unwrap();

    assert_that!(settings, eq(&SsoSettings::default()));
    assert_that!(repo.registration_disabled().await.unwrap(), eq(false));
}

#[tokio::test]
async fn given_saved_settings_when_loaded_then_round_trip() {
    let pool = create_test_pool().await;
    let repo = SettingsRepository::new(pool, "sso-github");
    let settings = SsoSettings {
        client_id: Some("client".to_string()),
        client_secret: Some("secret".to_string()),
        disable_registration: true,
    };

    repo.save(&settings).await.unwrap();

    assert_that!(repo.load().await.unwrap(), eq(&settings));
    assert_that!(repo.registration_disabled().await.unwrap(), eq(true));
}

#[tokio::test]
async fn given_toggle_changed_when_read_again_then_fresh_value() {
    let pool = create_test_pool().await;
    let repo = SettingsRepository::new(pool, "sso-github");
    repo.set("disable_registration", "on").await.unwrap();
    assert_that!(repo.registration_disabled().await.unwrap(), eq(true));

    repo.set("disable_registration", "off").await.unwrap();

    assert_that!(repo.registration_disabled().await.unwrap(), eq(false));
}

#[tokio::test]
async fn given_cleared_secret_when_saved_then_row_removed() {
    let pool = create_test_pool().await;
    let repo = SettingsRepository::new(pool, "sso-github");
    repo.save(&SsoSettings {
        client_id: Some("client".to_string()),
        client_secret: Some("secret".to_string()),
        disable_registration: false,
    })
    .await
    .unwrap();

    repo.save(&SsoSettings {
        client_id: Some("client".to_string()),
        client_secret: None,
        disable_registration: false,
    })
    .await
    .unwrap();

    let all = repo.get_all().await.unwrap();
    assert_that!(all.contains_key("client_secret"), eq(false));
    assert_that!(repo.load().await.unwrap().is_configured(), eq(false));
}

#[tokio::test]
async fn given_two_namespaces_then_settings_do_not_leak() {
    let pool = create_test_pool().await;
    let github = SettingsRepository::new(pool.clone(), "sso-github");
    let gitlab = SettingsRepository::new(pool, "sso-gitlab");

    github.set("disable_registration", "on").await.unwrap();

    assert_that!(gitlab.registration_disabled().await.unwrap(), eq(false));
}
