use crate::SsoSettings;

#[test]
fn test_settings_need_both_credentials() {
    let mut settings = SsoSettings::default();
    assert!(!settings.is_configured());

    settings.client_id = Some("id".to_string());
    assert!(!settings.is_configured());

    settings.client_secret = Some(String::new());
    assert!(!settings.is_configured());

    settings.client_secret = Some("secret".to_string());
    assert!(settings.is_configured());
}

#[test]
fn test_secret_is_never_serialized() {
    let settings = SsoSettings {
        client_id: Some("id".to_string()),
        client_secret: Some("hunter2".to_string()),
        disable_registration: true,
    };

    let json = serde_json::to_string(&settings).unwrap();
    assert!(!json.contains("hunter2"));
    assert!(json.contains("\"disable_registration\":true"));
}
