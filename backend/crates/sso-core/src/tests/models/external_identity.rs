use crate::ExternalIdentity;

fn identity(username: &str, email: &str) -> ExternalIdentity {
    ExternalIdentity {
        external_id: "E1".to_string(),
        display_name: String::new(),
        username: username.to_string(),
        email: email.to_string(),
        avatar_url: String::new(),
    }
}

#[test]
fn test_empty_email_synthesizes_noreply_placeholder() {
    let id = identity("bob", "");
    assert_eq!(
        id.email_or_placeholder("users.noreply.example.com"),
        "bob@users.noreply.example.com"
    );
}

#[test]
fn test_present_email_is_kept() {
    let id = identity("bob", "bob@real.org");
    assert_eq!(
        id.email_or_placeholder("users.noreply.example.com"),
        "bob@real.org"
    );
}

#[test]
fn test_missing_optional_fields_deserialize_as_empty() {
    let id: ExternalIdentity = serde_json::from_str(r#"{"external_id":"123"}"#).unwrap();
    assert_eq!(id.external_id, "123");
    assert!(id.email.is_empty());
    assert!(id.avatar_url.is_empty());
}
