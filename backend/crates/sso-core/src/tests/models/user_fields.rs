use crate::{UserField, UserFields};

#[test]
fn test_empty_values_count_as_absent() {
    let fields: UserFields = [
        (UserField::Fullname, Some(String::new())),
        (UserField::Picture, None),
        (UserField::Email, Some("a@x.com".to_string())),
    ]
    .into_iter()
    .collect();

    assert!(!fields.has(UserField::Fullname));
    assert!(!fields.has(UserField::Picture));
    assert_eq!(fields.get(UserField::Email), Some("a@x.com"));
    assert_eq!(fields.len(), 1);
}

#[test]
fn test_insert_empty_clears_previous_value() {
    let mut fields = UserFields::new();
    fields.insert(UserField::Fullname, Some("Alice".to_string()));
    fields.insert(UserField::Fullname, Some(String::new()));

    assert!(fields.is_empty());
}
