use crate::UserField;

use std::str::FromStr;

#[test]
fn test_user_field_as_str_round_trips_through_from_str() {
    for field in [
        UserField::Username,
        UserField::Email,
        UserField::EmailConfirmed,
        UserField::Fullname,
        UserField::Picture,
        UserField::UploadedPicture,
        UserField::ExternalId,
    ] {
        assert_eq!(UserField::from_str(field.as_str()).unwrap(), field);
    }
}

#[test]
fn test_user_field_from_str_rejects_unknown_column() {
    assert!(UserField::from_str("password").is_err());
    assert!(UserField::from_str("uid; DROP TABLE users").is_err());
}

#[test]
fn test_identity_fields_are_not_nullable() {
    assert!(!UserField::Email.is_nullable());
    assert!(!UserField::Username.is_nullable());
    assert!(UserField::ExternalId.is_nullable());
    assert!(UserField::Picture.is_nullable());
}
