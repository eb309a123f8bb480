use crate::Uid;

use std::str::FromStr;

#[test]
fn test_uid_rejects_zero_and_negative() {
    assert!(Uid::new(0).is_err());
    assert!(Uid::new(-3).is_err());
    assert_eq!(Uid::new(7).unwrap().get(), 7);
}

#[test]
fn test_uid_from_str() {
    assert_eq!(Uid::from_str("42").unwrap(), Uid::new(42).unwrap());
    assert_eq!(Uid::from_str(" 9 ").unwrap().get(), 9);
    assert!(Uid::from_str("abc").is_err());
    assert!(Uid::from_str("0").is_err());
}

#[test]
fn test_uid_serde_is_a_plain_number() {
    let uid = Uid::new(5).unwrap();
    assert_eq!(serde_json::to_string(&uid).unwrap(), "5");
    assert_eq!(serde_json::from_str::<Uid>("5").unwrap(), uid);
    assert!(serde_json::from_str::<Uid>("0").is_err());
}
