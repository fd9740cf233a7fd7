use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, NotSet, Set};

use super::sample;
use crate::contact::{ContactBase, ContactUpdate, FIRST_NAME_MAX, PHONE_NUMBER_MAX};
use crate::errors::ModelError;

#[test]
fn valid_contact_passes() {
    let body = sample("Anna", "Kovalenko", "anna.k@example.com");
    assert_eq!(body.validate(), Ok(()));
}

#[test]
fn limits_count_characters_not_bytes() {
    // 50 two-byte characters is still within the limit
    let body = sample(&"я".repeat(FIRST_NAME_MAX), "Last", "a@example.com");
    assert!(body.validate().is_ok());

    let body = sample(&"я".repeat(FIRST_NAME_MAX + 1), "Last", "a@example.com");
    assert_eq!(body.validate().unwrap_err().field(), "first_name");
}

#[test]
fn rejects_bad_emails() {
    for email in ["", "plain", "@example.com", "a@", "a@b", "a b@example.com", "a@exa mple.com"] {
        let err = sample("A", "B", email).validate().unwrap_err();
        assert_eq!(err.field(), "email", "{email:?} should be rejected");
    }
    for email in ["a@example.com", "first.last+tag@sub.example.co.uk", "x_y@ex-ample.io"] {
        assert!(sample("A", "B", email).validate().is_ok(), "{email:?} should be accepted");
    }
}

#[test]
fn rejects_long_phone_and_note() {
    let mut body = sample("A", "B", "a@example.com");
    body.phone_number = "1".repeat(PHONE_NUMBER_MAX + 1);
    assert_eq!(body.validate().unwrap_err().field(), "phone_number");

    let mut body = sample("A", "B", "a@example.com");
    body.additional_info = Some("x".repeat(256));
    assert!(matches!(body.validate(), Err(ModelError::Validation { field: "additional_info", .. })));
}

#[test]
fn base_deserializes_with_optional_fields_absent() {
    let body: ContactBase = serde_json::from_str(
        r#"{"first_name":"Anna","last_name":"K","email":"anna@example.com","phone_number":"123"}"#,
    )
    .unwrap();
    assert_eq!(body.birth_date, None);
    assert_eq!(body.additional_info, None);
}

#[test]
fn update_distinguishes_absent_from_null() {
    let upd: ContactUpdate = serde_json::from_str(r#"{"birth_date": null}"#).unwrap();
    assert_eq!(upd.birth_date, Some(None));
    assert_eq!(upd.additional_info, None);
    assert_eq!(upd.first_name, None);

    let upd: ContactUpdate = serde_json::from_str(r#"{"birth_date": "1990-07-02"}"#).unwrap();
    assert_eq!(upd.birth_date, Some(NaiveDate::from_ymd_opt(1990, 7, 2)));

    let upd: ContactUpdate = serde_json::from_str("{}").unwrap();
    assert!(upd.is_empty());
}

#[test]
fn update_serializes_only_supplied_fields() {
    let upd = ContactUpdate { additional_info: Some(None), ..Default::default() };
    assert_eq!(serde_json::to_string(&upd).unwrap(), r#"{"additional_info":null}"#);
}

#[test]
fn update_validates_only_supplied_fields() {
    let upd = ContactUpdate { email: Some("broken".into()), ..Default::default() };
    assert_eq!(upd.validate().unwrap_err().field(), "email");
    assert!(ContactUpdate::default().validate().is_ok());
    let upd = ContactUpdate { additional_info: Some(None), ..Default::default() };
    assert!(upd.validate().is_ok());
}

#[test]
fn apply_touches_only_supplied_fields() {
    let now = Utc::now().fixed_offset();
    let mut am = sample("Anna", "K", "anna@example.com").into_active_model(now);
    assert_eq!(am.id, NotSet);
    am.birth_date = Set(NaiveDate::from_ymd_opt(1990, 6, 28));

    ContactUpdate {
        last_name: Some("Kovalenko".into()),
        birth_date: Some(None),
        ..Default::default()
    }
    .apply(&mut am);

    assert_eq!(am.first_name, Set("Anna".to_string()));
    assert_eq!(am.last_name, Set("Kovalenko".to_string()));
    assert_eq!(am.birth_date, ActiveValue::Set(None));
    assert_eq!(am.email, Set("anna@example.com".to_string()));
}

#[test]
fn full_body_becomes_full_update() {
    let upd = ContactUpdate::from(sample("A", "B", "a@example.com"));
    assert_eq!(upd.first_name.as_deref(), Some("A"));
    assert_eq!(upd.birth_date, Some(None));
    assert_eq!(upd.additional_info, Some(None));
}
