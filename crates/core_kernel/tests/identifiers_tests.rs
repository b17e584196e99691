//! Tests for typed identifiers

use core_kernel::{BankId, CreditId, LetterId, LetterPaymentId, ProjectId};
use uuid::Uuid;

#[test]
fn test_ids_serialize_as_bare_uuid() {
    let uuid = Uuid::new_v4();
    let id = LetterId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", uuid));

    let back: LetterId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_parse_accepts_bare_uuid_with_whitespace() {
    let uuid = Uuid::new_v4();
    let id: ProjectId = format!("  {uuid} ").parse().unwrap();
    assert_eq!(id.as_uuid(), &uuid);
}

#[test]
fn test_parse_accepts_tagged_form() {
    let id = CreditId::new();
    let parsed: CreditId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("not-an-id".parse::<BankId>().is_err());
    assert!("GL-".parse::<LetterId>().is_err());
}

#[test]
fn test_tags_are_distinct() {
    assert_ne!(ProjectId::TAG, BankId::TAG);
    assert_ne!(LetterId::TAG, LetterPaymentId::TAG);
}
