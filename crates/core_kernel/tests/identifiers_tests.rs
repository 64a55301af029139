//! Unit tests for strongly-typed identifiers

use core_kernel::{EmployeeId, InstallmentId, LoanId};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn test_display_includes_prefix() {
    assert!(LoanId::new().to_string().starts_with("LN-"));
    assert!(InstallmentId::new().to_string().starts_with("INST-"));
    assert!(EmployeeId::new().to_string().starts_with("EMP-"));
}

#[test]
fn test_parse_accepts_prefixed_form() {
    let id = LoanId::new();
    let parsed: LoanId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_parse_accepts_bare_uuid() {
    let uuid = Uuid::new_v4();
    let parsed: LoanId = uuid.to_string().parse().unwrap();
    assert_eq!(parsed, LoanId::from_uuid(uuid));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("not-a-uuid".parse::<InstallmentId>().is_err());
}

#[test]
fn test_new_generates_unique_ids() {
    let ids: HashSet<_> = (0..100).map(|_| LoanId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_v7_ids_are_time_ordered() {
    let a = InstallmentId::new_v7();
    let b = InstallmentId::new_v7();
    assert!(a.as_uuid() <= b.as_uuid());
}

#[test]
fn test_serde_is_transparent() {
    let id = LoanId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));

    let back: LoanId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id = EmployeeId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(back, uuid);
}
