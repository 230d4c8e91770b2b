use serde_json::Value;

use crate::domain::discard;
use crate::domain::snapshot::{decode, encode};
use crate::domain::test_state_helpers::dealt_match;
use crate::domain::Stage;
use crate::errors::domain::{DomainError, InfraErrorKind};

fn is_corruption(err: &DomainError) -> bool {
    matches!(err, DomainError::Infra(InfraErrorKind::DataCorruption, _))
}

#[test]
fn round_trip_preserves_state_and_version() {
    let mut state = dealt_match(3, 77);
    for seat in [1u8, 2, 0] {
        let card = state.hands[seat as usize][0];
        discard(&mut state, seat, &[card]).unwrap();
    }
    assert_eq!(state.stage, Stage::Pegging);
    state.version = 5;

    let json = encode(&state).unwrap();
    let restored = decode(&json, 5).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn version_is_not_part_of_the_json() {
    let mut state = dealt_match(2, 1);
    state.version = 42;
    let value: Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();
    assert!(value.get("version").is_none());
    assert_eq!(value["stage"], "discard");
    assert!(value["hands"][0][0].is_string());
}

#[test]
fn rejects_garbage() {
    let err = decode("{not json", 1).unwrap_err();
    assert!(is_corruption(&err));
}

#[test]
fn rejects_seat_vector_length_mismatch() {
    let state = dealt_match(2, 9);
    let mut value: Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();
    value["scores"] = serde_json::json!([0, 0, 0]);
    let err = decode(&value.to_string(), 1).unwrap_err();
    assert!(is_corruption(&err));
}

#[test]
fn rejects_duplicated_card() {
    let state = dealt_match(2, 9);
    let mut value: Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();
    let dup = value["hands"][0][0].clone();
    value["deck"][0] = dup;
    let err = decode(&value.to_string(), 1).unwrap_err();
    assert!(is_corruption(&err));
}

#[test]
fn rejects_invalid_seat_count() {
    let state = dealt_match(2, 9);
    let mut value: Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();
    value["rules"]["seat_count"] = serde_json::json!(7);
    let err = decode(&value.to_string(), 1).unwrap_err();
    assert!(is_corruption(&err));
}

#[test]
fn rejects_inconsistent_pegging_total() {
    let state = dealt_match(2, 9);
    let mut value: Value = serde_json::from_str(&encode(&state).unwrap()).unwrap();
    value["pegging_total"] = serde_json::json!(12);
    let err = decode(&value.to_string(), 1).unwrap_err();
    assert!(is_corruption(&err));
}
