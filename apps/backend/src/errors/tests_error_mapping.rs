// Unit tests for error mapping - pure domain logic without database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_each_validation_kind_to_its_own_code() {
    let cases = [
        (ValidationKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (ValidationKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ValidationKind::CardNotInHand, ErrorCode::CardNotInHand),
        (ValidationKind::WrongDiscardCount, ErrorCode::WrongDiscardCount),
        (ValidationKind::ExceedsThirtyOne, ErrorCode::ExceedsThirtyOne),
        (ValidationKind::GoWithLegalPlay, ErrorCode::GoWithLegalPlay),
        (
            ValidationKind::Other("VALIDATION_ERROR".into()),
            ErrorCode::ValidationError,
        ),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad move").into();
        assert_eq!(app.code(), code);
        assert!(app.is_validation());
        assert_eq!(app.detail(), "bad move");
    }
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::OptimisticLock, "stale").into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert!(matches!(app, AppError::Conflict { .. }));

    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Match, "no match 7").into();
    assert_eq!(app.code().as_str(), "MATCH_NOT_FOUND");
    assert!(!app.is_validation());
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "deck exhausted").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert!(matches!(app, AppError::Internal { .. }));

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
    assert!(matches!(app, AppError::Db { .. }));
}

#[test]
fn state_unavailable_has_dedicated_code() {
    let app = AppError::state_unavailable("snapshot could not be decoded");
    assert_eq!(app.code(), ErrorCode::StateUnavailable);
    assert_eq!(
        app.to_string(),
        "Match state unavailable: snapshot could not be decoded"
    );
}
