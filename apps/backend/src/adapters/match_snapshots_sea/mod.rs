//! SeaORM adapter for match snapshots - generic over ConnectionTrait.
//!
//! The free functions return `DbErr`; `SeaMatchStore` wraps them behind the
//! `PersistenceGateway` contract and maps to `DomainError`.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use tracing::{debug, warn};

use crate::domain::{Card, MatchId, Seat};
use crate::entities::{match_snapshots, seat_hands};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::match_store::{CasOutcome, PersistenceGateway, StoredMatch};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<match_snapshots::Model>, sea_orm::DbErr> {
    match_snapshots::Entity::find_by_id(match_id).one(conn).await
}

/// Insert the first snapshot at version 1.
///
/// A unique violation means another writer created the row first; the caller
/// sees it as a version conflict against whatever is stored now.
async fn insert_initial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    snapshot: String,
) -> Result<CasOutcome, sea_orm::DbErr> {
    let row = match_snapshots::ActiveModel {
        match_id: Set(match_id),
        snapshot: Set(snapshot),
        version: Set(1),
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };

    match match_snapshots::Entity::insert(row).exec(conn).await {
        Ok(_) => Ok(CasOutcome::Committed { version: 1 }),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            let actual = find_by_id(conn, match_id)
                .await?
                .map(|m| m.version)
                .unwrap_or(0);
            Ok(CasOutcome::VersionConflict { actual })
        }
        Err(e) => Err(e),
    }
}

/// Conditional update: write only where `version = expected_version`, bumping
/// the version by one. Zero rows affected is either a stale version or a
/// missing row; a follow-up read tells them apart.
pub async fn compare_and_swap<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    expected_version: i64,
    snapshot: String,
) -> Result<CasOutcome, sea_orm::DbErr> {
    if expected_version == 0 {
        if let Some(existing) = find_by_id(conn, match_id).await? {
            return Ok(CasOutcome::VersionConflict {
                actual: existing.version,
            });
        }
        return insert_initial(conn, match_id, snapshot).await;
    }

    let now = time::OffsetDateTime::now_utc();
    let result = match_snapshots::Entity::update_many()
        .col_expr(match_snapshots::Column::Snapshot, Expr::val(snapshot).into())
        .col_expr(match_snapshots::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            match_snapshots::Column::Version,
            Expr::col(match_snapshots::Column::Version).add(1),
        )
        .filter(match_snapshots::Column::MatchId.eq(match_id))
        .filter(match_snapshots::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(match find_by_id(conn, match_id).await? {
            Some(row) => CasOutcome::VersionConflict {
                actual: row.version,
            },
            None => CasOutcome::NotFound,
        });
    }

    Ok(CasOutcome::Committed {
        version: expected_version + 1,
    })
}

/// Upsert one seat's hand as a JSON array of card tokens.
pub async fn upsert_seat_hand<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    seat: i16,
    cards_json: String,
) -> Result<(), sea_orm::DbErr> {
    let row = seat_hands::ActiveModel {
        match_id: Set(match_id),
        seat: Set(seat),
        cards: Set(cards_json),
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };

    seat_hands::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([seat_hands::Column::MatchId, seat_hands::Column::Seat])
                .update_columns([seat_hands::Column::Cards, seat_hands::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn count_seat_hands<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    seat_hands::Entity::find()
        .filter(seat_hands::Column::MatchId.eq(match_id))
        .count(conn)
        .await
}

/// `PersistenceGateway` over a SeaORM connection (Postgres or SQLite).
#[derive(Clone)]
pub struct SeaMatchStore {
    db: DatabaseConnection,
}

impl SeaMatchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl PersistenceGateway for SeaMatchStore {
    async fn load(&self, match_id: MatchId) -> Result<Option<StoredMatch>, DomainError> {
        let row = find_by_id(&self.db, match_id).await?;
        Ok(row.map(|m| StoredMatch {
            snapshot: m.snapshot,
            version: m.version,
        }))
    }

    async fn compare_and_swap(
        &self,
        match_id: MatchId,
        expected_version: i64,
        snapshot: String,
    ) -> Result<CasOutcome, DomainError> {
        let outcome = compare_and_swap(&self.db, match_id, expected_version, snapshot).await?;
        debug!(match_id, expected_version, ?outcome, "snapshot CAS");
        Ok(outcome)
    }

    async fn persist_seat_hand_best_effort(
        &self,
        match_id: MatchId,
        seat: Seat,
        hand: &[Card],
    ) -> Result<(), DomainError> {
        let cards_json = serde_json::to_string(hand).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("SERDE".into()),
                format!("encode seat hand: {e}"),
            )
        })?;
        if let Err(e) = upsert_seat_hand(&self.db, match_id, i16::from(seat), cards_json).await {
            warn!(match_id, seat, error = %e, "seat hand write failed");
            return Err(e.into());
        }
        Ok(())
    }

    async fn has_seat_hands(&self, match_id: MatchId) -> Result<bool, DomainError> {
        Ok(count_seat_hands(&self.db, match_id).await? > 0)
    }
}
