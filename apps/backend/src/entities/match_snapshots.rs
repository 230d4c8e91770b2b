use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_snapshots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "match_id")]
    pub match_id: i64,
    /// Encoded `MatchState` JSON.
    #[sea_orm(column_type = "Text")]
    pub snapshot: String,
    pub version: i64,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seat_hands::Entity")]
    SeatHands,
}

impl Related<super::seat_hands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatHands.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
