use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seat_hands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "match_id")]
    pub match_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub seat: i16,
    /// JSON array of card tokens.
    #[sea_orm(column_type = "Text")]
    pub cards: String,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::match_snapshots::Entity",
        from = "Column::MatchId",
        to = "super::match_snapshots::Column::MatchId"
    )]
    MatchSnapshot,
}

impl Related<super::match_snapshots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchSnapshot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
