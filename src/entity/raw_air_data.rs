use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Verbatim API entries, append-only. `raw_id` is never set or read by the
/// backfill; inserts go out without a RETURNING clause.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_air_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub raw_id: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub location: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub air_data: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
