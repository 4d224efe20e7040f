use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One AQI value per location and hour. `(location_id, datetime)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "air_quality_readings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub reading_id: i32,
    pub location_id: i32,
    pub datetime: DateTimeWithTimeZone,
    pub aqi: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::LocationId"
    )]
    Location,
    #[sea_orm(has_many = "super::reading_components::Entity")]
    ReadingComponents,
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::reading_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingComponents.def()
    }
}

impl Related<super::components::Entity> for Entity {
    fn to() -> RelationDef {
        super::reading_components::Relation::Component.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::reading_components::Relation::Reading.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
