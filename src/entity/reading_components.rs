use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reading_components")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub reading_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub component_id: i32,
    pub value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::air_quality_readings::Entity",
        from = "Column::ReadingId",
        to = "super::air_quality_readings::Column::ReadingId"
    )]
    Reading,
    #[sea_orm(
        belongs_to = "super::components::Entity",
        from = "Column::ComponentId",
        to = "super::components::Column::ComponentId"
    )]
    Component,
}

impl Related<super::air_quality_readings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reading.def()
    }
}

impl Related<super::components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Component.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
