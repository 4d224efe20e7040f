use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "components")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub component_id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reading_components::Entity")]
    ReadingComponents,
}

impl Related<super::reading_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingComponents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
