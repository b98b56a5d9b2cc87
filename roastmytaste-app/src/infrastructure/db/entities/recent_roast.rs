use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One (user, roast) view record. Re-viewing refreshes `viewed_at` instead of
/// inserting a duplicate.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recent_roasts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub roast_id: String,
    pub viewed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::roast::Entity",
        from = "Column::RoastId",
        to = "super::roast::Column::Id",
        on_delete = "Cascade"
    )]
    Roast,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::roast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roast.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
