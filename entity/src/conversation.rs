use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "conversation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub educator_id: i32,
    pub family_id: i32,
    pub last_message_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::educator_profile::Entity",
        from = "Column::EducatorId",
        to = "super::educator_profile::Column::Id",
        on_delete = "Cascade"
    )]
    EducatorProfile,
    #[sea_orm(
        belongs_to = "super::family_profile::Entity",
        from = "Column::FamilyId",
        to = "super::family_profile::Column::Id",
        on_delete = "Cascade"
    )]
    FamilyProfile,
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
