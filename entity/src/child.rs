use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "child")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub family_id: i32,
    pub first_name: String,
    pub birth_date: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub needs_description: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::family_profile::Entity",
        from = "Column::FamilyId",
        to = "super::family_profile::Column::Id",
        on_delete = "Cascade"
    )]
    FamilyProfile,
}

impl Related<super::family_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FamilyProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
