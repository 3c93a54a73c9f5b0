use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::ReviewStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "certification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub educator_id: i32,
    pub title: String,
    pub issuer: String,
    pub diploma_number: Option<String>,
    pub obtained_on: Option<Date>,
    pub document_path: Option<String>,
    pub status: ReviewStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
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
}

impl Related<super::educator_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EducatorProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
