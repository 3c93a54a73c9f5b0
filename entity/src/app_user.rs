use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{ReviewStatus, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub auth_user_id: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub avatar_status: ReviewStatus,
    pub avatar_rejection_reason: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::educator_profile::Entity")]
    EducatorProfile,
    #[sea_orm(has_one = "super::family_profile::Entity")]
    FamilyProfile,
}

impl Related<super::educator_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EducatorProfile.def()
    }
}

impl Related<super::family_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FamilyProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
