use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub educator_id: i32,
    pub family_id: i32,
    pub child_id: Option<i32>,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub amount_cents: i64,
    pub stripe_checkout_session_id: Option<String>,
    pub stripe_payment_intent_id: Option<String>,
    pub pin_code: String,
    pub pin_expires_at: DateTime,
    pub pin_attempts: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::educator_profile::Entity",
        from = "Column::EducatorId",
        to = "super::educator_profile::Column::Id"
    )]
    EducatorProfile,
    #[sea_orm(
        belongs_to = "super::family_profile::Entity",
        from = "Column::FamilyId",
        to = "super::family_profile::Column::Id"
    )]
    FamilyProfile,
    #[sea_orm(
        belongs_to = "super::child::Entity",
        from = "Column::ChildId",
        to = "super::child::Column::Id",
        on_delete = "SetNull"
    )]
    Child,
    #[sea_orm(has_one = "super::invoice::Entity")]
    Invoice,
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

impl Related<super::child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Child.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
