use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{ReviewStatus, SubscriptionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "educator_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub city: String,
    pub postal_code: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub profession_code: String,
    pub hourly_rate_cents: i64,
    pub years_experience: i32,
    pub siret_number: Option<String>,
    pub rpps_number: Option<String>,
    pub sap_number: Option<String>,
    pub video_url: Option<String>,
    pub verification_status: ReviewStatus,
    pub stripe_customer_id: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub subscription_current_period_end: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::UserId",
        to = "super::app_user::Column::Id"
    )]
    AppUser,
    #[sea_orm(has_many = "super::availability_window::Entity")]
    AvailabilityWindow,
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointment,
    #[sea_orm(has_many = "super::certification::Entity")]
    Certification,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppUser.def()
    }
}

impl Related<super::availability_window::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailabilityWindow.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl Related<super::certification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
