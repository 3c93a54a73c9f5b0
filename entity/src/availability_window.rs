use sea_orm::entity::prelude::*;

/// Recurring weekly window during which an educator accepts bookings.
///
/// `day_of_week` counts from Sunday (0) to Saturday (6).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "availability_window")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub educator_id: i32,
    pub day_of_week: i16,
    pub start_time: Time,
    pub end_time: Time,
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
}

impl Related<super::educator_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EducatorProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
