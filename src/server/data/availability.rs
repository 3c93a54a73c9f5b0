use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::profile::AvailabilityWindowInput;

pub struct AvailabilityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AvailabilityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        educator_id: i32,
        input: AvailabilityWindowInput,
    ) -> Result<entity::availability_window::Model, DbErr> {
        let window = entity::availability_window::ActiveModel {
            educator_id: ActiveValue::Set(educator_id),
            day_of_week: ActiveValue::Set(input.day_of_week),
            start_time: ActiveValue::Set(input.start_time),
            end_time: ActiveValue::Set(input.end_time),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        window.insert(self.db).await
    }

    /// Lists an educator's windows ordered by day then start time
    pub async fn list_for_educator(
        &self,
        educator_id: i32,
    ) -> Result<Vec<entity::availability_window::Model>, DbErr> {
        entity::prelude::AvailabilityWindow::find()
            .filter(entity::availability_window::Column::EducatorId.eq(educator_id))
            .order_by_asc(entity::availability_window::Column::DayOfWeek)
            .order_by_asc(entity::availability_window::Column::StartTime)
            .all(self.db)
            .await
    }

    pub async fn list_for_day(
        &self,
        educator_id: i32,
        day_of_week: i16,
    ) -> Result<Vec<entity::availability_window::Model>, DbErr> {
        entity::prelude::AvailabilityWindow::find()
            .filter(entity::availability_window::Column::EducatorId.eq(educator_id))
            .filter(entity::availability_window::Column::DayOfWeek.eq(day_of_week))
            .order_by_asc(entity::availability_window::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Deletes a window of `educator_id`
    ///
    /// Returns OK regardless of the window existing, check [`DeleteResult::rows_affected`].
    pub async fn delete_for_educator(
        &self,
        window_id: i32,
        educator_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::AvailabilityWindow::delete_many()
            .filter(entity::availability_window::Column::Id.eq(window_id))
            .filter(entity::availability_window::Column::EducatorId.eq(educator_id))
            .exec(self.db)
            .await
    }
}
