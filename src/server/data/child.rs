use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::profile::ChildInput;

pub struct ChildRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChildRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        family_id: i32,
        input: ChildInput,
    ) -> Result<entity::child::Model, DbErr> {
        let child = entity::child::ActiveModel {
            family_id: ActiveValue::Set(family_id),
            first_name: ActiveValue::Set(input.first_name),
            birth_date: ActiveValue::Set(input.birth_date),
            needs_description: ActiveValue::Set(input.needs_description),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        child.insert(self.db).await
    }

    /// Gets a child only if it belongs to `family_id`
    pub async fn get_for_family(
        &self,
        child_id: i32,
        family_id: i32,
    ) -> Result<Option<entity::child::Model>, DbErr> {
        entity::prelude::Child::find_by_id(child_id)
            .filter(entity::child::Column::FamilyId.eq(family_id))
            .one(self.db)
            .await
    }

    pub async fn list_for_family(&self, family_id: i32) -> Result<Vec<entity::child::Model>, DbErr> {
        entity::prelude::Child::find()
            .filter(entity::child::Column::FamilyId.eq(family_id))
            .order_by_asc(entity::child::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        child: entity::child::Model,
        input: ChildInput,
    ) -> Result<entity::child::Model, DbErr> {
        let mut child_am = child.into_active_model();
        child_am.first_name = ActiveValue::Set(input.first_name);
        child_am.birth_date = ActiveValue::Set(input.birth_date);
        child_am.needs_description = ActiveValue::Set(input.needs_description);

        child_am.update(self.db).await
    }

    /// Deletes a child of `family_id`
    ///
    /// Returns OK regardless of the child existing, check [`DeleteResult::rows_affected`].
    pub async fn delete_for_family(
        &self,
        child_id: i32,
        family_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::Child::delete_many()
            .filter(entity::child::Column::Id.eq(child_id))
            .filter(entity::child::Column::FamilyId.eq(family_id))
            .exec(self.db)
            .await
    }
}
