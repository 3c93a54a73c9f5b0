use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::profile::FamilyProfileInput;

pub struct FamilyProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FamilyProfileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        input: FamilyProfileInput,
    ) -> Result<entity::family_profile::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let profile = entity::family_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            first_name: ActiveValue::Set(input.first_name),
            last_name: ActiveValue::Set(input.last_name),
            phone: ActiveValue::Set(input.phone),
            address: ActiveValue::Set(input.address),
            city: ActiveValue::Set(input.city),
            postal_code: ActiveValue::Set(input.postal_code),
            stripe_customer_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        profile.insert(self.db).await
    }

    pub async fn update(
        &self,
        profile: entity::family_profile::Model,
        input: FamilyProfileInput,
    ) -> Result<entity::family_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.first_name = ActiveValue::Set(input.first_name);
        profile_am.last_name = ActiveValue::Set(input.last_name);
        profile_am.phone = ActiveValue::Set(input.phone);
        profile_am.address = ActiveValue::Set(input.address);
        profile_am.city = ActiveValue::Set(input.city);
        profile_am.postal_code = ActiveValue::Set(input.postal_code);
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }

    pub async fn get(
        &self,
        profile_id: i32,
    ) -> Result<Option<entity::family_profile::Model>, DbErr> {
        entity::prelude::FamilyProfile::find_by_id(profile_id)
            .one(self.db)
            .await
    }

    /// Gets a profile together with its account, used to address emails.
    pub async fn get_with_user(
        &self,
        profile_id: i32,
    ) -> Result<
        Option<(
            entity::family_profile::Model,
            Option<entity::app_user::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::FamilyProfile::find_by_id(profile_id)
            .find_also_related(entity::app_user::Entity)
            .one(self.db)
            .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::family_profile::Model>, DbErr> {
        entity::prelude::FamilyProfile::find()
            .filter(entity::family_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn set_stripe_customer(
        &self,
        profile: entity::family_profile::Model,
        customer_id: String,
    ) -> Result<entity::family_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.stripe_customer_id = ActiveValue::Set(Some(customer_id));
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::UserRole;

        use crate::{
            model::profile::FamilyProfileInput,
            server::data::family_profile::FamilyProfileRepository,
        };

        fn input() -> FamilyProfileInput {
            FamilyProfileInput {
                first_name: "Nora".to_string(),
                last_name: "Petit".to_string(),
                phone: None,
                address: None,
                city: "Nantes".to_string(),
                postal_code: "44000".to_string(),
            }
        }

        #[tokio::test]
        async fn creates_profile() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let user = test
                .user()
                .insert_user("family@carelink.test", UserRole::Family)
                .await?;

            let repo = FamilyProfileRepository::new(&test.db);
            let profile = repo.create(user.id, input()).await?;

            let found = repo.find_by_user_id(user.id).await?;
            assert_eq!(found.map(|p| p.id), Some(profile.id));

            Ok(())
        }

        /// Expect Error when the user does not exist
        #[tokio::test]
        async fn fails_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;

            let repo = FamilyProfileRepository::new(&test.db);
            let result = repo.create(42, input()).await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
