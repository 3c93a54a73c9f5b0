use chrono::Utc;
use entity::sea_orm_active_enums::{ReviewStatus, UserRole};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an account for a Supabase identity
    pub async fn create(
        &self,
        auth_user_id: &str,
        email: &str,
        role: UserRole,
    ) -> Result<entity::app_user::Model, DbErr> {
        let user = entity::app_user::ActiveModel {
            auth_user_id: ActiveValue::Set(auth_user_id.to_string()),
            email: ActiveValue::Set(email.to_string()),
            role: ActiveValue::Set(role),
            avatar_url: ActiveValue::Set(None),
            avatar_status: ActiveValue::Set(ReviewStatus::None),
            avatar_rejection_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::app_user::Model>, DbErr> {
        entity::prelude::AppUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_auth_user_id(
        &self,
        auth_user_id: &str,
    ) -> Result<Option<entity::app_user::Model>, DbErr> {
        entity::prelude::AppUser::find()
            .filter(entity::app_user::Column::AuthUserId.eq(auth_user_id))
            .one(self.db)
            .await
    }

    /// Stores a newly uploaded avatar and queues it for review
    pub async fn set_avatar(
        &self,
        user_id: i32,
        avatar_url: String,
    ) -> Result<Option<entity::app_user::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.avatar_url = ActiveValue::Set(Some(avatar_url));
        user_am.avatar_status = ActiveValue::Set(ReviewStatus::Pending);
        user_am.avatar_rejection_reason = ActiveValue::Set(None);

        Ok(Some(user_am.update(self.db).await?))
    }

    /// Records the moderation outcome of the user's avatar
    pub async fn review_avatar(
        &self,
        user_id: i32,
        status: ReviewStatus,
        rejection_reason: Option<String>,
    ) -> Result<Option<entity::app_user::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.avatar_status = ActiveValue::Set(status);
        user_am.avatar_rejection_reason = ActiveValue::Set(rejection_reason);

        Ok(Some(user_am.update(self.db).await?))
    }

    pub async fn list_pending_avatars(&self) -> Result<Vec<entity::app_user::Model>, DbErr> {
        entity::prelude::AppUser::find()
            .filter(entity::app_user::Column::AvatarStatus.eq(ReviewStatus::Pending))
            .order_by_asc(entity::app_user::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{ReviewStatus, UserRole};

        use crate::server::data::user::UserRepository;

        /// Expect success when creating a new user
        #[tokio::test]
        async fn creates_user() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo
                .create("auth-1", "family@carelink.test", UserRole::Family)
                .await;

            assert!(result.is_ok());
            let user = result.unwrap();
            assert_eq!(user.role, UserRole::Family);
            assert_eq!(user.avatar_status, ReviewStatus::None);

            Ok(())
        }

        /// Expect Error when the Supabase identity is already linked to an account
        #[tokio::test]
        async fn fails_for_duplicate_identity() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let user_repo = UserRepository::new(&test.db);
            user_repo
                .create("auth-1", "family@carelink.test", UserRole::Family)
                .await?;

            let result = user_repo
                .create("auth-1", "other@carelink.test", UserRole::Educator)
                .await;

            assert!(result.is_err());

            Ok(())
        }

        /// Expect Error when required database tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo
                .create("auth-1", "family@carelink.test", UserRole::Family)
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod find_by_auth_user_id {
        use carelink_test_utils::prelude::*;

        use crate::server::data::user::UserRepository;

        #[tokio::test]
        async fn finds_existing_user() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let (user, _) = test.user().insert_family("family@carelink.test").await?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.find_by_auth_user_id(&user.auth_user_id).await?;

            assert_eq!(result.map(|u| u.id), Some(user.id));

            Ok(())
        }

        #[tokio::test]
        async fn returns_none_for_unknown_identity() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo.find_by_auth_user_id("auth-unknown").await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod avatar {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::server::data::user::UserRepository;

        /// Expect a new upload to reset a previous rejection and queue the avatar for review
        #[tokio::test]
        async fn new_upload_is_pending() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let (user, _) = test.user().insert_family("family@carelink.test").await?;
            let user_repo = UserRepository::new(&test.db);
            user_repo
                .review_avatar(user.id, ReviewStatus::Rejected, Some("Blurry".to_string()))
                .await?;

            let updated = user_repo
                .set_avatar(user.id, "https://cdn.test/a.png".to_string())
                .await?
                .unwrap();

            assert_eq!(updated.avatar_status, ReviewStatus::Pending);
            assert!(updated.avatar_rejection_reason.is_none());

            let pending = user_repo.list_pending_avatars().await?;
            assert_eq!(pending.len(), 1);

            Ok(())
        }

        /// Expect Ok(None) when the user does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;

            let user_repo = UserRepository::new(&test.db);
            let result = user_repo
                .set_avatar(1, "https://cdn.test/a.png".to_string())
                .await?;

            assert!(result.is_none());

            Ok(())
        }
    }
}
