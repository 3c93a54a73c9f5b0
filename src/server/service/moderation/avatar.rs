//! Profile pictures. New avatars stay hidden from other users until an admin approves them.

use entity::sea_orm_active_enums::ReviewStatus;

use crate::{
    model::{api::ModerationDecisionDto, content::PendingAvatarDto, user::UserDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, moderation::ModerationError, Error},
        model::app::AppState,
        provider::storage::Bucket,
        service::{
            auth::user_dto,
            media::{Upload, IMAGE_UPLOAD},
            moderation::{require_admin, Decision},
        },
    },
};

pub struct AvatarService<'a> {
    state: &'a AppState,
}

impl<'a> AvatarService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Uploads a new avatar and queues it for review.
    pub async fn upload(
        &self,
        user: &entity::app_user::Model,
        upload: Upload,
    ) -> Result<UserDto, Error> {
        let extension = IMAGE_UPLOAD.check(&upload)?;

        let path = format!("{}/avatar.{}", user.id, extension);
        self.state
            .storage
            .upload(Bucket::Avatars, &path, &upload.content_type, upload.bytes)
            .await?;
        let url = self.state.storage.public_url(Bucket::Avatars, &path);

        let user = UserRepository::new(&self.state.db)
            .set_avatar(user.id, url)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user.id))?;

        tracing::info!(user_id = %user.id, "Avatar uploaded for review");

        Ok(user_dto(user))
    }

    pub async fn list_pending(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<PendingAvatarDto>, Error> {
        require_admin(user)?;

        let users = UserRepository::new(&self.state.db)
            .list_pending_avatars()
            .await?;

        Ok(users
            .into_iter()
            .filter_map(|user| {
                user.avatar_url.map(|avatar_url| PendingAvatarDto {
                    user_id: user.id,
                    email: user.email,
                    avatar_url,
                })
            })
            .collect())
    }

    pub async fn review(
        &self,
        user: &entity::app_user::Model,
        target_user_id: i32,
        decision: ModerationDecisionDto,
    ) -> Result<UserDto, Error> {
        require_admin(user)?;
        let decision = Decision::try_from(decision)?;

        let repo = UserRepository::new(&self.state.db);
        let target = repo
            .get(target_user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("User {}", target_user_id)))?;

        if target.avatar_status != ReviewStatus::Pending {
            return Err(ModerationError::NotPending { item: "Avatar" }.into());
        }

        let target = repo
            .review_avatar(
                target.id,
                decision.review_status(),
                decision.reason().map(str::to_string),
            )
            .await?
            .ok_or_else(|| Error::NotFound(format!("User {}", target_user_id)))?;

        tracing::info!(
            user_id = %target.id,
            status = ?target.avatar_status,
            "Avatar reviewed"
        );

        if decision != Decision::Approve {
            self.remove_rejected(&target).await;
        }

        Ok(user_dto(target))
    }

    /// Deletes the stored file of a rejected avatar. Failures are logged only.
    async fn remove_rejected(&self, target: &entity::app_user::Model) {
        let Some(path) = target
            .avatar_url
            .as_deref()
            .and_then(|url| self.state.storage.object_path(Bucket::Avatars, url))
        else {
            return;
        };

        if let Err(err) = self.state.storage.remove(Bucket::Avatars, &[path]).await {
            tracing::warn!(user_id = %target.id, "Failed to remove rejected avatar: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    mod upload {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{ReviewStatus, UserRole};

        use crate::server::{
            error::Error,
            service::{media::Upload, moderation::avatar::AvatarService},
            util::test::TestContextExt,
        };

        /// Expect the avatar to be stored at a stable path and queued for review
        #[tokio::test]
        async fn queues_avatar_for_review() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let user = test
                .user()
                .insert_user("family@carelink.test", UserRole::Family)
                .await?;
            let upload = test.provider().storage_upload("avatars", 1);

            let state = test.app_state();
            let dto = AvatarService::new(&state)
                .upload(
                    &user,
                    Upload {
                        content_type: "image/png".to_string(),
                        bytes: vec![137, 80, 78, 71],
                    },
                )
                .await
                .unwrap();

            assert_eq!(dto.avatar_status, ReviewStatus::Pending);
            assert!(dto
                .avatar_url
                .unwrap()
                .ends_with(&format!("/avatars/{}/avatar.png", user.id)));
            upload.assert();

            Ok(())
        }

        #[tokio::test]
        async fn rejects_oversized_images() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let user = test
                .user()
                .insert_user("family@carelink.test", UserRole::Family)
                .await?;
            let upload = test.provider().storage_upload("avatars", 0);

            let state = test.app_state();
            let result = AvatarService::new(&state)
                .upload(
                    &user,
                    Upload {
                        content_type: "image/jpeg".to_string(),
                        bytes: vec![0; 5 * 1024 * 1024 + 1],
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::Validation(_))));
            upload.assert();

            Ok(())
        }
    }

    mod review {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::{ReviewStatus, UserRole};

        use crate::{
            model::api::ModerationDecisionDto,
            server::{
                data::user::UserRepository,
                error::{moderation::ModerationError, Error},
                provider::storage::Bucket,
                service::moderation::avatar::AvatarService,
                util::test::TestContextExt,
            },
        };

        #[tokio::test]
        async fn approves_pending_avatar() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let user = test
                .user()
                .insert_user("family@carelink.test", UserRole::Family)
                .await?;
            UserRepository::new(&test.db)
                .set_avatar(user.id, "https://cdn.test/avatar.png".to_string())
                .await?;

            let state = test.app_state();
            let service = AvatarService::new(&state);

            let pending = service.list_pending(&admin).await.unwrap();
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].user_id, user.id);

            let dto = service
                .review(
                    &admin,
                    user.id,
                    ModerationDecisionDto {
                        approved: true,
                        reason: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(dto.avatar_status, ReviewStatus::Approved);

            Ok(())
        }

        /// Expect the stored file to be deleted when an avatar is rejected
        #[tokio::test]
        async fn removes_rejected_avatar_file() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let user = test
                .user()
                .insert_user("family@carelink.test", UserRole::Family)
                .await?;
            let remove = test.provider().storage_remove("avatars", 1);

            let state = test.app_state();
            let url = state
                .storage
                .public_url(Bucket::Avatars, &format!("{}/avatar.png", user.id));
            UserRepository::new(&test.db).set_avatar(user.id, url).await?;

            let dto = AvatarService::new(&state)
                .review(
                    &admin,
                    user.id,
                    ModerationDecisionDto {
                        approved: false,
                        reason: Some("Not a photo".to_string()),
                    },
                )
                .await
                .unwrap();

            assert_eq!(dto.avatar_status, ReviewStatus::Rejected);
            remove.assert();

            Ok(())
        }

        /// Expect NotPending when the user never uploaded an avatar
        #[tokio::test]
        async fn rejects_users_without_pending_avatar() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let user = test
                .user()
                .insert_user("family@carelink.test", UserRole::Family)
                .await?;

            let state = test.app_state();
            let result = AvatarService::new(&state)
                .review(
                    &admin,
                    user.id,
                    ModerationDecisionDto {
                        approved: false,
                        reason: Some("Not a photo".to_string()),
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::ModerationError(ModerationError::NotPending { .. }))
            ));

            Ok(())
        }
    }
}
