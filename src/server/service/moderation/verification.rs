//! Admin verification of educator profiles. Only approved educators appear in search and can
//! be booked.

use entity::sea_orm_active_enums::ReviewStatus;
use sea_orm::DatabaseConnection;

use crate::{
    model::{api::ModerationDecisionDto, profile::EducatorProfileDto},
    server::{
        data::educator_profile::EducatorProfileRepository,
        error::Error,
        service::{
            moderation::{require_admin, Decision},
            profile::educator_profile_dto,
        },
    },
};

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_pending(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<EducatorProfileDto>, Error> {
        require_admin(user)?;

        let profiles = EducatorProfileRepository::new(self.db)
            .list_by_verification_status(ReviewStatus::Pending)
            .await?;

        Ok(profiles.into_iter().map(educator_profile_dto).collect())
    }

    /// Approves or rejects an educator. An approved educator can later be rejected, which
    /// removes them from search.
    pub async fn review(
        &self,
        user: &entity::app_user::Model,
        educator_id: i32,
        decision: ModerationDecisionDto,
    ) -> Result<EducatorProfileDto, Error> {
        require_admin(user)?;
        let decision = Decision::try_from(decision)?;

        let repo = EducatorProfileRepository::new(self.db);
        let profile = repo
            .get(educator_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Educator {}", educator_id)))?;

        let profile = repo
            .set_verification_status(profile, decision.review_status())
            .await?;

        tracing::info!(
            educator_id = %profile.id,
            status = ?profile.verification_status,
            reason = ?decision.reason(),
            "Educator verification reviewed"
        );

        Ok(educator_profile_dto(profile))
    }
}

#[cfg(test)]
mod tests {
    mod review {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::{
            model::api::ModerationDecisionDto,
            server::{
                data::educator_profile::EducatorProfileRepository, error::Error,
                service::moderation::verification::VerificationService,
            },
        };

        #[tokio::test]
        async fn approves_pending_educator() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            EducatorProfileRepository::new(&test.db)
                .set_verification_status(educator.clone(), ReviewStatus::Pending)
                .await?;

            let service = VerificationService::new(&test.db);

            let pending = service.list_pending(&admin).await.unwrap();
            assert_eq!(pending.len(), 1);

            let dto = service
                .review(
                    &admin,
                    educator.id,
                    ModerationDecisionDto {
                        approved: true,
                        reason: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(dto.verification_status, ReviewStatus::Approved);
            assert!(service.list_pending(&admin).await.unwrap().is_empty());

            Ok(())
        }

        #[tokio::test]
        async fn requires_admin() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let (user, educator) = test.user().insert_educator("edu@carelink.test").await?;

            let result = VerificationService::new(&test.db)
                .review(
                    &user,
                    educator.id,
                    ModerationDecisionDto {
                        approved: true,
                        reason: None,
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::Forbidden(_))));

            Ok(())
        }
    }
}
