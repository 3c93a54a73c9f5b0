//! Account fixtures.

use chrono::Utc;
use entity::sea_orm_active_enums::{ReviewStatus, SubscriptionStatus, UserRole};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an account whose Supabase id is derived from the email (`auth|{email}`).
    pub async fn insert_user(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<entity::app_user::Model, TestError> {
        Ok(
            entity::prelude::AppUser::insert(entity::app_user::ActiveModel {
                auth_user_id: ActiveValue::Set(format!("auth|{}", email)),
                email: ActiveValue::Set(email.to_string()),
                role: ActiveValue::Set(role),
                avatar_url: ActiveValue::Set(None),
                avatar_status: ActiveValue::Set(ReviewStatus::None),
                avatar_rejection_reason: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an educator account with an approved profile in Lyon charging 60 € per hour.
    pub async fn insert_educator(
        &self,
        email: &str,
    ) -> Result<(entity::app_user::Model, entity::educator_profile::Model), TestError> {
        let user = self.insert_user(email, UserRole::Educator).await?;
        let now = Utc::now().naive_utc();

        let profile = entity::prelude::EducatorProfile::insert(
            entity::educator_profile::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                first_name: ActiveValue::Set("Alex".to_string()),
                last_name: ActiveValue::Set("Martin".to_string()),
                phone: ActiveValue::Set(None),
                city: ActiveValue::Set("Lyon".to_string()),
                postal_code: ActiveValue::Set("69003".to_string()),
                bio: ActiveValue::Set("Specialised educator".to_string()),
                profession_code: ActiveValue::Set("educateur_specialise".to_string()),
                hourly_rate_cents: ActiveValue::Set(6000),
                years_experience: ActiveValue::Set(8),
                siret_number: ActiveValue::Set(Some("12345678900012".to_string())),
                rpps_number: ActiveValue::Set(None),
                sap_number: ActiveValue::Set(None),
                video_url: ActiveValue::Set(None),
                verification_status: ActiveValue::Set(ReviewStatus::Approved),
                stripe_customer_id: ActiveValue::Set(None),
                subscription_status: ActiveValue::Set(SubscriptionStatus::Inactive),
                subscription_current_period_end: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?;

        Ok((user, profile))
    }

    /// Insert a family account with its profile.
    pub async fn insert_family(
        &self,
        email: &str,
    ) -> Result<(entity::app_user::Model, entity::family_profile::Model), TestError> {
        let user = self.insert_user(email, UserRole::Family).await?;
        let now = Utc::now().naive_utc();

        let profile =
            entity::prelude::FamilyProfile::insert(entity::family_profile::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                first_name: ActiveValue::Set("Camille".to_string()),
                last_name: ActiveValue::Set("Durand".to_string()),
                phone: ActiveValue::Set(None),
                address: ActiveValue::Set(Some("12 rue de la Paix".to_string())),
                city: ActiveValue::Set("Lyon".to_string()),
                postal_code: ActiveValue::Set("69002".to_string()),
                stripe_customer_id: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?;

        Ok((user, profile))
    }

    pub async fn insert_admin(&self, email: &str) -> Result<entity::app_user::Model, TestError> {
        self.insert_user(email, UserRole::Admin).await
    }
}
