use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{ReviewStatus, SubscriptionStatus};
use migration::{CaseStatement, Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Order, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::profile::EducatorProfileInput;

/// Optional filters applied to the public educator search.
#[derive(Debug, Default, Clone)]
pub struct EducatorSearchFilter {
    pub city: Option<String>,
    pub profession_code: Option<String>,
    pub max_rate_cents: Option<i64>,
}

pub struct EducatorProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EducatorProfileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the profile of `user_id`; new profiles await verification.
    pub async fn create(
        &self,
        user_id: i32,
        input: EducatorProfileInput,
    ) -> Result<entity::educator_profile::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let profile = entity::educator_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            first_name: ActiveValue::Set(input.first_name),
            last_name: ActiveValue::Set(input.last_name),
            phone: ActiveValue::Set(input.phone),
            city: ActiveValue::Set(input.city),
            postal_code: ActiveValue::Set(input.postal_code),
            bio: ActiveValue::Set(input.bio),
            profession_code: ActiveValue::Set(input.profession_code),
            hourly_rate_cents: ActiveValue::Set(input.hourly_rate_cents),
            years_experience: ActiveValue::Set(input.years_experience),
            siret_number: ActiveValue::Set(input.siret_number),
            rpps_number: ActiveValue::Set(input.rpps_number),
            sap_number: ActiveValue::Set(input.sap_number),
            video_url: ActiveValue::Set(None),
            verification_status: ActiveValue::Set(ReviewStatus::Pending),
            stripe_customer_id: ActiveValue::Set(None),
            subscription_status: ActiveValue::Set(SubscriptionStatus::Inactive),
            subscription_current_period_end: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        profile.insert(self.db).await
    }

    /// Overwrites the editable fields of a profile.
    pub async fn update(
        &self,
        profile: entity::educator_profile::Model,
        input: EducatorProfileInput,
    ) -> Result<entity::educator_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.first_name = ActiveValue::Set(input.first_name);
        profile_am.last_name = ActiveValue::Set(input.last_name);
        profile_am.phone = ActiveValue::Set(input.phone);
        profile_am.city = ActiveValue::Set(input.city);
        profile_am.postal_code = ActiveValue::Set(input.postal_code);
        profile_am.bio = ActiveValue::Set(input.bio);
        profile_am.profession_code = ActiveValue::Set(input.profession_code);
        profile_am.hourly_rate_cents = ActiveValue::Set(input.hourly_rate_cents);
        profile_am.years_experience = ActiveValue::Set(input.years_experience);
        profile_am.siret_number = ActiveValue::Set(input.siret_number);
        profile_am.rpps_number = ActiveValue::Set(input.rpps_number);
        profile_am.sap_number = ActiveValue::Set(input.sap_number);
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }

    pub async fn get(
        &self,
        profile_id: i32,
    ) -> Result<Option<entity::educator_profile::Model>, DbErr> {
        entity::prelude::EducatorProfile::find_by_id(profile_id)
            .one(self.db)
            .await
    }

    /// Gets a profile together with its account, used to address emails.
    pub async fn get_with_user(
        &self,
        profile_id: i32,
    ) -> Result<
        Option<(
            entity::educator_profile::Model,
            Option<entity::app_user::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::EducatorProfile::find_by_id(profile_id)
            .find_also_related(entity::app_user::Entity)
            .one(self.db)
            .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::educator_profile::Model>, DbErr> {
        entity::prelude::EducatorProfile::find()
            .filter(entity::educator_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Gets an approved profile together with its account, for public display.
    pub async fn get_approved_with_user(
        &self,
        profile_id: i32,
    ) -> Result<
        Option<(
            entity::educator_profile::Model,
            Option<entity::app_user::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::EducatorProfile::find_by_id(profile_id)
            .filter(
                entity::educator_profile::Column::VerificationStatus.eq(ReviewStatus::Approved),
            )
            .find_also_related(entity::app_user::Entity)
            .one(self.db)
            .await
    }

    /// Approved educators matching `filter`, active subscribers first then newest first.
    ///
    /// Cities compare case-insensitively; stored cities are already trimmed.
    ///
    /// `page` is zero based.
    pub async fn search(
        &self,
        filter: EducatorSearchFilter,
        page: u64,
        per_page: u64,
    ) -> Result<
        Vec<(
            entity::educator_profile::Model,
            Option<entity::app_user::Model>,
        )>,
        DbErr,
    > {
        let mut query = entity::prelude::EducatorProfile::find().filter(
            entity::educator_profile::Column::VerificationStatus.eq(ReviewStatus::Approved),
        );

        if let Some(city) = filter.city {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    entity::educator_profile::Entity,
                    entity::educator_profile::Column::City,
                ))))
                .eq(city.trim().to_lowercase()),
            );
        }
        if let Some(profession_code) = filter.profession_code {
            query =
                query.filter(entity::educator_profile::Column::ProfessionCode.eq(profession_code));
        }
        if let Some(max_rate_cents) = filter.max_rate_cents {
            query = query
                .filter(entity::educator_profile::Column::HourlyRateCents.lte(max_rate_cents));
        }

        let premium_first = CaseStatement::new()
            .case(
                entity::educator_profile::Column::SubscriptionStatus
                    .is_in([SubscriptionStatus::Active, SubscriptionStatus::Trialing]),
                Expr::value(0),
            )
            .finally(Expr::value(1));

        query
            .order_by(Expr::value(premium_first), Order::Asc)
            .order_by_desc(entity::educator_profile::Column::CreatedAt)
            .order_by_desc(entity::educator_profile::Column::Id)
            .offset(page * per_page)
            .limit(per_page)
            .find_also_related(entity::app_user::Entity)
            .all(self.db)
            .await
    }

    pub async fn list_by_verification_status(
        &self,
        status: ReviewStatus,
    ) -> Result<Vec<entity::educator_profile::Model>, DbErr> {
        entity::prelude::EducatorProfile::find()
            .filter(entity::educator_profile::Column::VerificationStatus.eq(status))
            .order_by_asc(entity::educator_profile::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn set_verification_status(
        &self,
        profile: entity::educator_profile::Model,
        status: ReviewStatus,
    ) -> Result<entity::educator_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.verification_status = ActiveValue::Set(status);
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }

    pub async fn set_video_url(
        &self,
        profile: entity::educator_profile::Model,
        video_url: String,
    ) -> Result<entity::educator_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.video_url = ActiveValue::Set(Some(video_url));
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }

    pub async fn set_stripe_customer(
        &self,
        profile: entity::educator_profile::Model,
        customer_id: String,
    ) -> Result<entity::educator_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.stripe_customer_id = ActiveValue::Set(Some(customer_id));
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }

    pub async fn update_subscription(
        &self,
        profile: entity::educator_profile::Model,
        status: SubscriptionStatus,
        current_period_end: Option<NaiveDateTime>,
    ) -> Result<entity::educator_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.subscription_status = ActiveValue::Set(status);
        profile_am.subscription_current_period_end = ActiveValue::Set(current_period_end);
        profile_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        profile_am.update(self.db).await
    }
}
