//! Educator premium subscription through Stripe Billing.

use chrono::DateTime;
use entity::sea_orm_active_enums::SubscriptionStatus;

use crate::{
    model::billing::{CheckoutUrlDto, SubscriptionDto},
    server::{
        data::educator_profile::EducatorProfileRepository,
        error::{provider::ProviderError, Error},
        model::app::AppState,
        service::profile::require_educator,
    },
};

/// Maps a Stripe subscription status onto the statuses stored locally.
///
/// `incomplete`, `incomplete_expired`, `paused` and unknown values count as inactive.
pub fn subscription_status(stripe_status: &str) -> SubscriptionStatus {
    match stripe_status {
        "active" => SubscriptionStatus::Active,
        "trialing" => SubscriptionStatus::Trialing,
        "past_due" | "unpaid" => SubscriptionStatus::PastDue,
        "canceled" => SubscriptionStatus::Canceled,
        _ => SubscriptionStatus::Inactive,
    }
}

fn subscription_dto(profile: &entity::educator_profile::Model) -> SubscriptionDto {
    SubscriptionDto {
        status: profile.subscription_status,
        current_period_end: profile.subscription_current_period_end,
    }
}

pub struct BillingService<'a> {
    state: &'a AppState,
}

impl<'a> BillingService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Starts a subscription checkout for the calling educator.
    pub async fn subscription_checkout(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<CheckoutUrlDto, Error> {
        let educator = require_educator(&self.state.db, user).await?;

        let customer_id = match educator.stripe_customer_id.clone() {
            Some(customer_id) => customer_id,
            None => {
                let customer = self
                    .state
                    .stripe
                    .find_or_create_customer(
                        &user.email,
                        &format!("{} {}", educator.first_name, educator.last_name),
                    )
                    .await?;
                EducatorProfileRepository::new(&self.state.db)
                    .set_stripe_customer(educator.clone(), customer.id.clone())
                    .await?;
                customer.id
            }
        };

        let session = self
            .state
            .stripe
            .create_subscription_checkout(
                &customer_id,
                format!("{}/billing?status=success", self.state.app_url),
                format!("{}/billing?status=cancelled", self.state.app_url),
            )
            .await?;
        let checkout_url = session.url.ok_or(ProviderError::MissingField {
            provider: "Stripe",
            field: "url",
        })?;

        tracing::info!(educator_id = %educator.id, "Created subscription checkout");

        Ok(CheckoutUrlDto { checkout_url })
    }

    /// Refreshes the stored subscription from the customer's latest Stripe subscription.
    pub async fn sync_subscription(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<SubscriptionDto, Error> {
        let educator = require_educator(&self.state.db, user).await?;
        let repo = EducatorProfileRepository::new(&self.state.db);

        let Some(customer_id) = educator.stripe_customer_id.clone() else {
            let educator = repo
                .update_subscription(educator, SubscriptionStatus::Inactive, None)
                .await?;

            return Ok(subscription_dto(&educator));
        };

        let subscription = self.state.stripe.latest_subscription(&customer_id).await?;
        let (status, current_period_end) = match subscription {
            Some(subscription) => (
                subscription_status(&subscription.status),
                subscription
                    .current_period_end
                    .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
                    .map(|period_end| period_end.naive_utc()),
            ),
            None => (SubscriptionStatus::Inactive, None),
        };

        let educator = repo
            .update_subscription(educator, status, current_period_end)
            .await?;

        tracing::info!(
            educator_id = %educator.id,
            status = ?educator.subscription_status,
            "Subscription synced"
        );

        Ok(subscription_dto(&educator))
    }
}

#[cfg(test)]
mod tests {
    mod subscription_status {
        use entity::sea_orm_active_enums::SubscriptionStatus;

        use crate::server::service::billing::subscription_status;

        #[test]
        fn maps_stripe_statuses() {
            assert_eq!(subscription_status("active"), SubscriptionStatus::Active);
            assert_eq!(subscription_status("trialing"), SubscriptionStatus::Trialing);
            assert_eq!(subscription_status("unpaid"), SubscriptionStatus::PastDue);
            assert_eq!(subscription_status("canceled"), SubscriptionStatus::Canceled);
            assert_eq!(
                subscription_status("incomplete_expired"),
                SubscriptionStatus::Inactive
            );
        }
    }

    mod sync_subscription {
        use carelink_test_utils::prelude::*;
        use chrono::DateTime;
        use entity::sea_orm_active_enums::SubscriptionStatus;

        use crate::server::{
            data::educator_profile::EducatorProfileRepository, service::billing::BillingService,
            util::test::TestContextExt,
        };

        /// Expect the status and period end of the latest subscription to be stored
        #[tokio::test]
        async fn stores_latest_subscription() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let (user, educator) = test.user().insert_educator("edu@carelink.test").await?;
            EducatorProfileRepository::new(&test.db)
                .set_stripe_customer(educator, "cus_edu".to_string())
                .await?;
            let subscriptions = test
                .provider()
                .stripe_subscriptions(Some("active"), 1_790_000_000, 1);

            let state = test.app_state();
            let dto = BillingService::new(&state)
                .sync_subscription(&user)
                .await
                .unwrap();

            assert_eq!(dto.status, SubscriptionStatus::Active);
            assert_eq!(
                dto.current_period_end,
                DateTime::from_timestamp(1_790_000_000, 0).map(|end| end.naive_utc())
            );
            subscriptions.assert();

            Ok(())
        }

        /// Expect an educator without a Stripe customer to be inactive without calling Stripe
        #[tokio::test]
        async fn inactive_without_customer() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let (user, _) = test.user().insert_educator("edu@carelink.test").await?;
            let subscriptions = test.provider().stripe_subscriptions(None, 0, 0);

            let state = test.app_state();
            let dto = BillingService::new(&state)
                .sync_subscription(&user)
                .await
                .unwrap();

            assert_eq!(dto.status, SubscriptionStatus::Inactive);
            assert_eq!(dto.current_period_end, None);
            subscriptions.assert();

            Ok(())
        }

        #[tokio::test]
        async fn inactive_without_subscription() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let (user, educator) = test.user().insert_educator("edu@carelink.test").await?;
            EducatorProfileRepository::new(&test.db)
                .set_stripe_customer(educator, "cus_edu".to_string())
                .await?;
            let _subscriptions = test.provider().stripe_subscriptions(None, 0, 1);

            let state = test.app_state();
            let dto = BillingService::new(&state)
                .sync_subscription(&user)
                .await
                .unwrap();

            assert_eq!(dto.status, SubscriptionStatus::Inactive);

            Ok(())
        }
    }

    mod subscription_checkout {
        use carelink_test_utils::prelude::*;

        use crate::server::{
            data::educator_profile::EducatorProfileRepository, error::Error,
            service::billing::BillingService, util::test::TestContextExt,
        };

        /// Expect the customer to be created once and stored on the profile
        #[tokio::test]
        async fn returns_checkout_url() -> Result<(), TestError> {
            let mut test = test_setup_with_user_tables!()?;
            let (user, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let _search = test.provider().stripe_customer_search(Some("cus_edu"), 1);
            let checkout = test.provider().stripe_create_checkout("cs_sub", 1);

            let state = test.app_state();
            let dto = BillingService::new(&state)
                .subscription_checkout(&user)
                .await
                .unwrap();

            assert_eq!(dto.checkout_url, "https://checkout.stripe.test/cs_sub");
            let educator = EducatorProfileRepository::new(&test.db)
                .get(educator.id)
                .await?
                .unwrap();
            assert_eq!(educator.stripe_customer_id.as_deref(), Some("cus_edu"));
            checkout.assert();

            Ok(())
        }

        #[tokio::test]
        async fn rejects_families() -> Result<(), TestError> {
            let test = test_setup_with_user_tables!()?;
            let (user, _) = test.user().insert_family("family@carelink.test").await?;

            let state = test.app_state();
            let result = BillingService::new(&state).subscription_checkout(&user).await;

            assert!(matches!(result, Err(Error::Forbidden(_))));

            Ok(())
        }
    }
}
