use chrono::Utc;

use crate::server::{error::Error, model::app::AppState, service::booking::BookingService};

/// Releases payment authorizations whose PIN expired before the session was validated.
///
/// Returns the number of appointments marked expired.
pub async fn expire_stale_authorizations(state: AppState) -> Result<usize, Error> {
    BookingService::new(&state)
        .expire_stale_authorizations(Utc::now().naive_utc())
        .await
}

#[cfg(test)]
mod tests {
    use carelink_test_utils::prelude::*;
    use chrono::{Duration, NaiveTime, Utc};
    use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};

    use crate::server::{
        data::appointment::AppointmentRepository, scheduler::expiry::expire_stale_authorizations,
        util::test::TestContextExt,
    };

    /// Expect the job to release an appointment whose PIN expired yesterday
    #[tokio::test]
    async fn expires_yesterdays_authorization() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
        let (_, family) = test.user().insert_family("family@carelink.test").await?;
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let appointment = test
            .marketplace()
            .insert_appointment(
                AppointmentSeed::new(
                    educator.id,
                    family.id,
                    yesterday,
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                )
                .status(AppointmentStatus::Pending, PaymentStatus::Authorized),
            )
            .await?;
        let release = test.provider().stripe_cancel("pi_test", 1);

        let expired = expire_stale_authorizations(test.app_state()).await.unwrap();

        assert_eq!(expired, 1);
        let appointment = AppointmentRepository::new(&test.db)
            .get(appointment.id)
            .await?
            .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Expired);
        release.assert();

        Ok(())
    }

    #[tokio::test]
    async fn does_nothing_without_stale_appointments() -> Result<(), TestError> {
        let test = test_setup_with_marketplace_tables!()?;

        let expired = expire_stale_authorizations(test.app_state()).await.unwrap();

        assert_eq!(expired, 0);

        Ok(())
    }
}
