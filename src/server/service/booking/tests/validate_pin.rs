use super::*;

use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};

use crate::server::{
    data::{appointment::AppointmentRepository, invoice::InvoiceRepository},
    error::{booking::BookingError, Error},
    service::booking::BookingService,
    util::test::TestContextExt,
};

/// Accepted appointment happening now, so the PIN is valid.
async fn accepted_now(
    test: &TestContext,
) -> Result<(entity::app_user::Model, entity::appointment::Model), TestError> {
    let now = Utc::now().naive_utc();
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, now.date(), time(9, 0), time(10, 0))
                .status(AppointmentStatus::Accepted, PaymentStatus::Authorized)
                .pin_expires_at(now + Duration::hours(1)),
        )
        .await?;

    Ok((educator_user, appointment))
}

/// Expect capture, completion and an invoice
#[tokio::test]
async fn captures_payment() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let (educator_user, appointment) = accepted_now(&test).await?;
    let capture = test.provider().stripe_capture("pi_test", 1);
    let upload = test.provider().storage_upload("invoices", 1);

    let state = test.app_state();
    let dto = BookingService::new(&state)
        .validate_pin(&educator_user, appointment.id, "4821")
        .await
        .unwrap();

    assert_eq!(dto.status, AppointmentStatus::Completed);
    assert_eq!(dto.payment_status, PaymentStatus::Captured);

    let invoice = InvoiceRepository::new(&test.db)
        .find_by_appointment(appointment.id)
        .await?
        .unwrap();
    assert_eq!(invoice.total_cents, 6000);
    capture.assert();
    upload.assert();

    Ok(())
}

/// Expect the capture to stand when the invoice upload fails
#[tokio::test]
async fn completes_despite_invoice_failure() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let (educator_user, appointment) = accepted_now(&test).await?;
    let _capture = test.provider().stripe_capture("pi_test", 1);

    let state = test.app_state();
    let dto = BookingService::new(&state)
        .validate_pin(&educator_user, appointment.id, "4821")
        .await
        .unwrap();

    assert_eq!(dto.status, AppointmentStatus::Completed);

    Ok(())
}

/// Expect each wrong entry to be counted and the third to lock the PIN
#[tokio::test]
async fn counts_wrong_attempts() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let (educator_user, appointment) = accepted_now(&test).await?;
    let capture = test.provider().stripe_capture("pi_test", 0);

    let state = test.app_state();
    let service = BookingService::new(&state);

    for remaining in [2, 1, 0] {
        let result = service
            .validate_pin(&educator_user, appointment.id, "0000")
            .await;

        assert!(matches!(
            result,
            Err(Error::BookingError(BookingError::PinMismatch { remaining: r })) if r == remaining
        ));
    }

    let result = service
        .validate_pin(&educator_user, appointment.id, "4821")
        .await;
    assert!(matches!(
        result,
        Err(Error::BookingError(BookingError::PinLocked))
    ));

    let stored = AppointmentRepository::new(&test.db)
        .get(appointment.id)
        .await?
        .unwrap();
    assert_eq!(stored.pin_attempts, 3);
    assert_eq!(stored.payment_status, PaymentStatus::Authorized);
    capture.assert();

    Ok(())
}

#[tokio::test]
async fn rejects_expired_pin() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    let date = Utc::now().date_naive() - Duration::days(1);
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, date, time(9, 0), time(10, 0))
                .status(AppointmentStatus::Accepted, PaymentStatus::Authorized),
        )
        .await?;

    let state = test.app_state();
    let result = BookingService::new(&state)
        .validate_pin(&educator_user, appointment.id, "4821")
        .await;

    assert!(matches!(
        result,
        Err(Error::BookingError(BookingError::PinExpired))
    ));

    Ok(())
}

/// Expect the PIN to be refused until the educator accepted the appointment
#[tokio::test]
async fn requires_accepted_appointment() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, next_week(), time(9, 0), time(10, 0))
                .status(AppointmentStatus::Pending, PaymentStatus::Authorized),
        )
        .await?;

    let state = test.app_state();
    let result = BookingService::new(&state)
        .validate_pin(&educator_user, appointment.id, "4821")
        .await;

    assert!(matches!(
        result,
        Err(Error::BookingError(BookingError::InvalidTransition { .. }))
    ));

    Ok(())
}
