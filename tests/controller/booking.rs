use super::*;

use carelink::{
    model::booking::PinValidationDto,
    server::{
        controller::booking::{accept, list_appointments, validate_pin},
        data::appointment::AppointmentRepository,
    },
};
use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};

fn next_week() -> chrono::NaiveDate {
    Utc::now().date_naive() + Duration::days(7)
}

#[tokio::test]
async fn lists_family_appointments() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (family_user, family) = test.user().insert_family("family@carelink.test").await?;
    test.marketplace()
        .insert_appointment(AppointmentSeed::new(
            educator.id,
            family.id,
            next_week(),
            time(9, 0),
            time(10, 0),
        ))
        .await?;
    test.sign_in(family_user.id).await?;

    let resp = list_appointments(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn listing_requires_session() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;

    let resp = list_appointments(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 403 when a family tries to accept an appointment
#[tokio::test]
async fn accept_is_reserved_to_educators() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (family_user, family) = test.user().insert_family("family@carelink.test").await?;
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, next_week(), time(9, 0), time(10, 0))
                .status(AppointmentStatus::Pending, PaymentStatus::Authorized),
        )
        .await?;
    test.sign_in(family_user.id).await?;

    let resp = accept(
        State(test.app_state()),
        test.session.clone(),
        Path(appointment.id),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 and a recorded attempt for a wrong PIN
#[tokio::test]
async fn wrong_pin_is_counted() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, next_week(), time(9, 0), time(10, 0))
                .status(AppointmentStatus::Accepted, PaymentStatus::Authorized),
        )
        .await?;
    test.sign_in(educator_user.id).await?;

    let resp = validate_pin(
        State(test.app_state()),
        test.session.clone(),
        Path(appointment.id),
        Json(PinValidationDto {
            pin: "0001".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let appointment = AppointmentRepository::new(&test.db)
        .get(appointment.id)
        .await?
        .unwrap();
    assert_eq!(appointment.pin_attempts, 1);

    Ok(())
}

/// Expect 410 once the PIN validity window has passed
#[tokio::test]
async fn expired_pin_is_gone() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, next_week(), time(9, 0), time(10, 0))
                .status(AppointmentStatus::Accepted, PaymentStatus::Authorized)
                .pin_expires_at(Utc::now().naive_utc() - Duration::minutes(5)),
        )
        .await?;
    test.sign_in(educator_user.id).await?;

    let resp = validate_pin(
        State(test.app_state()),
        test.session.clone(),
        Path(appointment.id),
        Json(PinValidationDto {
            pin: "4821".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::GONE);

    Ok(())
}

/// Expect 423 after three wrong attempts, even with the right PIN
#[tokio::test]
async fn locked_pin_is_refused() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (_, family) = test.user().insert_family("family@carelink.test").await?;
    let appointment = test
        .marketplace()
        .insert_appointment(
            AppointmentSeed::new(educator.id, family.id, next_week(), time(9, 0), time(10, 0))
                .status(AppointmentStatus::Accepted, PaymentStatus::Authorized)
                .pin("4821", 3),
        )
        .await?;
    test.sign_in(educator_user.id).await?;

    let resp = validate_pin(
        State(test.app_state()),
        test.session.clone(),
        Path(appointment.id),
        Json(PinValidationDto {
            pin: "4821".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::LOCKED);

    Ok(())
}
