use super::*;

use carelink::{
    model::api::ModerationDecisionDto,
    server::controller::admin::{list_pending_certifications, review_certification},
};
use carelink_test_utils::constant::TEST_ADMIN_EMAIL;
use entity::sea_orm_active_enums::ReviewStatus;

#[tokio::test]
async fn moderation_queue_is_reserved_to_admins() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (family_user, _) = test.user().insert_family("family@carelink.test").await?;
    test.sign_in(family_user.id).await?;

    let resp = list_pending_certifications(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn rejection_requires_reason() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let admin = test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let certification = test
        .marketplace()
        .insert_certification(educator.id, Some("DEES-2016-0042"), ReviewStatus::Pending)
        .await?;
    test.sign_in(admin.id).await?;

    let resp = review_certification(
        State(test.app_state()),
        test.session.clone(),
        Path(certification.id),
        Json(ModerationDecisionDto {
            approved: false,
            reason: Some("   ".to_string()),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 200 and a decision email when an admin approves a certification
#[tokio::test]
async fn approves_pending_certification() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let admin = test.user().insert_admin(TEST_ADMIN_EMAIL).await?;
    let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let certification = test
        .marketplace()
        .insert_certification(educator.id, Some("DEES-2016-0042"), ReviewStatus::Pending)
        .await?;
    let email = test.provider().resend_email(1);
    test.sign_in(admin.id).await?;

    let resp = review_certification(
        State(test.app_state()),
        test.session.clone(),
        Path(certification.id),
        Json(ModerationDecisionDto {
            approved: true,
            reason: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    email.assert();

    Ok(())
}
