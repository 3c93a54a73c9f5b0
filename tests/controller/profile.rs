use super::*;

use carelink::{
    model::profile::{EducatorProfileInput, FamilyProfileInput},
    server::controller::profile::{create_educator_profile, create_family_profile},
};
use entity::sea_orm_active_enums::UserRole;

fn family_input() -> FamilyProfileInput {
    FamilyProfileInput {
        first_name: "Camille".to_string(),
        last_name: "Durand".to_string(),
        phone: None,
        address: Some("12 rue Garibaldi".to_string()),
        city: "Lyon".to_string(),
        postal_code: "69006".to_string(),
    }
}

#[tokio::test]
async fn family_creates_profile() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let user = test
        .user()
        .insert_user("family@carelink.test", UserRole::Family)
        .await?;
    test.sign_in(user.id).await?;

    let resp = create_family_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(family_input()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);

    Ok(())
}

/// Expect 400 when the account already has a family profile
#[tokio::test]
async fn rejects_second_family_profile() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (user, _) = test.user().insert_family("family@carelink.test").await?;
    test.sign_in(user.id).await?;

    let resp = create_family_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(family_input()),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn family_cannot_create_educator_profile() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let (user, _) = test.user().insert_family("family@carelink.test").await?;
    test.sign_in(user.id).await?;

    let resp = create_educator_profile(
        State(test.app_state()),
        test.session.clone(),
        Json(EducatorProfileInput {
            first_name: "Camille".to_string(),
            last_name: "Durand".to_string(),
            phone: None,
            city: "Lyon".to_string(),
            postal_code: "69006".to_string(),
            bio: "Parent".to_string(),
            profession_code: "educateur_specialise".to_string(),
            hourly_rate_cents: 5000,
            years_experience: 1,
            siret_number: None,
            rpps_number: None,
            sap_number: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
