use super::*;

use carelink::{
    model::user::{PasswordResetDto, SessionLoginDto},
    server::{
        controller::auth::{create_session, get_user, logout, reset_password},
        model::session::user::SessionUserId,
    },
};
use entity::sea_orm_active_enums::UserRole;

/// Expect a first sign in with a role to create the account and store it in the session
#[tokio::test]
async fn creates_account_on_first_session() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let access_token = mint_access_token("auth-new-family", "parent@carelink.test")?;

    let resp = create_session(
        State(test.app_state()),
        test.session.clone(),
        Json(SessionLoginDto {
            access_token,
            role: Some(UserRole::Family),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_some());

    Ok(())
}

/// Expect 400 when a new account does not pick a role
#[tokio::test]
async fn rejects_new_account_without_role() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let access_token = mint_access_token("auth-new", "someone@carelink.test")?;

    let resp = create_session(
        State(test.app_state()),
        test.session.clone(),
        Json(SessionLoginDto {
            access_token,
            role: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
async fn rejects_forged_access_token() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let resp = create_session(
        State(test.app_state()),
        test.session.clone(),
        Json(SessionLoginDto {
            access_token: "not-a-jwt".to_string(),
            role: Some(UserRole::Family),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn returns_signed_in_user() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (user, _) = test.user().insert_family("parent@carelink.test").await?;
    test.sign_in(user.id).await?;

    let resp = get_user(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn returns_unauthorized_without_session() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let resp = get_user(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 404 and a cleared session when the session user was deleted
#[tokio::test]
async fn returns_not_found_for_stale_session() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    test.sign_in(99).await?;

    let resp = get_user(State(test.app_state()), test.session.clone())
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    test.sign_in(1).await?;

    let resp = logout(test.session.clone()).await.into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect logout to succeed even when nobody is signed in
#[tokio::test]
async fn logout_without_session_succeeds() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let resp = logout(test.session.clone()).await.into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect a weak password to be refused before Supabase is called
#[tokio::test]
async fn rejects_weak_password() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!()?;
    let update = test.provider().supabase_update_user(200, 0);
    let access_token = mint_access_token("auth-user", "parent@carelink.test")?;

    let resp = reset_password(
        State(test.app_state()),
        Json(PasswordResetDto {
            access_token,
            password: "password".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    update.assert();

    Ok(())
}

#[tokio::test]
async fn forwards_strong_password() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!()?;
    let update = test.provider().supabase_update_user(200, 1);
    let access_token = mint_access_token("auth-user", "parent@carelink.test")?;

    let resp = reset_password(
        State(test.app_state()),
        Json(PasswordResetDto {
            access_token,
            password: "Sunflower42".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    update.assert();

    Ok(())
}
