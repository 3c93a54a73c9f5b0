use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, session::user::SessionUserId},
};

/// Retrieves the signed in user from the session and then from the database
///
/// # Arguments
/// - `state`: Application state with the database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(Model)`: The signed in user
/// - `Err(AuthError::UserNotInSession)`: User ID not present in session
/// - `Err(AuthError::UserNotInDatabase)`: User ID exists in session but not in the database
///   (the session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<entity::app_user::Model, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserRepository::new(&state.db).get(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

#[cfg(test)]
mod tests {
    use carelink_test_utils::prelude::*;

    use crate::server::{
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, Error},
        model::session::user::SessionUserId,
        util::test::TestContextExt,
    };

    /// Expect the stored user when the session points at an existing account
    #[tokio::test]
    async fn returns_session_user() -> Result<(), TestError> {
        let test = test_setup_with_user_tables!()?;
        let (user, _) = test.user().insert_family("parent@carelink.test").await?;
        SessionUserId::insert(&test.session, user.id).await.unwrap();

        let result = get_user_from_session(&test.app_state(), &test.session).await;

        assert_eq!(result.unwrap().id, user.id);

        Ok(())
    }

    #[tokio::test]
    async fn fails_without_session_user() -> Result<(), TestError> {
        let test = test_setup_with_user_tables!()?;

        let result = get_user_from_session(&test.app_state(), &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::UserNotInSession))
        ));

        Ok(())
    }

    /// Expect the session to be cleared when its user no longer exists
    #[tokio::test]
    async fn clears_stale_session() -> Result<(), TestError> {
        let test = test_setup_with_user_tables!()?;
        SessionUserId::insert(&test.session, 42).await.unwrap();

        let result = get_user_from_session(&test.app_state(), &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::UserNotInDatabase(42)))
        ));
        assert!(matches!(SessionUserId::get(&test.session).await, Ok(None)));

        Ok(())
    }
}
