//! Sign in with a Supabase access token, and password changes.

use entity::sea_orm_active_enums::UserRole;

use crate::{
    model::user::UserDto,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        model::app::AppState,
    },
};

const MIN_PASSWORD_CHARS: usize = 8;

/// Checks the password rule: at least 8 characters with an uppercase letter, a lowercase
/// letter and a digit.
pub fn validate_password(password: &str) -> Result<(), Error> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(Error::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_CHARS
        )));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(Error::Validation(
            "Password must contain an uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(Error::Validation(
            "Password must contain a lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(
            "Password must contain a digit".to_string(),
        ));
    }

    Ok(())
}

pub fn user_dto(user: entity::app_user::Model) -> UserDto {
    UserDto {
        id: user.id,
        email: user.email,
        role: user.role,
        avatar_url: user.avatar_url,
        avatar_status: user.avatar_status,
        created_at: user.created_at,
    }
}

pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Verifies a Supabase access token and returns the matching account, creating it on the
    /// first sign in.
    ///
    /// New accounts whose email is listed in `ADMIN_EMAILS` become admins. Everyone else must
    /// pick `family` or `educator`; the role of an existing account never changes.
    ///
    /// # Returns
    /// - `Ok(Model)` - The signed in user
    /// - `Err(AuthError::InvalidAccessToken)` - Token signature, audience or expiry rejected
    /// - `Err(AuthError::RoleRequired)` - New non-admin account without a family/educator role
    pub async fn sign_in(
        &self,
        access_token: &str,
        role: Option<UserRole>,
    ) -> Result<entity::app_user::Model, Error> {
        let identity = self.state.identity.verify_access_token(access_token)?;
        let user_repo = UserRepository::new(&self.state.db);

        if let Some(user) = user_repo
            .find_by_auth_user_id(&identity.auth_user_id)
            .await?
        {
            tracing::debug!(user_id = %user.id, "Existing user signed in");

            return Ok(user);
        }

        let role = if self.state.admin_emails.contains(&identity.email) {
            UserRole::Admin
        } else {
            match role {
                Some(role @ (UserRole::Family | UserRole::Educator)) => role,
                _ => return Err(AuthError::RoleRequired.into()),
            }
        };

        let user = user_repo
            .create(&identity.auth_user_id, &identity.email, role)
            .await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "Created user");

        Ok(user)
    }

    /// Validates the new password locally before forwarding it to Supabase Auth.
    pub async fn reset_password(&self, access_token: &str, password: &str) -> Result<(), Error> {
        validate_password(password)?;

        let identity = self.state.identity.verify_access_token(access_token)?;
        self.state
            .identity
            .update_password(access_token, password)
            .await?;

        tracing::info!(auth_user_id = %identity.auth_user_id, "Password updated");

        Ok(())
    }
}
