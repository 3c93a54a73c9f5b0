//! Supabase access token minting.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::{constant::TEST_JWT_SECRET, error::TestError};

/// Mint an HS256 access token shaped like the ones issued by Supabase Auth, signed with
/// [`TEST_JWT_SECRET`] and valid for one hour.
///
/// # Arguments
/// - `auth_user_id` - Supabase user id placed in the `sub` claim
/// - `email` - Email claim
pub fn mint_access_token(auth_user_id: &str, email: &str) -> Result<String, TestError> {
    let claims = json!({
        "sub": auth_user_id,
        "email": email,
        "aud": "authenticated",
        "role": "authenticated",
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    });

    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )?)
}
