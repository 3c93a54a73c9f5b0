//! Supabase Auth integration.
//!
//! Users sign in against Supabase directly from the browser. The resulting access token is an
//! HS256 JWT signed with the project's JWT secret, which the server verifies locally before
//! opening its own session.

use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;

use crate::server::{
    error::{auth::AuthError, provider::ProviderError},
    provider::{ensure_success, transport},
};

const PROVIDER: &str = "Supabase Auth";
const AUDIENCE: &str = "authenticated";

#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    supabase_url: String,
    service_key: String,
    decoding_key: DecodingKey,
}

#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    email: Option<String>,
}

/// Identity asserted by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub auth_user_id: String,
    pub email: String,
}

impl IdentityClient {
    pub fn new(
        supabase_url: impl Into<String>,
        service_key: impl Into<String>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            supabase_url: supabase_url.into(),
            service_key: service_key.into(),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Validates signature, expiry and audience of a Supabase access token.
    pub fn verify_access_token(&self, access_token: &str) -> Result<VerifiedIdentity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);

        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(access_token, &self.decoding_key, &validation)?
                .claims;

        let email = claims
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| {
                AuthError::InvalidAccessToken(ErrorKind::MissingRequiredClaim("email".into()).into())
            })?;

        Ok(VerifiedIdentity {
            auth_user_id: claims.sub,
            email: email.to_lowercase(),
        })
    }

    /// Sets a new password for the user owning `access_token`.
    pub async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        let resp = self
            .http
            .put(format!("{}/auth/v1/user", self.supabase_url))
            .bearer_auth(access_token)
            .header("apikey", &self.service_key)
            .json(&json!({ "password": password }))
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        ensure_success(PROVIDER, resp).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "super-secret-jwt-token-for-tests";

    fn token(claims: serde_json::Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(aud: &str, exp_offset: Duration) -> serde_json::Value {
        json!({
            "sub": "4b8b9c1e-0000-4000-8000-000000000001",
            "email": "Parent@Carelink.test",
            "aud": aud,
            "role": "authenticated",
            "exp": (Utc::now() + exp_offset).timestamp(),
        })
    }

    fn client() -> IdentityClient {
        IdentityClient::new("http://127.0.0.1:1", "service", SECRET)
    }

    /// Expect the subject and lowercased email from a valid token
    #[test]
    fn accepts_valid_token() {
        let access_token = token(claims("authenticated", Duration::hours(1)), SECRET);

        let identity = client().verify_access_token(&access_token).unwrap();

        assert_eq!(identity.auth_user_id, "4b8b9c1e-0000-4000-8000-000000000001");
        assert_eq!(identity.email, "parent@carelink.test");
    }

    #[test]
    fn rejects_wrong_signature() {
        let access_token = token(claims("authenticated", Duration::hours(1)), "other-secret");

        let result = client().verify_access_token(&access_token);

        assert!(matches!(result, Err(AuthError::InvalidAccessToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let access_token = token(claims("authenticated", -Duration::hours(2)), SECRET);

        let result = client().verify_access_token(&access_token);

        assert!(matches!(result, Err(AuthError::InvalidAccessToken(_))));
    }

    #[test]
    fn rejects_foreign_audience() {
        let access_token = token(claims("anon", Duration::hours(1)), SECRET);

        let result = client().verify_access_token(&access_token);

        assert!(matches!(result, Err(AuthError::InvalidAccessToken(_))));
    }
}
