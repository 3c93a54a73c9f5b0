//! Shared helpers for integration tests.

use carelink::server::{
    config::Config,
    model::{
        app::AppState,
        session::user::{SessionUserId, SESSION_USER_ID_KEY},
    },
};
use carelink_test_utils::{constant::*, TestContext, TestError};

pub trait TestContextExt {
    /// Application state over the test database with every provider on the mock server.
    fn app_state(&self) -> AppState;

    /// Stores `user_id` in the test session as if the user had signed in.
    async fn sign_in(&self, user_id: i32) -> Result<(), TestError>;
}

impl TestContextExt for TestContext {
    fn app_state(&self) -> AppState {
        let server_url = self.server_url();

        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            valkey_url: "redis://127.0.0.1:6379".to_string(),
            app_url: TEST_APP_URL.to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            stripe_secret_key: TEST_STRIPE_SECRET_KEY.to_string(),
            stripe_api_url: server_url.clone(),
            stripe_subscription_price_id: TEST_SUBSCRIPTION_PRICE_ID.to_string(),
            resend_api_key: TEST_RESEND_API_KEY.to_string(),
            resend_api_url: server_url.clone(),
            email_from: TEST_EMAIL_FROM.to_string(),
            supabase_url: server_url,
            supabase_service_key: TEST_SUPABASE_SERVICE_KEY.to_string(),
            supabase_jwt_secret: TEST_JWT_SECRET.to_string(),
            admin_emails: vec![TEST_ADMIN_EMAIL.to_string()],
        };

        AppState::new(self.db.clone(), &config)
    }

    async fn sign_in(&self, user_id: i32) -> Result<(), TestError> {
        self.session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }
}
