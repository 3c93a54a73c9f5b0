//! Placeholder credentials used to configure provider clients against the mock server.
//!
//! None of these are real secrets.

/// Secret used to sign and verify Supabase access tokens in tests.
pub static TEST_JWT_SECRET: &str = "carelink-test-jwt-secret-with-enough-entropy";

pub static TEST_STRIPE_SECRET_KEY: &str = "sk_test_carelink";

pub static TEST_SUBSCRIPTION_PRICE_ID: &str = "price_test_premium";

pub static TEST_RESEND_API_KEY: &str = "re_test_carelink";

pub static TEST_EMAIL_FROM: &str = "Carelink <noreply@carelink.test>";

pub static TEST_SUPABASE_SERVICE_KEY: &str = "supabase-service-key";

/// Public URL of the web application used for redirects and email links.
pub static TEST_APP_URL: &str = "http://localhost:3000";

/// Email promoted to admin on first sign in.
pub static TEST_ADMIN_EMAIL: &str = "admin@carelink.test";
