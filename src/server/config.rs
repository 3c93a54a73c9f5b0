//! Application configuration loaded from environment variables.

use crate::server::error::config::ConfigError;

static DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";
static DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
static DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration for the Carelink server.
///
/// Every field without a default must be present in the environment (a `.env` file is loaded
/// by `main` before this is read).
pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    /// Public base URL of the web application, used for checkout redirects and email links
    pub app_url: String,
    pub server_addr: String,
    pub stripe_secret_key: String,
    pub stripe_api_url: String,
    pub stripe_subscription_price_id: String,
    pub resend_api_key: String,
    pub resend_api_url: String,
    pub email_from: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub supabase_jwt_secret: String,
    /// Emails granted the admin role when their account is first created
    pub admin_emails: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            app_url: url("APP_URL", required("APP_URL")?)?,
            server_addr: optional("SERVER_ADDR", DEFAULT_SERVER_ADDR),
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            stripe_api_url: url(
                "STRIPE_API_URL",
                optional("STRIPE_API_URL", DEFAULT_STRIPE_API_URL),
            )?,
            stripe_subscription_price_id: required("STRIPE_SUBSCRIPTION_PRICE_ID")?,
            resend_api_key: required("RESEND_API_KEY")?,
            resend_api_url: url(
                "RESEND_API_URL",
                optional("RESEND_API_URL", DEFAULT_RESEND_API_URL),
            )?,
            email_from: required("EMAIL_FROM")?,
            supabase_url: url("SUPABASE_URL", required("SUPABASE_URL")?)?,
            supabase_service_key: required("SUPABASE_SERVICE_KEY")?,
            supabase_jwt_secret: required("SUPABASE_JWT_SECRET")?,
            admin_emails: parse_admin_emails(&optional("ADMIN_EMAILS", "")),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(var.to_string())),
    }
}

fn optional(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Validates that `value` is an http(s) URL and strips any trailing slash.
fn url(var: &str, value: String) -> Result<String, ConfigError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got {:?}", value),
        });
    }

    Ok(value.trim_end_matches('/').to_string())
}

fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}
