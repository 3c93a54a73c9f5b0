use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    provider::{
        identity::IdentityClient, mailer::Mailer, storage::StorageClient, stripe::StripeClient,
    },
};

/// State shared by every request handler and scheduled job.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub stripe: StripeClient,
    pub mailer: Mailer,
    pub storage: StorageClient,
    pub identity: IdentityClient,
    /// Public base URL of the web application
    pub app_url: String,
    /// Lowercased emails promoted to admin on first sign in
    pub admin_emails: Vec<String>,
}

impl AppState {
    /// Builds the provider clients described by `config` around an existing database connection.
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            stripe: StripeClient::new(
                &config.stripe_api_url,
                &config.stripe_secret_key,
                &config.stripe_subscription_price_id,
            ),
            mailer: Mailer::new(
                &config.resend_api_url,
                &config.resend_api_key,
                &config.email_from,
            ),
            storage: StorageClient::new(&config.supabase_url, &config.supabase_service_key),
            identity: IdentityClient::new(
                &config.supabase_url,
                &config.supabase_service_key,
                &config.supabase_jwt_secret,
            ),
            app_url: config.app_url.clone(),
            admin_emails: config.admin_emails.clone(),
        }
    }
}
