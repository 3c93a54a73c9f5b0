//! Transactional email through the Resend API.

use serde::{Deserialize, Serialize};

use crate::server::{
    error::provider::ProviderError,
    provider::{decode_json, transport},
};

const PROVIDER: &str = "Resend";

#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

/// A rendered email ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl Mailer {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }

    /// Sends the email and returns the Resend message id.
    pub async fn send(&self, email: &Email) -> Result<String, ProviderError> {
        let resp = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [&email.to],
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        let sent: SendEmailResponse = decode_json(PROVIDER, resp).await?;

        tracing::debug!(email_id = %sent.id, to = %email.to, "Email sent");

        Ok(sent.id)
    }
}
