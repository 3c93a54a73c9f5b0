//! HTTP clients for the external services Carelink depends on.
//!
//! Stripe handles payments and subscriptions, Resend delivers transactional email and Supabase
//! provides file storage and identity. Each client is cheap to clone and shares a single
//! `reqwest::Client` connection pool. Base URLs come from [`Config`](crate::server::config::Config)
//! so tests can point every client at a local mock server.

pub mod identity;
pub mod mailer;
pub mod storage;
pub mod stripe;

use serde::de::DeserializeOwned;

use crate::server::error::provider::ProviderError;

/// Returns the response unchanged when it is a 2xx, otherwise converts it into
/// [`ProviderError::Api`] using whatever error message the provider included in the body.
pub(crate) async fn ensure_success(
    provider: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();

    Err(ProviderError::Api {
        provider,
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Checks the status and decodes the JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    provider: &'static str,
    resp: reqwest::Response,
) -> Result<T, ProviderError> {
    ensure_success(provider, resp)
        .await?
        .json::<T>()
        .await
        .map_err(|source| ProviderError::Http { provider, source })
}

/// Maps a transport error for `provider`.
pub(crate) fn transport(provider: &'static str) -> impl FnOnce(reqwest::Error) -> ProviderError {
    move |source| ProviderError::Http { provider, source }
}

/// Pulls a human readable message out of the error payloads used by Stripe
/// (`{"error": {"message": ..}}`), Resend and Supabase (`{"message": ..}` or `{"error": ..}`).
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.chars().take(200).collect();
    };

    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error_description"))
        .or_else(|| value.get("error"))
        .and_then(|message| message.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::error_message;

    #[test]
    fn reads_stripe_error_payload() {
        let body = r#"{"error": {"type": "card_error", "message": "Your card was declined."}}"#;

        assert_eq!(error_message(body), "Your card was declined.");
    }

    #[test]
    fn reads_flat_error_payloads() {
        assert_eq!(error_message(r#"{"message": "Bucket not found"}"#), "Bucket not found");
        assert_eq!(error_message(r#"{"error": "invalid_grant"}"#), "invalid_grant");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(error_message("Bad gateway"), "Bad gateway");
    }
}
