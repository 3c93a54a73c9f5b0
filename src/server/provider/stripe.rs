//! Stripe REST client.
//!
//! Stripe takes form-encoded request bodies and answers with JSON. Only the handful of
//! endpoints the marketplace needs are covered: customers, checkout sessions, manual-capture
//! payment intents and subscriptions.

use serde::{de::DeserializeOwned, Deserialize};

use crate::server::{
    error::provider::ProviderError,
    provider::{decode_json, transport},
};

const PROVIDER: &str = "Stripe";
const CURRENCY: &str = "eur";

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
    subscription_price_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    /// `open`, `complete` or `expired`
    pub status: Option<String>,
    pub payment_intent: Option<String>,
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    /// Unix timestamp
    pub current_period_end: Option<i64>,
}

#[derive(Deserialize)]
struct List<T> {
    data: Vec<T>,
}

/// Parameters for a one-off appointment payment that is authorized now and captured later.
pub struct PaymentCheckout<'a> {
    pub customer_id: &'a str,
    pub amount_cents: i64,
    pub description: &'a str,
    pub appointment_id: i32,
    pub success_url: String,
    pub cancel_url: String,
}

impl StripeClient {
    pub fn new(
        api_url: impl Into<String>,
        secret_key: impl Into<String>,
        subscription_price_id: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            secret_key: secret_key.into(),
            subscription_price_id: subscription_price_id.into(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let resp = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.secret_key)
            .query(query)
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        decode_json(PROVIDER, resp).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let resp = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await
            .map_err(transport(PROVIDER))?;

        decode_json(PROVIDER, resp).await
    }

    pub async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, ProviderError> {
        let customers: List<Customer> = self
            .get(
                "/v1/customers",
                &[("email", email.to_string()), ("limit", "1".to_string())],
            )
            .await?;

        Ok(customers.data.into_iter().next())
    }

    pub async fn create_customer(&self, email: &str, name: &str) -> Result<Customer, ProviderError> {
        self.post(
            "/v1/customers",
            &[("email", email.to_string()), ("name", name.to_string())],
        )
        .await
    }

    /// Returns the existing customer for `email`, creating one if Stripe has none.
    pub async fn find_or_create_customer(
        &self,
        email: &str,
        name: &str,
    ) -> Result<Customer, ProviderError> {
        if let Some(customer) = self.find_customer_by_email(email).await? {
            return Ok(customer);
        }

        tracing::debug!(email = %email, "Creating Stripe customer");

        self.create_customer(email, name).await
    }

    /// Creates a checkout session whose payment intent is only authorized; funds are captured
    /// once the educator validates the appointment PIN.
    pub async fn create_payment_checkout(
        &self,
        checkout: PaymentCheckout<'_>,
    ) -> Result<CheckoutSession, ProviderError> {
        let appointment_id = checkout.appointment_id.to_string();

        self.post(
            "/v1/checkout/sessions",
            &[
                ("mode", "payment".to_string()),
                ("customer", checkout.customer_id.to_string()),
                ("line_items[0][quantity]", "1".to_string()),
                ("line_items[0][price_data][currency]", CURRENCY.to_string()),
                (
                    "line_items[0][price_data][unit_amount]",
                    checkout.amount_cents.to_string(),
                ),
                (
                    "line_items[0][price_data][product_data][name]",
                    checkout.description.to_string(),
                ),
                ("payment_intent_data[capture_method]", "manual".to_string()),
                (
                    "payment_intent_data[metadata][appointment_id]",
                    appointment_id.clone(),
                ),
                ("metadata[appointment_id]", appointment_id),
                ("success_url", checkout.success_url),
                ("cancel_url", checkout.cancel_url),
            ],
        )
        .await
    }

    pub async fn create_subscription_checkout(
        &self,
        customer_id: &str,
        success_url: String,
        cancel_url: String,
    ) -> Result<CheckoutSession, ProviderError> {
        self.post(
            "/v1/checkout/sessions",
            &[
                ("mode", "subscription".to_string()),
                ("customer", customer_id.to_string()),
                ("line_items[0][price]", self.subscription_price_id.clone()),
                ("line_items[0][quantity]", "1".to_string()),
                ("success_url", success_url),
                ("cancel_url", cancel_url),
            ],
        )
        .await
    }

    pub async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, ProviderError> {
        self.get(&format!("/v1/checkout/sessions/{}", session_id), &[])
            .await
    }

    pub async fn capture_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        self.post(
            &format!("/v1/payment_intents/{}/capture", payment_intent_id),
            &[],
        )
        .await
    }

    pub async fn cancel_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        self.post(
            &format!("/v1/payment_intents/{}/cancel", payment_intent_id),
            &[],
        )
        .await
    }

    /// Most recent subscription of the customer regardless of its status.
    pub async fn latest_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, ProviderError> {
        let subscriptions: List<Subscription> = self
            .get(
                "/v1/subscriptions",
                &[
                    ("customer", customer_id.to_string()),
                    ("status", "all".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(subscriptions.data.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    fn client(server: &mockito::ServerGuard) -> StripeClient {
        StripeClient::new(server.url(), "sk_test_carelink", "price_premium")
    }

    mod find_or_create_customer {
        use super::*;

        /// Expect the existing customer to be reused without creating a new one
        #[tokio::test]
        async fn reuses_existing_customer() {
            let mut server = Server::new_async().await;
            let list = server
                .mock("GET", "/v1/customers")
                .match_query(Matcher::UrlEncoded(
                    "email".into(),
                    "family@carelink.test".into(),
                ))
                .match_header("authorization", "Bearer sk_test_carelink")
                .with_status(200)
                .with_body(r#"{"data": [{"id": "cus_1", "email": "family@carelink.test"}]}"#)
                .create_async()
                .await;
            let create = server
                .mock("POST", "/v1/customers")
                .expect(0)
                .create_async()
                .await;

            let customer = client(&server)
                .find_or_create_customer("family@carelink.test", "Jane Doe")
                .await
                .unwrap();

            assert_eq!(customer.id, "cus_1");
            list.assert_async().await;
            create.assert_async().await;
        }

        /// Expect a customer to be created when none matches the email
        #[tokio::test]
        async fn creates_missing_customer() {
            let mut server = Server::new_async().await;
            let _list = server
                .mock("GET", "/v1/customers")
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(r#"{"data": []}"#)
                .create_async()
                .await;
            let create = server
                .mock("POST", "/v1/customers")
                .match_body(Matcher::UrlEncoded(
                    "email".into(),
                    "family@carelink.test".into(),
                ))
                .with_status(200)
                .with_body(r#"{"id": "cus_2", "email": "family@carelink.test"}"#)
                .create_async()
                .await;

            let customer = client(&server)
                .find_or_create_customer("family@carelink.test", "Jane Doe")
                .await
                .unwrap();

            assert_eq!(customer.id, "cus_2");
            create.assert_async().await;
        }
    }

    mod create_payment_checkout {
        use super::*;

        /// Expect the checkout session to request manual capture
        #[tokio::test]
        async fn requests_manual_capture() {
            let mut server = Server::new_async().await;
            let mock = server
                .mock("POST", "/v1/checkout/sessions")
                .match_body(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("mode".into(), "payment".into()),
                    Matcher::UrlEncoded(
                        "payment_intent_data[capture_method]".into(),
                        "manual".into(),
                    ),
                    Matcher::UrlEncoded(
                        "line_items[0][price_data][unit_amount]".into(),
                        "4500".into(),
                    ),
                    Matcher::UrlEncoded("metadata[appointment_id]".into(), "7".into()),
                ]))
                .with_status(200)
                .with_body(r#"{"id": "cs_1", "url": "https://checkout.stripe.test/cs_1", "status": "open"}"#)
                .create_async()
                .await;

            let session = client(&server)
                .create_payment_checkout(PaymentCheckout {
                    customer_id: "cus_1",
                    amount_cents: 4500,
                    description: "Session with Alex Martin",
                    appointment_id: 7,
                    success_url: "https://carelink.test/ok".to_string(),
                    cancel_url: "https://carelink.test/cancel".to_string(),
                })
                .await
                .unwrap();

            assert_eq!(session.id, "cs_1");
            assert_eq!(session.status.as_deref(), Some("open"));
            mock.assert_async().await;
        }

        /// Expect Stripe's error message to be surfaced in an Api error
        #[tokio::test]
        async fn surfaces_api_errors() {
            let mut server = Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/checkout/sessions")
                .with_status(400)
                .with_body(r#"{"error": {"message": "No such customer: 'cus_x'"}}"#)
                .create_async()
                .await;

            let result = client(&server)
                .create_payment_checkout(PaymentCheckout {
                    customer_id: "cus_x",
                    amount_cents: 4500,
                    description: "Session",
                    appointment_id: 1,
                    success_url: "https://carelink.test/ok".to_string(),
                    cancel_url: "https://carelink.test/cancel".to_string(),
                })
                .await;

            assert!(matches!(
                result,
                Err(ProviderError::Api { status: 400, ref message, .. }) if message.contains("No such customer")
            ));
        }
    }

    mod latest_subscription {
        use super::*;

        /// Expect None when the customer never subscribed
        #[tokio::test]
        async fn returns_none_without_subscriptions() {
            let mut server = Server::new_async().await;
            let _mock = server
                .mock("GET", "/v1/subscriptions")
                .match_query(Matcher::UrlEncoded("status".into(), "all".into()))
                .with_status(200)
                .with_body(r#"{"data": []}"#)
                .create_async()
                .await;

            let result = client(&server).latest_subscription("cus_1").await.unwrap();

            assert!(result.is_none());
        }
    }
}
