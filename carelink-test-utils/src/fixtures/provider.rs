//! Mock endpoints for Stripe, Resend and Supabase.
//!
//! Every provider client is pointed at the same mockito server, so the paths below mirror the
//! real APIs. Each method returns the created `Mock`; keep it alive until the end of the test
//! and call `assert()` to check the expected request count.

use mockito::{Matcher, Mock};
use serde_json::json;

use crate::TestContext;

impl TestContext {
    pub fn provider<'a>(&'a mut self) -> ProviderMocks<'a> {
        ProviderMocks { setup: self }
    }
}

pub struct ProviderMocks<'a> {
    setup: &'a mut TestContext,
}

impl<'a> ProviderMocks<'a> {
    fn json_mock(
        &mut self,
        method: &str,
        path: impl Into<Matcher>,
        status: usize,
        body: serde_json::Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// `GET /v1/customers` answering with `customer_id` if given, otherwise an empty list.
    pub fn stripe_customer_search(
        &mut self,
        customer_id: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        let data = match customer_id {
            Some(id) => json!([{ "id": id, "email": "customer@carelink.test" }]),
            None => json!([]),
        };

        self.json_mock(
            "GET",
            "/v1/customers",
            200,
            json!({ "object": "list", "data": data }),
            expected_requests,
        )
    }

    pub fn stripe_create_customer(&mut self, customer_id: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            "/v1/customers",
            200,
            json!({ "id": customer_id, "email": "customer@carelink.test" }),
            expected_requests,
        )
    }

    /// `POST /v1/checkout/sessions` returning an open session with a hosted checkout URL.
    pub fn stripe_create_checkout(&mut self, session_id: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            "/v1/checkout/sessions",
            200,
            json!({
                "id": session_id,
                "url": format!("https://checkout.stripe.test/{}", session_id),
                "status": "open",
                "payment_intent": null,
            }),
            expected_requests,
        )
    }

    /// `POST /v1/checkout/sessions` failing with a Stripe API error.
    pub fn stripe_checkout_failure(&mut self, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            "/v1/checkout/sessions",
            400,
            json!({ "error": { "type": "invalid_request_error", "message": "Invalid amount" } }),
            expected_requests,
        )
    }

    pub fn stripe_retrieve_checkout(
        &mut self,
        session_id: &str,
        status: &str,
        payment_intent: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        self.json_mock(
            "GET",
            format!("/v1/checkout/sessions/{}", session_id).as_str(),
            200,
            json!({
                "id": session_id,
                "url": null,
                "status": status,
                "payment_intent": payment_intent,
            }),
            expected_requests,
        )
    }

    pub fn stripe_capture(&mut self, payment_intent: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            format!("/v1/payment_intents/{}/capture", payment_intent).as_str(),
            200,
            json!({ "id": payment_intent, "status": "succeeded" }),
            expected_requests,
        )
    }

    pub fn stripe_cancel(&mut self, payment_intent: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            format!("/v1/payment_intents/{}/cancel", payment_intent).as_str(),
            200,
            json!({ "id": payment_intent, "status": "canceled" }),
            expected_requests,
        )
    }

    /// `GET /v1/subscriptions` answering with one subscription in `status`, if given.
    pub fn stripe_subscriptions(
        &mut self,
        status: Option<&str>,
        current_period_end: i64,
        expected_requests: usize,
    ) -> Mock {
        let data = match status {
            Some(status) => json!([{
                "id": "sub_test",
                "status": status,
                "current_period_end": current_period_end,
            }]),
            None => json!([]),
        };

        self.json_mock(
            "GET",
            "/v1/subscriptions",
            200,
            json!({ "object": "list", "data": data }),
            expected_requests,
        )
    }

    /// `POST /emails` on Resend.
    pub fn resend_email(&mut self, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            "/emails",
            200,
            json!({ "id": "email_test" }),
            expected_requests,
        )
    }

    /// Any object upload to `bucket`.
    pub fn storage_upload(&mut self, bucket: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            Matcher::Regex(format!(r"^/storage/v1/object/{}/.+$", bucket)),
            200,
            json!({ "Key": bucket }),
            expected_requests,
        )
    }

    /// `DELETE /storage/v1/object/{bucket}` removing a list of objects.
    pub fn storage_remove(&mut self, bucket: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "DELETE",
            format!("/storage/v1/object/{}", bucket).as_str(),
            200,
            json!([]),
            expected_requests,
        )
    }

    /// Any signed URL request in `bucket`.
    pub fn storage_sign(&mut self, bucket: &str, expected_requests: usize) -> Mock {
        self.json_mock(
            "POST",
            Matcher::Regex(format!(r"^/storage/v1/object/sign/{}/.+$", bucket)),
            200,
            json!({ "signedURL": format!("/object/sign/{}/file?token=test", bucket) }),
            expected_requests,
        )
    }

    /// `PUT /auth/v1/user` on Supabase Auth.
    pub fn supabase_update_user(&mut self, status: usize, expected_requests: usize) -> Mock {
        self.json_mock(
            "PUT",
            "/auth/v1/user",
            status,
            json!({ "id": "auth-user" }),
            expected_requests,
        )
    }
}
