use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        billing::{CheckoutUrlDto, SubscriptionDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::billing::BillingService,
    },
};

pub static BILLING_TAG: &str = "billing";

/// Open a Stripe checkout for the premium educator subscription
#[utoipa::path(
    post,
    path = "/api/billing/subscription/checkout",
    tag = BILLING_TAG,
    responses(
        (status = 200, description = "Redirect the educator to the checkout URL", body = CheckoutUrlDto),
        (status = 403, description = "Educators only", body = ErrorDto),
        (status = 502, description = "Stripe request failed", body = ErrorDto)
    ),
)]
pub async fn subscription_checkout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let checkout = BillingService::new(&state)
        .subscription_checkout(&user)
        .await?;

    Ok((StatusCode::OK, Json(checkout)))
}

/// Refresh the stored subscription status from Stripe
#[utoipa::path(
    post,
    path = "/api/billing/subscription/sync",
    tag = BILLING_TAG,
    responses(
        (status = 200, description = "Current subscription", body = SubscriptionDto),
        (status = 403, description = "Educators only", body = ErrorDto),
        (status = 502, description = "Stripe request failed", body = ErrorDto)
    ),
)]
pub async fn sync_subscription(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let subscription = BillingService::new(&state).sync_subscription(&user).await?;

    Ok((StatusCode::OK, Json(subscription)))
}
