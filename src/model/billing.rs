use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::SubscriptionStatus;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CheckoutUrlDto {
    pub checkout_url: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubscriptionDto {
    #[schema(value_type = String)]
    pub status: SubscriptionStatus,
    pub current_period_end: Option<NaiveDateTime>,
}
