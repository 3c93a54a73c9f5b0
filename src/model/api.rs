use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// A short-lived URL to a private file
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SignedUrlDto {
    pub url: String,
    /// Seconds until the URL stops working
    pub expires_in: u32,
}

/// Public URL of a freshly uploaded file
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadDto {
    pub url: String,
}

/// Admin decision on an item awaiting moderation.
///
/// A rejection must carry a non-empty `reason`.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ModerationDecisionDto {
    pub approved: bool,
    pub reason: Option<String>,
}
