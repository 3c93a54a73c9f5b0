use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        booking::AvailableSlotsDto,
        profile::EducatorSearchResultDto,
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{
            availability::AvailabilityService,
            search::{SearchQuery, SearchService},
        },
    },
};

pub static SEARCH_TAG: &str = "search";

#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive city match
    pub city: Option<String>,
    /// Profession code, see the profession lookup table
    pub profession: Option<String>,
    pub max_rate_cents: Option<i64>,
    /// One based page number
    pub page: Option<u64>,
    /// Results per page, clamped to 1..=50
    pub per_page: Option<u64>,
}

#[derive(Deserialize, IntoParams)]
pub struct SlotsParams {
    pub date: NaiveDate,
}

/// Search approved educators
///
/// Active subscribers are listed first, then the most recently created profiles.
#[utoipa::path(
    get,
    path = "/api/educators",
    tag = SEARCH_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching educators", body = EducatorSearchResultDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_educators(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Error> {
    let results = SearchService::new(&state.db)
        .search(SearchQuery {
            city: params.city,
            profession: params.profession,
            max_rate_cents: params.max_rate_cents,
            page: params.page,
            per_page: params.per_page,
        })
        .await?;

    Ok((StatusCode::OK, Json(results)))
}

/// Bookable 30 minute start times of an educator on a date
#[utoipa::path(
    get,
    path = "/api/educators/{educator_id}/slots",
    tag = SEARCH_TAG,
    params(
        ("educator_id" = i32, Path, description = "Educator profile ID"),
        SlotsParams
    ),
    responses(
        (status = 200, description = "Available start times", body = AvailableSlotsDto),
        (status = 400, description = "Missing or malformed date", body = ErrorDto),
        (status = 404, description = "No approved educator with this ID", body = ErrorDto)
    ),
)]
pub async fn get_available_slots(
    State(state): State<AppState>,
    Path(educator_id): Path<i32>,
    Query(params): Query<SlotsParams>,
) -> Result<impl IntoResponse, Error> {
    let slots = AvailabilityService::new(&state.db)
        .available_slots(educator_id, params.date)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AvailableSlotsDto {
            educator_id,
            date: params.date,
            slots,
        }),
    ))
}
