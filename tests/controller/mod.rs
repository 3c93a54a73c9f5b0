//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors and the resulting response status is
//! checked, the same way axum would render it.

mod admin;
mod auth;
mod booking;
mod messaging;
mod profile;
mod search;
mod user;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use carelink_test_utils::prelude::*;
use chrono::{Duration, NaiveTime, Utc};

use crate::util::TestContextExt;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
