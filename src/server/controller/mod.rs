//! HTTP controller endpoints for the Carelink web API.
//!
//! Axum handlers grouped by area. Controllers resolve the signed in user from the session,
//! hand the request to a service and serialize the resulting DTO; errors are returned as
//! [`Error`](crate::server::error::Error), which maps itself to a JSON error response. Every
//! handler carries a `utoipa` path annotation collected by the router into the OpenAPI
//! document.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod booking;
pub mod certification;
pub mod invoice;
pub mod messaging;
pub mod post;
pub mod profile;
pub mod search;
pub mod user;
pub mod util;
