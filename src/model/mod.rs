//! Data transfer objects shared by the HTTP API.
//!
//! These types describe request bodies and JSON responses. Database models never cross the
//! API boundary directly; controllers convert them into these DTOs.

pub mod api;
pub mod billing;
pub mod booking;
pub mod content;
pub mod messaging;
pub mod profile;
pub mod user;
