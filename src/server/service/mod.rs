//! Service layer for business logic.
//!
//! Services validate input, enforce role and ownership rules, coordinate repositories with
//! the external providers and convert database models into API DTOs. Services that only
//! touch the database borrow a `DatabaseConnection`; those that also call Stripe, Resend or
//! Supabase borrow the whole `AppState`.

pub mod auth;
pub mod availability;
pub mod billing;
pub mod booking;
pub mod export;
pub mod invoice;
pub mod media;
pub mod messaging;
pub mod moderation;
pub mod notification;
pub mod profile;
pub mod search;
pub mod validate;
