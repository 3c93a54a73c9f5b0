//! Test fixture modules for database records and mock HTTP endpoints.
//!
//! - `auth` - Supabase access token minting
//! - `factory` - in-memory models for unit tests that never touch the database
//! - `marketplace` - children, availability, appointments, content and messaging records
//! - `provider` - Stripe, Resend and Supabase mock endpoints
//! - `user` - accounts with their educator or family profile

pub mod auth;
pub mod factory;
pub mod marketplace;
pub mod provider;
pub mod user;
