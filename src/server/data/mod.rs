//! Data access layer repositories.
//!
//! One repository per table, each borrowing any [`sea_orm::ConnectionTrait`] so the same code
//! runs against a pooled connection or inside a transaction.

pub mod appointment;
pub mod availability;
pub mod blog_post;
pub mod certification;
pub mod child;
pub mod community_post;
pub mod conversation;
pub mod educator_profile;
pub mod family_profile;
pub mod invoice;
pub mod message;
pub mod user;
