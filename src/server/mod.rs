//! Server application core modules.
//!
//! This module contains all server-side functionality for Carelink: HTTP routing and
//! controllers, the booking and moderation services, database repositories, the Stripe,
//! Resend and Supabase clients, and the scheduled expiry job.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod provider;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
