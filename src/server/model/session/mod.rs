//! Session data models and utilities.
//!
//! Type-safe wrappers for the values Carelink keeps in the tower-sessions store (Valkey in
//! production, in-memory during tests).

pub mod user;
