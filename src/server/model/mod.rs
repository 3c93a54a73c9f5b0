//! Server application models and type definitions.
//!
//! This module contains the shared application state handed to every handler and job and
//! the typed session keys stored in Valkey.

pub mod app;
pub mod session;
