//! Utility functions for controller request handling.
//!
//! Session user lookup for protected endpoints and the raw-body upload extractor.

pub mod get_user;
pub mod upload;
