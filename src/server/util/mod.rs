//! Utility functions and helpers for server operations.
//!
//! Calendar arithmetic for availability and PINs, the profession table and blog post slugs.

pub mod profession;
pub mod slug;
pub mod time;

#[cfg(test)]
pub mod test;
