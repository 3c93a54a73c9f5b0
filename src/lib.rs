//! Carelink: a marketplace connecting families with special-needs-care educators.

pub mod model;
pub mod server;
