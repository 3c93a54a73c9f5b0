//! Shared test harness for the Carelink workspace.
//!
//! Tests are set up in two phases: a [`TestBuilder`] (or one of the setup macros) declares the
//! tables and mock endpoints a test needs, then the resulting [`TestContext`] exposes the
//! in-memory database, the mock provider server, a session and fixture helpers.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::{auth::mint_access_token, factory, marketplace::AppointmentSeed},
        test_setup_with_marketplace_tables, test_setup_with_tables, test_setup_with_user_tables,
        TestBuilder, TestContext, TestError,
    };
}
