//! Test context structure and utilities.
//!
//! The `TestContext` returned by `TestBuilder` holds an in-memory SQLite database, a mockito
//! server standing in for Stripe, Resend and Supabase, and an in-memory session.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test environment created by [`TestBuilder::build`](crate::TestBuilder::build).
///
/// ```ignore
/// let mut test = TestBuilder::new().with_marketplace_tables().build().await?;
///
/// let (user, educator) = test.user().insert_educator("educator@carelink.test").await?;
/// let _mock = test.provider().stripe_capture("pi_test", 1);
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,
    /// Mock HTTP server for every external provider
    pub server: ServerGuard,

    /// Mocks created by the builder, kept alive for the duration of the test
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Create a new test context with an empty database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            session,
            server,
            mocks: Vec::new(),
        })
    }

    /// Base URL of the mock provider server; use it as the Stripe, Resend and Supabase URL.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Executes CREATE TABLE statements in order.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints registered through the builder were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
