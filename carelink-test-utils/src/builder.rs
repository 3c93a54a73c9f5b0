//! Declarative test builder.
//!
//! Configuration methods queue work that is executed in the final `build()` call: tables are
//! created first, then mock endpoints are registered on the provider server.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, setup::marketplace_tables, setup::user_tables, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    include_marketplace_tables: bool,
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    email_endpoints: Vec<usize>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_tables: false,
            include_marketplace_tables: false,
            mock_builders: Vec::new(),
            email_endpoints: Vec::new(),
        }
    }

    /// Add the account tables: AppUser, EducatorProfile and FamilyProfile.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Add every table of the marketplace schema in foreign key order.
    pub fn with_marketplace_tables(mut self) -> Self {
        self.include_marketplace_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use carelink_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), carelink_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(AppUser)
    ///     .with_table(EducatorProfile)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Expect `expected_requests` transactional emails to be posted to Resend.
    pub fn with_email_endpoint(mut self, expected_requests: usize) -> Self {
        self.email_endpoints.push(expected_requests);
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_marketplace_tables {
            all_tables.extend(marketplace_tables());
        } else if self.include_user_tables {
            all_tables.extend(user_tables());
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // Custom endpoints are created first so tests can stack several mocks on one path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for expected in self.email_endpoints {
            mocks.push(setup.provider().resend_email(expected));
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_marketplace_tables() {
        let result = TestBuilder::new().with_marketplace_tables().build().await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn chains_methods() {
        let result = TestBuilder::new()
            .with_user_tables()
            .with_table(entity::prelude::Child)
            .with_email_endpoint(0)
            .build()
            .await;

        assert!(result.is_ok());
    }
}
