//! Table sets and setup macros.

use sea_orm::{sea_query::TableCreateStatement, Schema};

/// Account tables in foreign key order.
pub fn user_tables() -> Vec<TableCreateStatement> {
    let schema = Schema::new(sea_orm::DbBackend::Sqlite);

    vec![
        schema.create_table_from_entity(entity::prelude::AppUser),
        schema.create_table_from_entity(entity::prelude::EducatorProfile),
        schema.create_table_from_entity(entity::prelude::FamilyProfile),
    ]
}

/// Every marketplace table in foreign key order.
pub fn marketplace_tables() -> Vec<TableCreateStatement> {
    let schema = Schema::new(sea_orm::DbBackend::Sqlite);

    let mut tables = user_tables();
    tables.extend(vec![
        schema.create_table_from_entity(entity::prelude::Child),
        schema.create_table_from_entity(entity::prelude::AvailabilityWindow),
        schema.create_table_from_entity(entity::prelude::Appointment),
        schema.create_table_from_entity(entity::prelude::Certification),
        schema.create_table_from_entity(entity::prelude::Invoice),
        schema.create_table_from_entity(entity::prelude::BlogPost),
        schema.create_table_from_entity(entity::prelude::CommunityPost),
        schema.create_table_from_entity(entity::prelude::Conversation),
        schema.create_table_from_entity(entity::prelude::Message),
    ]);

    tables
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestBuilder::new().build().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            $(.with_table($entity))+
            .build()
            .await
    }};
}

#[macro_export]
macro_rules! test_setup_with_user_tables {
    () => {{
        $crate::TestBuilder::new().with_user_tables().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            .with_user_tables()
            $(.with_table($entity))+
            .build()
            .await
    }};
}

#[macro_export]
macro_rules! test_setup_with_marketplace_tables {
    () => {{
        $crate::TestBuilder::new().with_marketplace_tables().build().await
    }};
}
