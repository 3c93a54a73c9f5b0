pub use sea_orm_migration::prelude::*;

mod m20260105_000001_app_user;
mod m20260105_000002_educator_profile;
mod m20260105_000003_family_profile;
mod m20260105_000004_child;
mod m20260105_000005_availability_window;
mod m20260105_000006_appointment;
mod m20260105_000007_certification;
mod m20260105_000008_invoice;
mod m20260105_000009_blog_post;
mod m20260105_000010_community_post;
mod m20260105_000011_messaging;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_app_user::Migration),
            Box::new(m20260105_000002_educator_profile::Migration),
            Box::new(m20260105_000003_family_profile::Migration),
            Box::new(m20260105_000004_child::Migration),
            Box::new(m20260105_000005_availability_window::Migration),
            Box::new(m20260105_000006_appointment::Migration),
            Box::new(m20260105_000007_certification::Migration),
            Box::new(m20260105_000008_invoice::Migration),
            Box::new(m20260105_000009_blog_post::Migration),
            Box::new(m20260105_000010_community_post::Migration),
            Box::new(m20260105_000011_messaging::Migration),
        ]
    }
}
