//! SeaORM entity definitions for the Carelink marketplace schema.

pub mod prelude;

pub mod app_user;
pub mod appointment;
pub mod availability_window;
pub mod blog_post;
pub mod certification;
pub mod child;
pub mod community_post;
pub mod conversation;
pub mod educator_profile;
pub mod family_profile;
pub mod invoice;
pub mod message;
pub mod sea_orm_active_enums;
