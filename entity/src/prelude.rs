pub use super::app_user::Entity as AppUser;
pub use super::appointment::Entity as Appointment;
pub use super::availability_window::Entity as AvailabilityWindow;
pub use super::blog_post::Entity as BlogPost;
pub use super::certification::Entity as Certification;
pub use super::child::Entity as Child;
pub use super::community_post::Entity as CommunityPost;
pub use super::conversation::Entity as Conversation;
pub use super::educator_profile::Entity as EducatorProfile;
pub use super::family_profile::Entity as FamilyProfile;
pub use super::invoice::Entity as Invoice;
pub use super::message::Entity as Message;
