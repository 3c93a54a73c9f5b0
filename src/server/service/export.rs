//! Export of everything stored about the calling user.

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    model::user::DataExportDto,
    server::{
        data::{
            appointment::AppointmentRepository, availability::AvailabilityRepository,
            blog_post::BlogPostRepository, certification::CertificationRepository,
            child::ChildRepository, community_post::CommunityPostRepository,
            educator_profile::EducatorProfileRepository,
            family_profile::FamilyProfileRepository, invoice::InvoiceRepository,
            message::MessageRepository,
        },
        error::Error,
        service::{
            auth::user_dto,
            booking::appointment_dto,
            invoice::invoice_dto,
            messaging::message_dto,
            moderation::{
                certification::certification_dto,
                post::{blog_post_dto, community_post_dto},
            },
            profile::{availability_dto, child_dto, educator_profile_dto, family_profile_dto},
        },
    },
};

pub struct ExportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn export(&self, user: &entity::app_user::Model) -> Result<DataExportDto, Error> {
        let mut export = DataExportDto {
            user: user_dto(user.clone()),
            educator_profile: None,
            family_profile: None,
            children: Vec::new(),
            availability: Vec::new(),
            appointments: Vec::new(),
            invoices: Vec::new(),
            certifications: Vec::new(),
            blog_posts: Vec::new(),
            community_posts: Vec::new(),
            messages: Vec::new(),
            exported_at: Utc::now().naive_utc(),
        };

        match user.role {
            UserRole::Educator => {
                if let Some(educator) = EducatorProfileRepository::new(self.db)
                    .find_by_user_id(user.id)
                    .await?
                {
                    export.availability = AvailabilityRepository::new(self.db)
                        .list_for_educator(educator.id)
                        .await?
                        .into_iter()
                        .map(availability_dto)
                        .collect();
                    export.appointments = AppointmentRepository::new(self.db)
                        .list_for_educator(educator.id)
                        .await?
                        .into_iter()
                        .map(|appointment| appointment_dto(appointment, false))
                        .collect();
                    export.invoices = InvoiceRepository::new(self.db)
                        .list_for_educator(educator.id)
                        .await?
                        .into_iter()
                        .map(invoice_dto)
                        .collect();
                    export.certifications = CertificationRepository::new(self.db)
                        .list_for_educator(educator.id)
                        .await?
                        .into_iter()
                        .map(certification_dto)
                        .collect();
                    export.educator_profile = Some(educator_profile_dto(educator));
                }
            }
            UserRole::Family => {
                if let Some(family) = FamilyProfileRepository::new(self.db)
                    .find_by_user_id(user.id)
                    .await?
                {
                    export.children = ChildRepository::new(self.db)
                        .list_for_family(family.id)
                        .await?
                        .into_iter()
                        .map(child_dto)
                        .collect();
                    export.appointments = AppointmentRepository::new(self.db)
                        .list_for_family(family.id)
                        .await?
                        .into_iter()
                        .map(|appointment| appointment_dto(appointment, true))
                        .collect();
                    export.invoices = InvoiceRepository::new(self.db)
                        .list_for_family(family.id)
                        .await?
                        .into_iter()
                        .map(invoice_dto)
                        .collect();
                    export.family_profile = Some(family_profile_dto(family));
                }
            }
            UserRole::Admin => {}
        }

        export.blog_posts = BlogPostRepository::new(self.db)
            .list_for_author(user.id)
            .await?
            .into_iter()
            .map(blog_post_dto)
            .collect();
        export.community_posts = CommunityPostRepository::new(self.db)
            .list_for_author(user.id)
            .await?
            .into_iter()
            .map(community_post_dto)
            .collect();
        export.messages = MessageRepository::new(self.db)
            .list_sent_by(user.id)
            .await?
            .into_iter()
            .map(message_dto)
            .collect();

        tracing::info!(user_id = %user.id, "Exported user data");

        Ok(export)
    }
}
