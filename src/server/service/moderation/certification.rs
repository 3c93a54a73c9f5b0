//! Educator certifications and their review.

use entity::sea_orm_active_enums::ReviewStatus;

use crate::{
    model::{
        api::{ModerationDecisionDto, SignedUrlDto},
        content::{CertificationDto, CertificationInput, DuplicateDiplomaDto},
    },
    server::{
        data::{
            certification::CertificationRepository, educator_profile::EducatorProfileRepository,
        },
        error::{moderation::ModerationError, Error},
        model::app::AppState,
        provider::storage::Bucket,
        service::{
            media::{Upload, DOCUMENT_UPLOAD},
            moderation::{require_admin, Decision},
            notification,
            profile::require_educator,
            validate::{optional_text, required_text},
        },
    },
};

const DOCUMENT_URL_TTL_SECS: u32 = 300;

pub fn certification_dto(certification: entity::certification::Model) -> CertificationDto {
    CertificationDto {
        id: certification.id,
        educator_id: certification.educator_id,
        title: certification.title,
        issuer: certification.issuer,
        diploma_number: certification.diploma_number,
        obtained_on: certification.obtained_on,
        has_document: certification.document_path.is_some(),
        status: certification.status,
        rejection_reason: certification.rejection_reason,
        reviewed_at: certification.reviewed_at,
    }
}

fn clean_input(input: CertificationInput) -> Result<CertificationInput, Error> {
    Ok(CertificationInput {
        title: required_text("Title", &input.title)?,
        issuer: required_text("Issuer", &input.issuer)?,
        diploma_number: optional_text(input.diploma_number),
        obtained_on: input.obtained_on,
    })
}

pub struct CertificationService<'a> {
    state: &'a AppState,
}

impl<'a> CertificationService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create(
        &self,
        user: &entity::app_user::Model,
        input: CertificationInput,
    ) -> Result<CertificationDto, Error> {
        let educator = require_educator(&self.state.db, user).await?;
        let input = clean_input(input)?;

        let certification = CertificationRepository::new(&self.state.db)
            .create(educator.id, input)
            .await?;

        tracing::info!(
            certification_id = %certification.id,
            educator_id = %educator.id,
            "Certification submitted"
        );

        Ok(certification_dto(certification))
    }

    /// Applies an edit; the certification goes back to review.
    pub async fn update(
        &self,
        user: &entity::app_user::Model,
        certification_id: i32,
        input: CertificationInput,
    ) -> Result<CertificationDto, Error> {
        let certification = self.get_own(user, certification_id).await?;
        let input = clean_input(input)?;

        let certification = CertificationRepository::new(&self.state.db)
            .update(certification, input)
            .await?;

        Ok(certification_dto(certification))
    }

    pub async fn list_own(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<CertificationDto>, Error> {
        let educator = require_educator(&self.state.db, user).await?;
        let certifications = CertificationRepository::new(&self.state.db)
            .list_for_educator(educator.id)
            .await?;

        Ok(certifications.into_iter().map(certification_dto).collect())
    }

    /// Stores a scan of the diploma in the private certification bucket.
    pub async fn upload_document(
        &self,
        user: &entity::app_user::Model,
        certification_id: i32,
        upload: Upload,
    ) -> Result<CertificationDto, Error> {
        let certification = self.get_own(user, certification_id).await?;
        let extension = DOCUMENT_UPLOAD.check(&upload)?;

        let path = format!(
            "{}/{}.{}",
            certification.educator_id, certification.id, extension
        );
        self.state
            .storage
            .upload(
                Bucket::Certifications,
                &path,
                &upload.content_type,
                upload.bytes,
            )
            .await?;

        let certification = CertificationRepository::new(&self.state.db)
            .set_document(certification, path)
            .await?;

        Ok(certification_dto(certification))
    }

    /// Short-lived link to the document, for its educator or an admin.
    pub async fn document_url(
        &self,
        user: &entity::app_user::Model,
        certification_id: i32,
    ) -> Result<SignedUrlDto, Error> {
        let certification = if require_admin(user).is_ok() {
            CertificationRepository::new(&self.state.db)
                .get(certification_id)
                .await?
                .ok_or_else(|| Error::NotFound(format!("Certification {}", certification_id)))?
        } else {
            self.get_own(user, certification_id).await?
        };

        let path = certification
            .document_path
            .ok_or_else(|| Error::NotFound("Certification document".to_string()))?;
        let url = self
            .state
            .storage
            .create_signed_url(Bucket::Certifications, &path, DOCUMENT_URL_TTL_SECS)
            .await?;

        Ok(SignedUrlDto {
            url,
            expires_in: DOCUMENT_URL_TTL_SECS,
        })
    }

    pub async fn list_pending(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<CertificationDto>, Error> {
        require_admin(user)?;

        let certifications = CertificationRepository::new(&self.state.db)
            .list_pending()
            .await?;

        Ok(certifications.into_iter().map(certification_dto).collect())
    }

    /// Approves or rejects a pending certification and emails the educator.
    ///
    /// The email is best effort.
    pub async fn review(
        &self,
        user: &entity::app_user::Model,
        certification_id: i32,
        decision: ModerationDecisionDto,
    ) -> Result<CertificationDto, Error> {
        require_admin(user)?;
        let decision = Decision::try_from(decision)?;

        let repo = CertificationRepository::new(&self.state.db);
        let certification = repo
            .get(certification_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Certification {}", certification_id)))?;

        if certification.status != ReviewStatus::Pending {
            return Err(ModerationError::NotPending {
                item: "Certification",
            }
            .into());
        }

        let certification = repo
            .review(
                certification,
                decision.review_status(),
                decision.reason().map(str::to_string),
            )
            .await?;

        tracing::info!(
            certification_id = %certification.id,
            status = ?certification.status,
            "Certification reviewed"
        );

        self.notify_educator(&certification, &decision).await;

        Ok(certification_dto(certification))
    }

    async fn notify_educator(
        &self,
        certification: &entity::certification::Model,
        decision: &Decision,
    ) {
        let educator_user = match EducatorProfileRepository::new(&self.state.db)
            .get_with_user(certification.educator_id)
            .await
        {
            Ok(found) => found.and_then(|(_, user)| user),
            Err(err) => {
                tracing::warn!(
                    certification_id = %certification.id,
                    "Failed to load educator for review email: {}",
                    err
                );
                return;
            }
        };

        if let Some(educator_user) = educator_user {
            notification::send_best_effort(
                &self.state.mailer,
                notification::certification_reviewed(
                    &educator_user.email,
                    &certification.title,
                    *decision == Decision::Approve,
                    decision.reason(),
                    &self.state.app_url,
                ),
            )
            .await;
        }
    }

    /// Diploma numbers declared by more than one certification.
    pub async fn duplicate_diplomas(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<DuplicateDiplomaDto>, Error> {
        require_admin(user)?;

        let duplicates = CertificationRepository::new(&self.state.db)
            .find_duplicate_diplomas()
            .await?;

        Ok(duplicates
            .into_iter()
            .map(|(diploma_number, certifications)| {
                let mut educator_ids: Vec<i32> = certifications
                    .iter()
                    .map(|certification| certification.educator_id)
                    .collect();
                educator_ids.sort_unstable();
                educator_ids.dedup();

                DuplicateDiplomaDto {
                    diploma_number,
                    certification_ids: certifications
                        .iter()
                        .map(|certification| certification.id)
                        .collect(),
                    educator_ids,
                }
            })
            .collect())
    }

    async fn get_own(
        &self,
        user: &entity::app_user::Model,
        certification_id: i32,
    ) -> Result<entity::certification::Model, Error> {
        let educator = require_educator(&self.state.db, user).await?;

        CertificationRepository::new(&self.state.db)
            .get(certification_id)
            .await?
            .filter(|certification| certification.educator_id == educator.id)
            .ok_or_else(|| Error::NotFound(format!("Certification {}", certification_id)))
    }
}

#[cfg(test)]
mod tests {
    mod review {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::{
            model::api::ModerationDecisionDto,
            server::{
                data::certification::CertificationRepository,
                error::{moderation::ModerationError, Error},
                service::moderation::certification::CertificationService,
                util::test::TestContextExt,
            },
        };

        fn decision(approved: bool, reason: Option<&str>) -> ModerationDecisionDto {
            ModerationDecisionDto {
                approved,
                reason: reason.map(str::to_string),
            }
        }

        /// Expect a rejection to store the reason and email the educator
        #[tokio::test]
        async fn rejects_with_reason() -> Result<(), TestError> {
            let mut test = test_setup_with_marketplace_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, None, ReviewStatus::Pending)
                .await?;
            let email = test.provider().resend_email(1);

            let state = test.app_state();
            let dto = CertificationService::new(&state)
                .review(
                    &admin,
                    certification.id,
                    decision(false, Some(" Document unreadable ")),
                )
                .await
                .unwrap();

            assert_eq!(dto.status, ReviewStatus::Rejected);
            assert_eq!(dto.rejection_reason.as_deref(), Some("Document unreadable"));
            assert!(dto.reviewed_at.is_some());
            email.assert();

            Ok(())
        }

        /// Expect re-approval after an edit to clear the earlier rejection reason
        #[tokio::test]
        async fn approval_clears_previous_reason() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, None, ReviewStatus::Pending)
                .await?;
            let repo = CertificationRepository::new(&test.db);
            let rejected = repo
                .review(
                    certification,
                    ReviewStatus::Rejected,
                    Some("Expired".to_string()),
                )
                .await?;
            let input = crate::model::content::CertificationInput {
                title: rejected.title.clone(),
                issuer: rejected.issuer.clone(),
                diploma_number: None,
                obtained_on: None,
            };
            let resubmitted = repo.update(rejected, input).await?;

            let state = test.app_state();
            let dto = CertificationService::new(&state)
                .review(&admin, resubmitted.id, decision(true, None))
                .await
                .unwrap();

            assert_eq!(dto.status, ReviewStatus::Approved);
            assert_eq!(dto.rejection_reason, None);

            Ok(())
        }

        #[tokio::test]
        async fn requires_reason_for_rejection() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, None, ReviewStatus::Pending)
                .await?;

            let state = test.app_state();
            let result = CertificationService::new(&state)
                .review(&admin, certification.id, decision(false, Some("   ")))
                .await;

            assert!(matches!(
                result,
                Err(Error::ModerationError(ModerationError::ReasonRequired))
            ));

            Ok(())
        }

        #[tokio::test]
        async fn only_reviews_pending() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, None, ReviewStatus::Approved)
                .await?;

            let state = test.app_state();
            let result = CertificationService::new(&state)
                .review(&admin, certification.id, decision(true, None))
                .await;

            assert!(matches!(
                result,
                Err(Error::ModerationError(ModerationError::NotPending { .. }))
            ));

            Ok(())
        }

        #[tokio::test]
        async fn requires_admin() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (user, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, None, ReviewStatus::Pending)
                .await?;

            let state = test.app_state();
            let result = CertificationService::new(&state)
                .review(&user, certification.id, decision(true, None))
                .await;

            assert!(matches!(result, Err(Error::Forbidden(_))));

            Ok(())
        }
    }

    mod upload_document {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::server::{
            error::Error,
            service::{media::Upload, moderation::certification::CertificationService},
            util::test::TestContextExt,
        };

        /// Expect the document to be stored privately and the certification sent back to review
        #[tokio::test]
        async fn stores_document() -> Result<(), TestError> {
            let mut test = test_setup_with_marketplace_tables!()?;
            let (user, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, None, ReviewStatus::Rejected)
                .await?;
            let upload = test.provider().storage_upload("certifications", 1);

            let state = test.app_state();
            let dto = CertificationService::new(&state)
                .upload_document(
                    &user,
                    certification.id,
                    Upload {
                        content_type: "application/pdf".to_string(),
                        bytes: b"%PDF-1.4".to_vec(),
                    },
                )
                .await
                .unwrap();

            assert!(dto.has_document);
            assert_eq!(dto.status, ReviewStatus::Pending);
            upload.assert();

            Ok(())
        }

        /// Expect NotFound for another educator's certification
        #[tokio::test]
        async fn rejects_other_educators() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (_, owner) = test.user().insert_educator("owner@carelink.test").await?;
            let (other, _) = test.user().insert_educator("other@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(owner.id, None, ReviewStatus::Pending)
                .await?;

            let state = test.app_state();
            let result = CertificationService::new(&state)
                .upload_document(
                    &other,
                    certification.id,
                    Upload {
                        content_type: "application/pdf".to_string(),
                        bytes: b"%PDF-1.4".to_vec(),
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod duplicate_diplomas {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::server::{
            service::moderation::certification::CertificationService, util::test::TestContextExt,
        };

        #[tokio::test]
        async fn lists_shared_numbers() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let admin = test.user().insert_admin("admin@carelink.test").await?;
            let (_, first) = test.user().insert_educator("first@carelink.test").await?;
            let (_, second) = test.user().insert_educator("second@carelink.test").await?;
            let a = test
                .marketplace()
                .insert_certification(first.id, Some("DE-2016-001"), ReviewStatus::Approved)
                .await?;
            let b = test
                .marketplace()
                .insert_certification(second.id, Some(" de-2016-001 "), ReviewStatus::Pending)
                .await?;
            test.marketplace()
                .insert_certification(second.id, Some("DE-2017-002"), ReviewStatus::Pending)
                .await?;

            let state = test.app_state();
            let duplicates = CertificationService::new(&state)
                .duplicate_diplomas(&admin)
                .await
                .unwrap();

            assert_eq!(duplicates.len(), 1);
            assert_eq!(duplicates[0].diploma_number, "DE-2016-001");
            assert_eq!(duplicates[0].certification_ids, vec![a.id, b.id]);
            assert_eq!(duplicates[0].educator_ids, vec![first.id, second.id]);

            Ok(())
        }
    }
}
