use std::collections::BTreeMap;

use chrono::Utc;
use entity::sea_orm_active_enums::ReviewStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::content::CertificationInput;

pub struct CertificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CertificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a certification awaiting review
    pub async fn create(
        &self,
        educator_id: i32,
        input: CertificationInput,
    ) -> Result<entity::certification::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let certification = entity::certification::ActiveModel {
            educator_id: ActiveValue::Set(educator_id),
            title: ActiveValue::Set(input.title),
            issuer: ActiveValue::Set(input.issuer),
            diploma_number: ActiveValue::Set(input.diploma_number),
            obtained_on: ActiveValue::Set(input.obtained_on),
            document_path: ActiveValue::Set(None),
            status: ActiveValue::Set(ReviewStatus::Pending),
            rejection_reason: ActiveValue::Set(None),
            reviewed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        certification.insert(self.db).await
    }

    /// Applies an educator edit and sends the certification back to review
    pub async fn update(
        &self,
        certification: entity::certification::Model,
        input: CertificationInput,
    ) -> Result<entity::certification::Model, DbErr> {
        let mut certification_am = certification.into_active_model();
        certification_am.title = ActiveValue::Set(input.title);
        certification_am.issuer = ActiveValue::Set(input.issuer);
        certification_am.diploma_number = ActiveValue::Set(input.diploma_number);
        certification_am.obtained_on = ActiveValue::Set(input.obtained_on);
        certification_am.status = ActiveValue::Set(ReviewStatus::Pending);
        certification_am.reviewed_at = ActiveValue::Set(None);
        certification_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        certification_am.update(self.db).await
    }

    /// Stores the uploaded document and sends the certification back to review
    pub async fn set_document(
        &self,
        certification: entity::certification::Model,
        document_path: String,
    ) -> Result<entity::certification::Model, DbErr> {
        let mut certification_am = certification.into_active_model();
        certification_am.document_path = ActiveValue::Set(Some(document_path));
        certification_am.status = ActiveValue::Set(ReviewStatus::Pending);
        certification_am.reviewed_at = ActiveValue::Set(None);
        certification_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        certification_am.update(self.db).await
    }

    pub async fn get(
        &self,
        certification_id: i32,
    ) -> Result<Option<entity::certification::Model>, DbErr> {
        entity::prelude::Certification::find_by_id(certification_id)
            .one(self.db)
            .await
    }

    pub async fn list_for_educator(
        &self,
        educator_id: i32,
    ) -> Result<Vec<entity::certification::Model>, DbErr> {
        entity::prelude::Certification::find()
            .filter(entity::certification::Column::EducatorId.eq(educator_id))
            .order_by_asc(entity::certification::Column::Id)
            .all(self.db)
            .await
    }

    /// Lists certifications awaiting review, oldest first
    pub async fn list_pending(&self) -> Result<Vec<entity::certification::Model>, DbErr> {
        entity::prelude::Certification::find()
            .filter(entity::certification::Column::Status.eq(ReviewStatus::Pending))
            .order_by_asc(entity::certification::Column::CreatedAt)
            .order_by_asc(entity::certification::Column::Id)
            .all(self.db)
            .await
    }

    /// Records a review decision
    ///
    /// The rejection reason is replaced by `rejection_reason`, so approvals clear it.
    pub async fn review(
        &self,
        certification: entity::certification::Model,
        status: ReviewStatus,
        rejection_reason: Option<String>,
    ) -> Result<entity::certification::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut certification_am = certification.into_active_model();
        certification_am.status = ActiveValue::Set(status);
        certification_am.rejection_reason = ActiveValue::Set(rejection_reason);
        certification_am.reviewed_at = ActiveValue::Set(Some(now));
        certification_am.updated_at = ActiveValue::Set(now);

        certification_am.update(self.db).await
    }

    /// Groups certifications by diploma number, keeping numbers used more than once
    pub async fn find_duplicate_diplomas(
        &self,
    ) -> Result<Vec<(String, Vec<entity::certification::Model>)>, DbErr> {
        let certifications = entity::prelude::Certification::find()
            .filter(entity::certification::Column::DiplomaNumber.is_not_null())
            .order_by_asc(entity::certification::Column::Id)
            .all(self.db)
            .await?;

        let mut by_number: BTreeMap<String, Vec<entity::certification::Model>> = BTreeMap::new();
        for certification in certifications {
            let Some(number) = certification
                .diploma_number
                .as_deref()
                .map(str::trim)
                .filter(|number| !number.is_empty())
                .map(str::to_uppercase)
            else {
                continue;
            };

            by_number.entry(number).or_default().push(certification);
        }

        Ok(by_number
            .into_iter()
            .filter(|(_, certifications)| certifications.len() > 1)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    mod update {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::{
            model::content::CertificationInput,
            server::data::certification::CertificationRepository,
        };

        /// Expect an approved certification to go back to review after an edit
        #[tokio::test]
        async fn resets_status_to_pending() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let certification = test
                .marketplace()
                .insert_certification(educator.id, Some("DEES-1"), ReviewStatus::Approved)
                .await?;

            let repo = CertificationRepository::new(&test.db);
            let updated = repo
                .update(
                    certification,
                    CertificationInput {
                        title: "DEES".to_string(),
                        issuer: "IRTS".to_string(),
                        diploma_number: Some("DEES-2".to_string()),
                        obtained_on: None,
                    },
                )
                .await?;

            assert_eq!(updated.status, ReviewStatus::Pending);
            assert_eq!(updated.reviewed_at, None);

            Ok(())
        }
    }

    mod review {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::server::data::certification::CertificationRepository;

        /// Expect approval to clear a reason left by an earlier rejection
        #[tokio::test]
        async fn approval_clears_reason() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
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
                    Some("Unreadable scan".to_string()),
                )
                .await?;
            let approved = repo.review(rejected, ReviewStatus::Approved, None).await?;

            assert_eq!(approved.status, ReviewStatus::Approved);
            assert_eq!(approved.rejection_reason, None);
            assert!(approved.reviewed_at.is_some());

            Ok(())
        }
    }

    mod find_duplicate_diplomas {
        use carelink_test_utils::prelude::*;
        use entity::sea_orm_active_enums::ReviewStatus;

        use crate::server::data::certification::CertificationRepository;

        /// Expect numbers differing only by case and whitespace to be grouped
        #[tokio::test]
        async fn groups_normalized_numbers() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (_, first) = test.user().insert_educator("one@carelink.test").await?;
            let (_, second) = test.user().insert_educator("two@carelink.test").await?;
            let marketplace = test.marketplace();
            let a = marketplace
                .insert_certification(first.id, Some("dees-42"), ReviewStatus::Approved)
                .await?;
            let b = marketplace
                .insert_certification(second.id, Some(" DEES-42 "), ReviewStatus::Pending)
                .await?;
            marketplace
                .insert_certification(second.id, Some("DEES-7"), ReviewStatus::Pending)
                .await?;
            marketplace
                .insert_certification(second.id, None, ReviewStatus::Pending)
                .await?;

            let repo = CertificationRepository::new(&test.db);
            let duplicates = repo.find_duplicate_diplomas().await?;

            assert_eq!(duplicates.len(), 1);
            assert_eq!(duplicates[0].0, "DEES-42");
            let ids: Vec<i32> = duplicates[0].1.iter().map(|c| c.id).collect();
            assert_eq!(ids, vec![a.id, b.id]);

            Ok(())
        }
    }
}
