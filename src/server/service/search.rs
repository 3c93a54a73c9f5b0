use entity::sea_orm_active_enums::SubscriptionStatus;
use sea_orm::DatabaseConnection;

use crate::{
    model::profile::{EducatorSearchResultDto, EducatorSummaryDto},
    server::{
        data::educator_profile::{EducatorProfileRepository, EducatorSearchFilter},
        error::Error,
        service::{profile::public_avatar_url, validate::optional_text},
        util::profession::profession_label,
    },
};

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 50;
/// Highest page served; later pages are answered as this one
pub const MAX_PAGE: u64 = 10_000;

/// Query parameters of the public educator search
#[derive(Debug, Default, Clone)]
pub struct SearchQuery {
    pub city: Option<String>,
    pub profession: Option<String>,
    pub max_rate_cents: Option<i64>,
    /// One based, defaults to the first page
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

pub struct SearchService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SearchService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Searches approved educators, subscribers first.
    ///
    /// `per_page` is clamped to 1..=50 and `page` to 1..=[`MAX_PAGE`].
    pub async fn search(&self, query: SearchQuery) -> Result<EducatorSearchResultDto, Error> {
        let page = query.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);

        let filter = EducatorSearchFilter {
            city: optional_text(query.city),
            profession_code: optional_text(query.profession),
            max_rate_cents: query.max_rate_cents,
        };

        let rows = EducatorProfileRepository::new(self.db)
            .search(filter, page - 1, per_page)
            .await?;

        let results = rows
            .into_iter()
            .map(|(profile, user)| EducatorSummaryDto {
                avatar_url: user.as_ref().and_then(public_avatar_url),
                premium: matches!(
                    profile.subscription_status,
                    SubscriptionStatus::Active | SubscriptionStatus::Trialing
                ),
                profession_label: profession_label(&profile.profession_code),
                id: profile.id,
                first_name: profile.first_name,
                last_name: profile.last_name,
                city: profile.city,
                profession_code: profile.profession_code,
                hourly_rate_cents: profile.hourly_rate_cents,
                years_experience: profile.years_experience,
            })
            .collect();

        Ok(EducatorSearchResultDto {
            results,
            page,
            per_page,
        })
    }
}
