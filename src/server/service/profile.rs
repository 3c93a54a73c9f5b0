//! Educator and family profiles, children and weekly availability.

use entity::sea_orm_active_enums::{ReviewStatus, UserRole};
use sea_orm::DatabaseConnection;

use crate::{
    model::profile::{
        AvailabilityWindowDto, AvailabilityWindowInput, ChildDto, ChildInput,
        EducatorProfileDto, EducatorProfileInput, FamilyProfileDto, FamilyProfileInput,
    },
    server::{
        data::{
            availability::AvailabilityRepository, child::ChildRepository,
            educator_profile::EducatorProfileRepository, family_profile::FamilyProfileRepository,
        },
        error::Error,
        service::validate::{optional_text, required_text},
        util::profession::{find_profession, profession_label},
    },
};

/// Returns the educator profile of `user`.
///
/// # Returns
/// - `Err(Error::Forbidden)` - The user is not an educator
/// - `Err(Error::NotFound)` - The educator has not created a profile yet
pub async fn require_educator(
    db: &DatabaseConnection,
    user: &entity::app_user::Model,
) -> Result<entity::educator_profile::Model, Error> {
    if user.role != UserRole::Educator {
        return Err(Error::Forbidden("Only educators can do this".to_string()));
    }

    EducatorProfileRepository::new(db)
        .find_by_user_id(user.id)
        .await?
        .ok_or_else(|| Error::NotFound("Educator profile".to_string()))
}

/// Returns the family profile of `user`, see [`require_educator`].
pub async fn require_family(
    db: &DatabaseConnection,
    user: &entity::app_user::Model,
) -> Result<entity::family_profile::Model, Error> {
    if user.role != UserRole::Family {
        return Err(Error::Forbidden("Only families can do this".to_string()));
    }

    FamilyProfileRepository::new(db)
        .find_by_user_id(user.id)
        .await?
        .ok_or_else(|| Error::NotFound("Family profile".to_string()))
}

pub struct ProfileService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_educator_profile(
        &self,
        user: &entity::app_user::Model,
        input: EducatorProfileInput,
    ) -> Result<EducatorProfileDto, Error> {
        if user.role != UserRole::Educator {
            return Err(Error::Forbidden("Only educators can do this".to_string()));
        }

        let repo = EducatorProfileRepository::new(self.db);
        if repo.find_by_user_id(user.id).await?.is_some() {
            return Err(Error::Validation(
                "An educator profile already exists for this account".to_string(),
            ));
        }

        let input = validate_educator_input(input)?;
        let profile = repo.create(user.id, input).await?;

        tracing::info!(user_id = %user.id, educator_id = %profile.id, "Created educator profile");

        Ok(educator_profile_dto(profile))
    }

    pub async fn update_educator_profile(
        &self,
        user: &entity::app_user::Model,
        input: EducatorProfileInput,
    ) -> Result<EducatorProfileDto, Error> {
        let profile = require_educator(self.db, user).await?;
        let input = validate_educator_input(input)?;

        let profile = EducatorProfileRepository::new(self.db)
            .update(profile, input)
            .await?;

        Ok(educator_profile_dto(profile))
    }

    pub async fn get_educator_profile(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<EducatorProfileDto, Error> {
        let profile = require_educator(self.db, user).await?;

        Ok(educator_profile_dto(profile))
    }

    /// Public profile of an approved educator; pending and rejected profiles are not found.
    pub async fn get_public_educator(&self, educator_id: i32) -> Result<EducatorProfileDto, Error> {
        let (profile, _) = EducatorProfileRepository::new(self.db)
            .get_approved_with_user(educator_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Educator {}", educator_id)))?;

        let mut dto = educator_profile_dto(profile);
        // Contact details stay private until a booking exists
        dto.phone = None;

        Ok(dto)
    }

    pub async fn create_family_profile(
        &self,
        user: &entity::app_user::Model,
        input: FamilyProfileInput,
    ) -> Result<FamilyProfileDto, Error> {
        if user.role != UserRole::Family {
            return Err(Error::Forbidden("Only families can do this".to_string()));
        }

        let repo = FamilyProfileRepository::new(self.db);
        if repo.find_by_user_id(user.id).await?.is_some() {
            return Err(Error::Validation(
                "A family profile already exists for this account".to_string(),
            ));
        }

        let input = validate_family_input(input)?;
        let profile = repo.create(user.id, input).await?;

        tracing::info!(user_id = %user.id, family_id = %profile.id, "Created family profile");

        Ok(family_profile_dto(profile))
    }

    pub async fn update_family_profile(
        &self,
        user: &entity::app_user::Model,
        input: FamilyProfileInput,
    ) -> Result<FamilyProfileDto, Error> {
        let profile = require_family(self.db, user).await?;
        let input = validate_family_input(input)?;

        let profile = FamilyProfileRepository::new(self.db)
            .update(profile, input)
            .await?;

        Ok(family_profile_dto(profile))
    }

    pub async fn get_family_profile(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<FamilyProfileDto, Error> {
        let profile = require_family(self.db, user).await?;

        Ok(family_profile_dto(profile))
    }

    pub async fn add_child(
        &self,
        user: &entity::app_user::Model,
        input: ChildInput,
    ) -> Result<ChildDto, Error> {
        let family = require_family(self.db, user).await?;
        let input = validate_child_input(input)?;

        let child = ChildRepository::new(self.db).create(family.id, input).await?;

        Ok(child_dto(child))
    }

    pub async fn list_children(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<ChildDto>, Error> {
        let family = require_family(self.db, user).await?;

        let children = ChildRepository::new(self.db)
            .list_for_family(family.id)
            .await?;

        Ok(children.into_iter().map(child_dto).collect())
    }

    pub async fn update_child(
        &self,
        user: &entity::app_user::Model,
        child_id: i32,
        input: ChildInput,
    ) -> Result<ChildDto, Error> {
        let family = require_family(self.db, user).await?;
        let input = validate_child_input(input)?;

        let repo = ChildRepository::new(self.db);
        let child = repo
            .get_for_family(child_id, family.id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Child {}", child_id)))?;
        let child = repo.update(child, input).await?;

        Ok(child_dto(child))
    }

    pub async fn delete_child(
        &self,
        user: &entity::app_user::Model,
        child_id: i32,
    ) -> Result<(), Error> {
        let family = require_family(self.db, user).await?;

        let result = ChildRepository::new(self.db)
            .delete_for_family(child_id, family.id)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("Child {}", child_id)));
        }

        Ok(())
    }

    /// Adds a weekly availability window.
    ///
    /// Windows must start before they end, use a day between 0 (Sunday) and 6 (Saturday) and
    /// must not overlap another window on the same day.
    pub async fn add_availability(
        &self,
        user: &entity::app_user::Model,
        input: AvailabilityWindowInput,
    ) -> Result<AvailabilityWindowDto, Error> {
        let educator = require_educator(self.db, user).await?;

        if !(0..=6).contains(&input.day_of_week) {
            return Err(Error::Validation(
                "Day of week must be between 0 (Sunday) and 6 (Saturday)".to_string(),
            ));
        }
        if input.start_time >= input.end_time {
            return Err(Error::Validation(
                "Availability must start before it ends".to_string(),
            ));
        }

        let repo = AvailabilityRepository::new(self.db);
        let same_day = repo.list_for_day(educator.id, input.day_of_week).await?;
        let overlaps = same_day
            .iter()
            .any(|window| input.start_time < window.end_time && window.start_time < input.end_time);
        if overlaps {
            return Err(Error::Validation(
                "Availability overlaps an existing window on the same day".to_string(),
            ));
        }

        let window = repo.create(educator.id, input).await?;

        Ok(availability_dto(window))
    }

    pub async fn list_availability(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<AvailabilityWindowDto>, Error> {
        let educator = require_educator(self.db, user).await?;

        let windows = AvailabilityRepository::new(self.db)
            .list_for_educator(educator.id)
            .await?;

        Ok(windows.into_iter().map(availability_dto).collect())
    }

    pub async fn delete_availability(
        &self,
        user: &entity::app_user::Model,
        window_id: i32,
    ) -> Result<(), Error> {
        let educator = require_educator(self.db, user).await?;

        let result = AvailabilityRepository::new(self.db)
            .delete_for_educator(window_id, educator.id)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("Availability window {}", window_id)));
        }

        Ok(())
    }
}

/// Upper bound on an educator's hourly rate, 1 000 € per hour.
pub const MAX_HOURLY_RATE_CENTS: i64 = 100_000;

fn validate_educator_input(input: EducatorProfileInput) -> Result<EducatorProfileInput, Error> {
    if find_profession(&input.profession_code).is_none() {
        return Err(Error::Validation(format!(
            "Unknown profession code: {}",
            input.profession_code
        )));
    }
    if input.hourly_rate_cents <= 0 {
        return Err(Error::Validation(
            "Hourly rate must be greater than zero".to_string(),
        ));
    }
    if input.hourly_rate_cents > MAX_HOURLY_RATE_CENTS {
        return Err(Error::Validation(format!(
            "Hourly rate cannot exceed {} cents",
            MAX_HOURLY_RATE_CENTS
        )));
    }
    if input.years_experience < 0 {
        return Err(Error::Validation(
            "Years of experience cannot be negative".to_string(),
        ));
    }

    Ok(EducatorProfileInput {
        first_name: required_text("First name", &input.first_name)?,
        last_name: required_text("Last name", &input.last_name)?,
        phone: optional_text(input.phone),
        city: required_text("City", &input.city)?,
        postal_code: required_text("Postal code", &input.postal_code)?,
        bio: input.bio.trim().to_string(),
        profession_code: input.profession_code,
        hourly_rate_cents: input.hourly_rate_cents,
        years_experience: input.years_experience,
        siret_number: optional_text(input.siret_number),
        rpps_number: optional_text(input.rpps_number),
        sap_number: optional_text(input.sap_number),
    })
}

fn validate_family_input(input: FamilyProfileInput) -> Result<FamilyProfileInput, Error> {
    Ok(FamilyProfileInput {
        first_name: required_text("First name", &input.first_name)?,
        last_name: required_text("Last name", &input.last_name)?,
        phone: optional_text(input.phone),
        address: optional_text(input.address),
        city: required_text("City", &input.city)?,
        postal_code: required_text("Postal code", &input.postal_code)?,
    })
}

fn validate_child_input(input: ChildInput) -> Result<ChildInput, Error> {
    Ok(ChildInput {
        first_name: required_text("First name", &input.first_name)?,
        birth_date: input.birth_date,
        needs_description: input.needs_description.trim().to_string(),
    })
}

pub fn educator_profile_dto(profile: entity::educator_profile::Model) -> EducatorProfileDto {
    EducatorProfileDto {
        profession_label: profession_label(&profile.profession_code),
        id: profile.id,
        user_id: profile.user_id,
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone: profile.phone,
        city: profile.city,
        postal_code: profile.postal_code,
        bio: profile.bio,
        profession_code: profile.profession_code,
        hourly_rate_cents: profile.hourly_rate_cents,
        years_experience: profile.years_experience,
        siret_number: profile.siret_number,
        rpps_number: profile.rpps_number,
        sap_number: profile.sap_number,
        video_url: profile.video_url,
        verification_status: profile.verification_status,
        subscription_status: profile.subscription_status,
        subscription_current_period_end: profile.subscription_current_period_end,
    }
}

pub fn family_profile_dto(profile: entity::family_profile::Model) -> FamilyProfileDto {
    FamilyProfileDto {
        id: profile.id,
        user_id: profile.user_id,
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone: profile.phone,
        address: profile.address,
        city: profile.city,
        postal_code: profile.postal_code,
    }
}

pub fn child_dto(child: entity::child::Model) -> ChildDto {
    ChildDto {
        id: child.id,
        family_id: child.family_id,
        first_name: child.first_name,
        birth_date: child.birth_date,
        needs_description: child.needs_description,
    }
}

pub fn availability_dto(window: entity::availability_window::Model) -> AvailabilityWindowDto {
    AvailabilityWindowDto {
        id: window.id,
        day_of_week: window.day_of_week,
        start_time: window.start_time,
        end_time: window.end_time,
    }
}

/// Avatar URL safe to show other users; unreviewed and rejected avatars are hidden.
pub fn public_avatar_url(user: &entity::app_user::Model) -> Option<String> {
    match user.avatar_status {
        ReviewStatus::Approved => user.avatar_url.clone(),
        _ => None,
    }
}
