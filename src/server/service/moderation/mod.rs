//! Admin review of user submitted content.
//!
//! Certifications, avatars and educator profiles share the [`ReviewStatus`] workflow; blog and
//! community posts go through draft, submission and publication. Every rejection carries a
//! reason shown to the author.

pub mod avatar;
pub mod certification;
pub mod post;
pub mod verification;

use entity::sea_orm_active_enums::{ReviewStatus, UserRole};

use crate::{
    model::api::ModerationDecisionDto,
    server::error::{moderation::ModerationError, Error},
};

pub fn require_admin(user: &entity::app_user::Model) -> Result<(), Error> {
    if user.role != UserRole::Admin {
        return Err(Error::Forbidden("Only admins can do this".to_string()));
    }

    Ok(())
}

/// Outcome of an admin decision: approvals carry no reason, rejections a trimmed non-empty one.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject(String),
}

impl Decision {
    pub fn review_status(&self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Reject(_) => ReviewStatus::Rejected,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Approve => None,
            Self::Reject(reason) => Some(reason),
        }
    }
}

impl TryFrom<ModerationDecisionDto> for Decision {
    type Error = ModerationError;

    fn try_from(dto: ModerationDecisionDto) -> Result<Self, Self::Error> {
        if dto.approved {
            return Ok(Self::Approve);
        }

        dto.reason
            .map(|reason| reason.trim().to_string())
            .filter(|reason| !reason.is_empty())
            .map(Self::Reject)
            .ok_or(ModerationError::ReasonRequired)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::api::ModerationDecisionDto,
        server::{error::moderation::ModerationError, service::moderation::Decision},
    };

    fn dto(approved: bool, reason: Option<&str>) -> ModerationDecisionDto {
        ModerationDecisionDto {
            approved,
            reason: reason.map(str::to_string),
        }
    }

    /// Expect a reason sent along with an approval to be dropped
    #[test]
    fn approval_ignores_reason() {
        let decision = Decision::try_from(dto(true, Some("looks fine"))).unwrap();

        assert_eq!(decision, Decision::Approve);
        assert_eq!(decision.reason(), None);
    }

    #[test]
    fn rejection_trims_reason() {
        let decision = Decision::try_from(dto(false, Some("  Blurry scan  "))).unwrap();

        assert_eq!(decision, Decision::Reject("Blurry scan".to_string()));
    }

    #[test]
    fn rejection_requires_reason() {
        for reason in [None, Some(""), Some("   ")] {
            let result = Decision::try_from(dto(false, reason));

            assert!(matches!(result, Err(ModerationError::ReasonRequired)));
        }
    }
}
