mod validate_pin;

use carelink_test_utils::prelude::*;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};

use crate::server::util::time::weekday_index;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// A date one week ahead, so bookings are never in the past.
fn next_week() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(7)
}

/// Educator with a 09:00-12:00 window on `date`'s weekday, and a family with one child.
async fn bookable(
    test: &TestContext,
    date: NaiveDate,
) -> Result<
    (
        entity::app_user::Model,
        entity::educator_profile::Model,
        entity::app_user::Model,
        entity::family_profile::Model,
        entity::child::Model,
    ),
    TestError,
> {
    let (educator_user, educator) = test.user().insert_educator("edu@carelink.test").await?;
    let (family_user, family) = test.user().insert_family("family@carelink.test").await?;
    let child = test.marketplace().insert_child(family.id).await?;
    test.marketplace()
        .insert_availability(educator.id, weekday_index(date), time(9, 0), time(12, 0))
        .await?;

    Ok((educator_user, educator, family_user, family, child))
}
