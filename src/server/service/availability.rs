//! Bookable slots derived from weekly availability windows.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveTime};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        appointment::AppointmentRepository, availability::AvailabilityRepository,
        educator_profile::EducatorProfileRepository,
    },
    error::Error,
    util::time::{weekday_index, SLOT_MINUTES},
};

/// Expands windows into 30 minute increments lying fully inside a window and removes the
/// increments starting at a `booked` start time. Result is sorted and free of duplicates.
pub fn compute_slots(
    windows: &[entity::availability_window::Model],
    booked: &[NaiveTime],
) -> Vec<NaiveTime> {
    let step = Duration::minutes(SLOT_MINUTES);
    let mut slots = BTreeSet::new();

    for window in windows {
        let mut start = window.start_time;

        loop {
            // `overflowing_add_signed` reports wrap-around past midnight as a non-zero offset
            let (end, wrapped) = start.overflowing_add_signed(step);
            if wrapped != 0 || end > window.end_time {
                break;
            }

            if !booked.contains(&start) {
                slots.insert(start);
            }

            start = end;
        }
    }

    slots.into_iter().collect()
}

pub struct AvailabilityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Free slot start times of an approved educator on `date`.
    pub async fn available_slots(
        &self,
        educator_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, Error> {
        EducatorProfileRepository::new(self.db)
            .get_approved_with_user(educator_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Educator {}", educator_id)))?;

        self.slots_for(educator_id, date).await
    }

    /// Free slots of any educator, regardless of verification status.
    pub(crate) async fn slots_for(
        &self,
        educator_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, Error> {
        let windows = AvailabilityRepository::new(self.db)
            .list_for_day(educator_id, weekday_index(date))
            .await?;
        let booked = AppointmentRepository::new(self.db)
            .booked_start_times(educator_id, date)
            .await?;

        Ok(compute_slots(&windows, &booked))
    }
}

#[cfg(test)]
mod tests {
    mod compute_slots {
        use carelink_test_utils::prelude::*;
        use chrono::NaiveTime;

        use crate::server::service::availability::compute_slots;

        fn time(h: u32, m: u32) -> NaiveTime {
            NaiveTime::from_hms_opt(h, m, 0).unwrap()
        }

        #[test]
        fn expands_windows_into_half_hours() {
            let windows = vec![factory::availability_window(1, 1, time(9, 0), time(10, 30))];

            let slots = compute_slots(&windows, &[]);

            assert_eq!(slots, vec![time(9, 0), time(9, 30), time(10, 0)]);
        }

        /// Expect a trailing remainder shorter than a slot to be dropped
        #[test]
        fn drops_partial_increments() {
            let windows = vec![factory::availability_window(1, 1, time(9, 0), time(9, 50))];

            let slots = compute_slots(&windows, &[]);

            assert_eq!(slots, vec![time(9, 0)]);
        }

        #[test]
        fn removes_booked_starts() {
            let windows = vec![factory::availability_window(1, 1, time(9, 0), time(11, 0))];

            let slots = compute_slots(&windows, &[time(9, 30), time(10, 15)]);

            assert_eq!(slots, vec![time(9, 0), time(10, 0), time(10, 30)]);
        }

        /// Expect overlapping windows to produce each start time once, in order
        #[test]
        fn merges_windows_sorted() {
            let windows = vec![
                factory::availability_window(1, 1, time(14, 0), time(15, 0)),
                factory::availability_window(2, 1, time(9, 0), time(10, 0)),
                factory::availability_window(3, 1, time(9, 30), time(10, 30)),
            ];

            let slots = compute_slots(&windows, &[]);

            assert_eq!(
                slots,
                vec![time(9, 0), time(9, 30), time(10, 0), time(14, 0), time(14, 30)]
            );
        }

        #[test]
        fn stops_at_midnight() {
            let windows = vec![factory::availability_window(1, 1, time(23, 0), time(23, 59))];

            let slots = compute_slots(&windows, &[]);

            assert_eq!(slots, vec![time(23, 0)]);
        }

        /// Expect no returned slot to coincide with a booked start, whatever the windows
        #[test]
        fn never_returns_booked_start() {
            let windows = vec![
                factory::availability_window(1, 1, time(8, 0), time(12, 0)),
                factory::availability_window(2, 1, time(8, 15), time(9, 45)),
            ];
            let booked = [time(8, 0), time(8, 15), time(8, 45), time(11, 30)];

            let slots = compute_slots(&windows, &booked);

            assert!(slots.iter().all(|slot| !booked.contains(slot)));
            assert!(slots.contains(&time(8, 30)));
        }
    }

    mod available_slots {
        use carelink_test_utils::prelude::*;
        use chrono::{NaiveDate, NaiveTime};

        use crate::server::service::availability::AvailabilityService;

        fn time(h: u32, m: u32) -> NaiveTime {
            NaiveTime::from_hms_opt(h, m, 0).unwrap()
        }

        /// Expect windows of the date's weekday minus the pending appointment
        #[tokio::test]
        async fn uses_weekday_windows_and_bookings() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let (_, family) = test.user().insert_family("family@carelink.test").await?;
            // 2030-03-04 is a Monday
            let date = NaiveDate::from_ymd_opt(2030, 3, 4).unwrap();
            let marketplace = test.marketplace();
            marketplace
                .insert_availability(educator.id, 1, time(9, 0), time(11, 0))
                .await?;
            marketplace
                .insert_availability(educator.id, 2, time(14, 0), time(15, 0))
                .await?;
            marketplace
                .insert_appointment(AppointmentSeed::new(
                    educator.id,
                    family.id,
                    date,
                    time(9, 30),
                    time(10, 0),
                ))
                .await?;

            let service = AvailabilityService::new(&test.db);
            let slots = service.available_slots(educator.id, date).await.unwrap();

            assert_eq!(slots, vec![time(9, 0), time(10, 0), time(10, 30)]);

            Ok(())
        }
    }
}
