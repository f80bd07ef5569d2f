//! Upcoming/past split of the event calendar.
//!
//! Events are read newest-first. Everything dated today or later is
//! upcoming; everything strictly before today is past. Because the input
//! is sorted descending, the past events form a suffix and the boundary
//! can be found by binary search.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::db::{self, DbPool, Event};
use crate::Result;

/// Events grouped for the public calendar.
#[derive(Debug, Clone, Serialize)]
pub struct EventsOverview {
    /// Today or later, soonest first.
    pub upcoming: Vec<Event>,
    /// Before today, most recent first.
    pub past: Vec<Event>,
}

/// Index of the first item dated before `today`.
///
/// `items` must be sorted by `date_of` descending. Returns `items.len()`
/// when nothing is in the past.
pub fn split_point<T>(items: &[T], today: NaiveDate, date_of: impl Fn(&T) -> NaiveDate) -> usize {
    let mut left = 0;
    let mut right = items.len();

    while left < right {
        let mid = left + (right - left) / 2;
        if date_of(&items[mid]) < today {
            right = mid;
        } else {
            left = mid + 1;
        }
    }

    left
}

/// Reference scan for [`split_point`]: first item dated before `today`.
pub fn split_point_linear<T>(
    items: &[T],
    today: NaiveDate,
    date_of: impl Fn(&T) -> NaiveDate,
) -> usize {
    items
        .iter()
        .position(|item| date_of(item) < today)
        .unwrap_or(items.len())
}

/// Split newest-first events into upcoming and past.
pub fn partition_events(mut events: Vec<Event>, today: NaiveDate) -> EventsOverview {
    let boundary = split_point(&events, today, |e| e.event_date);
    let past = events.split_off(boundary);

    let mut upcoming = events;
    upcoming.reverse();

    EventsOverview { upcoming, past }
}

/// Service wrapper used by the events endpoint.
#[derive(Clone)]
pub struct EventService {
    db: DbPool,
}

impl EventService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Calendar as of the server's local date.
    pub async fn overview(&self) -> Result<EventsOverview> {
        self.overview_on(Local::now().date_naive()).await
    }

    pub async fn overview_on(&self, today: NaiveDate) -> Result<EventsOverview> {
        let events = db::list_events_newest_first(&self.db).await?;
        let overview = partition_events(events, today);
        debug!(
            %today,
            upcoming = overview.upcoming.len(),
            past = overview.past.len(),
            "Partitioned events"
        );
        Ok(overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2026, 10, 16)
    }

    #[rstest]
    #[case::empty(vec![], 0)]
    #[case::single_future(vec![d(2026, 12, 1)], 1)]
    #[case::single_today(vec![d(2026, 10, 16)], 1)]
    #[case::single_past(vec![d(2026, 10, 15)], 0)]
    #[case::all_future(vec![d(2027, 1, 1), d(2026, 11, 1), d(2026, 10, 17)], 3)]
    #[case::all_past(vec![d(2026, 10, 15), d(2025, 1, 1), d(2020, 5, 5)], 0)]
    #[case::mixed(vec![d(2027, 1, 1), d(2026, 10, 16), d(2026, 10, 15), d(2024, 2, 2)], 2)]
    #[case::duplicates_at_boundary(
        vec![d(2026, 10, 16), d(2026, 10, 16), d(2026, 10, 15), d(2026, 10, 15)],
        2
    )]
    fn test_split_point_cases(#[case] dates: Vec<NaiveDate>, #[case] expected: usize) {
        assert_eq!(split_point(&dates, today(), |x| *x), expected);
        assert_eq!(split_point_linear(&dates, today(), |x| *x), expected);
    }

    #[test]
    fn test_binary_search_matches_linear_scan_on_random_calendars() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);

        for _ in 0..500 {
            let len = rng.gen_range(0..40);
            let mut dates: Vec<NaiveDate> = (0..len)
                .map(|_| today() + chrono::Duration::days(rng.gen_range(-60..60)))
                .collect();
            dates.sort_by(|a, b| b.cmp(a));

            let pivot = today() + chrono::Duration::days(rng.gen_range(-70..70));
            assert_eq!(
                split_point(&dates, pivot, |x| *x),
                split_point_linear(&dates, pivot, |x| *x),
                "disagreement for {:?} at {}",
                dates,
                pivot
            );
        }
    }

    fn event(id: &str, date: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            event_date: date,
            location: None,
            description: None,
            image_url: None,
            registration_url: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_partition_orders_each_side() {
        let events = vec![
            event("far", d(2027, 3, 1)),
            event("soon", d(2026, 10, 20)),
            event("today", d(2026, 10, 16)),
            event("yesterday", d(2026, 10, 15)),
            event("old", d(2025, 1, 1)),
        ];

        let overview = partition_events(events, today());
        let upcoming: Vec<&str> = overview.upcoming.iter().map(|e| e.id.as_str()).collect();
        let past: Vec<&str> = overview.past.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(upcoming, vec!["today", "soon", "far"]);
        assert_eq!(past, vec!["yesterday", "old"]);
    }

    #[tokio::test]
    async fn test_overview_reads_from_database() {
        let pool = crate::db::init_in_memory().await.unwrap();
        for (id, date) in [("a", d(2026, 11, 1)), ("b", d(2026, 9, 1))] {
            db::create_event(
                &pool,
                db::CreateEvent {
                    id: id.into(),
                    title: id.into(),
                    event_date: date,
                    location: None,
                    description: None,
                    image_url: None,
                    registration_url: None,
                },
            )
            .await
            .unwrap();
        }

        let overview = EventService::new(pool).overview_on(today()).await.unwrap();
        assert_eq!(overview.upcoming.len(), 1);
        assert_eq!(overview.past[0].id, "b");
    }
}
