//! Sample content for a fresh board.

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use super::RecordStore;
use crate::category::Category;
use crate::error::BoardResult;
use crate::event::Event;

pub fn sample_events() -> Vec<Event> {
    let at = |y, m, d, h| {
        (
            NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default(),
        )
    };

    let (date, time) = at(2025, 11, 15, 18);
    let town_hall = Event::new(
        "Youth Town Hall Meeting".to_string(),
        date,
        time,
        "City Hall Auditorium".to_string(),
        "Join local government leaders to discuss issues affecting young people in our community."
            .to_string(),
        Category::Advocacy,
    );

    let (date, time) = at(2025, 11, 18, 9);
    let action_day = Event::new(
        "Environmental Action Day".to_string(),
        date,
        time,
        "Central Park".to_string(),
        "Join us for a day of environmental action! We'll be planting trees and cleaning up litter."
            .to_string(),
        Category::Volunteering,
    );

    vec![town_hall, action_day]
}

/// Fill an empty event store with [`sample_events`]. Returns how many
/// events were added (zero if the store already had events).
pub fn seed_sample_events<S: RecordStore<Event>>(store: &S) -> BoardResult<usize> {
    if !store.list()?.is_empty() {
        return Ok(0);
    }

    let samples = sample_events();
    let count = samples.len();
    for event in samples {
        store.create(event)?;
    }

    info!(count, "seeded sample events");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_seeds_only_empty_stores() {
        let store: MemoryStore<Event> = MemoryStore::new();
        assert_eq!(seed_sample_events(&store).unwrap(), 2);
        assert_eq!(seed_sample_events(&store).unwrap(), 0);

        let events = store.list().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date, "2025-11-15");
        assert_eq!(events[0].time, "18:00");
        assert_eq!(events[1].category, Category::Volunteering);
    }
}
