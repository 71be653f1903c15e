//! Month grid layout for the calendar view.
//!
//! A grid always starts on a Sunday and always holds a whole number of weeks.
//! Days before the 1st and after the last day of the month are filled in
//! from the neighbouring months as `OtherMonth` cells, which carry no events.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::Event;

/// At most this many events are shown inline in a day cell.
pub const INLINE_EVENT_LIMIT: usize = 3;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Years outside this range are clamped so every grid stays representable.
pub const MIN_YEAR: i32 = -262_000;
pub const MAX_YEAR: i32 = 262_000;

/// The month a calendar is showing. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Build a cursor from a year and a month index that may fall outside
    /// 0..12; out-of-range months roll over into neighbouring years.
    pub fn new(year: i32, month: i64) -> Self {
        let total = i64::from(year).saturating_mul(12).saturating_add(month);
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32;

        if year < i64::from(MIN_YEAR) {
            MonthCursor {
                year: MIN_YEAR,
                month: 0,
            }
        } else if year > i64::from(MAX_YEAR) {
            MonthCursor {
                year: MAX_YEAR,
                month: 11,
            }
        } else {
            MonthCursor {
                year: year as i32,
                month,
            }
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor::new(date.year(), i64::from(date.month0()))
    }

    /// Parse `YYYY-MM` (one-based month, as typed by a person).
    pub fn parse(input: &str) -> Option<Self> {
        let (year, month) = input.trim().split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(MonthCursor::new(year, i64::from(month) - 1))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move by `delta` months, rolling over year boundaries.
    pub fn navigate(self, delta: i64) -> Self {
        MonthCursor::new(self.year, i64::from(self.month).saturating_add(delta))
    }

    pub fn first_day(&self) -> NaiveDate {
        // Always valid: the year is clamped to a range chrono supports.
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month + 1 {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// A day of the displayed month and the events on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub is_today: bool,
    events: Vec<Event>,
}

impl MonthDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Every event on this day, in record order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The events to draw inside the cell.
    pub fn inline_events(&self) -> &[Event] {
        &self.events[..self.events.len().min(INLINE_EVENT_LIMIT)]
    }

    /// How many events did not fit inline ("+N more").
    pub fn overflow(&self) -> usize {
        self.events.len().saturating_sub(INLINE_EVENT_LIMIT)
    }
}

/// One square of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub enum DayCell {
    /// Padding from the previous or next month.
    OtherMonth { date: NaiveDate },
    InMonth(MonthDay),
}

impl DayCell {
    pub fn date(&self) -> NaiveDate {
        match self {
            DayCell::OtherMonth { date } => *date,
            DayCell::InMonth(day) => day.date,
        }
    }

    pub fn day(&self) -> u32 {
        self.date().day()
    }

    pub fn is_other_month(&self) -> bool {
        matches!(self, DayCell::OtherMonth { .. })
    }

    pub fn month_day(&self) -> Option<&MonthDay> {
        match self {
            DayCell::InMonth(day) => Some(day),
            DayCell::OtherMonth { .. } => None,
        }
    }
}

/// A laid-out month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Heading such as "November 2025".
    pub fn title(&self) -> String {
        self.cursor.to_string()
    }

    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// The in-month cell for a day number (1-based).
    pub fn day(&self, day: u32) -> Option<&MonthDay> {
        self.cells
            .iter()
            .filter_map(DayCell::month_day)
            .find(|d| d.day() == day)
    }

    /// Lay out the neighbouring month, `delta` months away.
    pub fn navigate(&self, delta: i64, records: &[Event], today: NaiveDate) -> MonthGrid {
        layout_month(self.cursor.navigate(delta), records, today)
    }
}

/// Lay out `cursor`'s month, placing each record on the day it is dated.
///
/// Records with an unparseable date are left out. Events within a day keep
/// their order in `records`.
pub fn layout_month(cursor: MonthCursor, records: &[Event], today: NaiveDate) -> MonthGrid {
    let first = cursor.first_day();
    let days_in_month = cursor.days_in_month();
    let leading = i64::from(first.weekday().num_days_from_sunday());

    let mut per_day: Vec<Vec<Event>> = vec![Vec::new(); days_in_month as usize];
    for event in records {
        if let Some(date) = event.day()
            && cursor.contains(date)
        {
            per_day[date.day0() as usize].push(event.clone());
        }
    }

    let mut cells = Vec::with_capacity(42);

    for offset in (1..=leading).rev() {
        cells.push(DayCell::OtherMonth {
            date: first - Duration::days(offset),
        });
    }

    for (index, events) in per_day.into_iter().enumerate() {
        let date = first + Duration::days(index as i64);
        cells.push(DayCell::InMonth(MonthDay {
            date,
            is_today: date == today,
            events,
        }));
    }

    let trailing = (7 - cells.len() % 7) % 7;
    let last = first + Duration::days(i64::from(days_in_month) - 1);
    for offset in 1..=trailing as i64 {
        cells.push(DayCell::OtherMonth {
            date: last + Duration::days(offset),
        });
    }

    MonthGrid { cursor, cells }
}

/// Every event dated `date`, in record order. Backs the "show all" view of a day.
pub fn events_on(records: &[Event], date: NaiveDate) -> Vec<Event> {
    records
        .iter()
        .filter(|event| event.day() == Some(date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            date: date.to_string(),
            time: "12:00".to_string(),
            location: String::new(),
            description: String::new(),
            category: Category::Community,
            created_at: None,
            updated_at: None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_november_2025_layout() {
        let records = vec![event("1", "2025-11-15"), event("2", "2025-11-18")];
        let grid = layout_month(MonthCursor::new(2025, 10), &records, ymd(2025, 11, 1));

        assert_eq!(grid.title(), "November 2025");
        // Nov 1 2025 is a Saturday: six days of October lead the grid
        assert_eq!(grid.cells.len(), 42);
        assert!(grid.cells[..6].iter().all(DayCell::is_other_month));
        assert_eq!(grid.cells[0].date(), ymd(2025, 10, 26));
        assert_eq!(grid.cells[6].date(), ymd(2025, 11, 1));

        let day15 = grid.day(15).unwrap();
        assert_eq!(day15.events().len(), 1);
        assert_eq!(day15.events()[0].id, "1");
        assert_eq!(grid.day(18).unwrap().events()[0].id, "2");

        let busy_days = grid
            .cells
            .iter()
            .filter_map(DayCell::month_day)
            .filter(|d| !d.events().is_empty())
            .count();
        assert_eq!(busy_days, 2);

        assert!(grid.day(1).unwrap().is_today);
        assert!(!grid.day(2).unwrap().is_today);
    }

    #[test]
    fn test_cell_count_multiple_of_seven() {
        let mut cursor = MonthCursor::new(1999, 0);
        for _ in 0..400 {
            let grid = layout_month(cursor, &[], ymd(2000, 1, 1));
            assert_eq!(grid.cells.len() % 7, 0, "{}", cursor);
            assert!(grid.cells.len() >= 28);
            let in_month = grid.cells.iter().filter(|c| !c.is_other_month()).count();
            assert_eq!(in_month as u32, cursor.days_in_month());
            assert_eq!(grid.cells[0].date().weekday(), chrono::Weekday::Sun);
            cursor = cursor.navigate(1);
        }
    }

    #[test]
    fn test_february_starting_on_sunday_needs_no_padding() {
        // February 2015 starts on a Sunday and has 28 days
        let grid = layout_month(MonthCursor::new(2015, 1), &[], ymd(2015, 2, 1));
        assert_eq!(grid.cells.len(), 28);
        assert!(grid.cells.iter().all(|c| !c.is_other_month()));
    }

    #[test]
    fn test_trailing_padding_counts_up_from_one() {
        // April 2026 ends on a Thursday
        let grid = layout_month(MonthCursor::new(2026, 3), &[], ymd(2026, 4, 1));
        let tail: Vec<u32> = grid
            .cells
            .iter()
            .rev()
            .take_while(|c| c.is_other_month())
            .map(DayCell::day)
            .collect();
        assert_eq!(tail, vec![2, 1]);
    }

    #[test]
    fn test_overflow() {
        let records: Vec<Event> = (0..5).map(|i| event(&i.to_string(), "2025-11-20")).collect();
        let grid = layout_month(MonthCursor::new(2025, 10), &records, ymd(2025, 11, 1));
        let day = grid.day(20).unwrap();

        assert_eq!(day.inline_events().len(), 3);
        assert_eq!(day.overflow(), 2);
        assert_eq!(day.events().len(), 5);
        let inline_ids: Vec<&str> = day.inline_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(inline_ids, vec!["0", "1", "2"]);

        let records: Vec<Event> = (0..3).map(|i| event(&i.to_string(), "2025-11-20")).collect();
        let grid = layout_month(MonthCursor::new(2025, 10), &records, ymd(2025, 11, 1));
        assert_eq!(grid.day(20).unwrap().overflow(), 0);
    }

    #[test]
    fn test_other_month_cells_carry_no_events() {
        let records = vec![event("oct", "2025-10-31"), event("dec", "2025-12-01")];
        let grid = layout_month(MonthCursor::new(2025, 10), &records, ymd(2025, 11, 1));
        assert!(
            grid.cells
                .iter()
                .filter_map(DayCell::month_day)
                .all(|d| d.events().is_empty())
        );
    }

    #[test]
    fn test_malformed_dates_are_not_placed() {
        let records = vec![event("bad", "2025-11-31"), event("worse", "")];
        let grid = layout_month(MonthCursor::new(2025, 10), &records, ymd(2025, 11, 1));
        assert!(
            grid.cells
                .iter()
                .filter_map(DayCell::month_day)
                .all(|d| d.events().is_empty())
        );
    }

    #[test]
    fn test_navigation_rolls_over_years() {
        let december = MonthCursor::new(2025, 11);
        let next = december.navigate(1);
        assert_eq!((next.year(), next.month()), (2026, 0));

        let january = MonthCursor::new(2025, 0);
        let prev = january.navigate(-1);
        assert_eq!((prev.year(), prev.month()), (2024, 11));

        assert_eq!(MonthCursor::new(2025, 25), MonthCursor::new(2027, 1));
        assert_eq!(MonthCursor::new(2025, -13), MonthCursor::new(2023, 11));

        let grid = layout_month(december, &[], ymd(2025, 12, 1));
        let next_grid = grid.navigate(1, &[], ymd(2025, 12, 1));
        assert_eq!(next_grid.cursor, MonthCursor::new(2026, 0));
        assert_eq!(next_grid.title(), "January 2026");
    }

    #[test]
    fn test_extreme_years_still_lay_out() {
        for cursor in [
            MonthCursor::new(i32::MAX, 0),
            MonthCursor::new(i32::MIN, 0),
            MonthCursor::new(MAX_YEAR, 11).navigate(1),
        ] {
            let grid = layout_month(cursor, &[], ymd(2025, 1, 1));
            assert_eq!(grid.cells.len() % 7, 0);
            assert_eq!(grid.cells[0].date().weekday(), chrono::Weekday::Sun);
        }
    }

    #[test]
    fn test_extreme_offsets_clamp_instead_of_overflowing() {
        let start = MonthCursor::new(2025, 0);

        let far_future = start.navigate(i64::MAX);
        assert_eq!((far_future.year(), far_future.month()), (MAX_YEAR, 11));

        let far_past = start.navigate(i64::MIN);
        assert_eq!((far_past.year(), far_past.month()), (MIN_YEAR, 0));

        assert_eq!(MonthCursor::new(i32::MAX, i64::MAX), far_future);
        assert_eq!(MonthCursor::new(i32::MIN, i64::MIN), far_past);
        assert_eq!(far_future.navigate(i64::MAX), far_future);

        for cursor in [far_future, far_past] {
            let grid = layout_month(cursor, &[], ymd(2025, 1, 1));
            assert_eq!(grid.cells.len() % 7, 0);
            assert_eq!(grid.cells[0].date().weekday(), chrono::Weekday::Sun);
        }
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(MonthCursor::new(2024, 1).days_in_month(), 29);
        assert_eq!(MonthCursor::new(2025, 1).days_in_month(), 28);
        assert_eq!(MonthCursor::new(1900, 1).days_in_month(), 28);
        assert_eq!(MonthCursor::new(2000, 1).days_in_month(), 29);
    }

    #[test]
    fn test_parse_cursor() {
        assert_eq!(MonthCursor::parse("2025-11"), Some(MonthCursor::new(2025, 10)));
        assert_eq!(MonthCursor::parse("2025-13"), None);
        assert_eq!(MonthCursor::parse("November"), None);
    }

    #[test]
    fn test_events_on() {
        let records = vec![
            event("a", "2025-11-15"),
            event("b", "2025-11-16"),
            event("c", "2025-11-15"),
        ];
        let ids: Vec<String> = events_on(&records, ymd(2025, 11, 15))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
