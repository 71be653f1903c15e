//! Event records.
//!
//! Dates and times are kept as the text the editor entered so that a record
//! with a malformed value still loads, renders and can be fixed. Accessors
//! parse on demand and return `None` when the stored text is not valid.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::Category;
use crate::error::{BoardError, BoardResult};

/// Storage format for `Event::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format for `Event::time`.
pub const TIME_FORMAT: &str = "%H:%M";

/// A community event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock start, `HH:MM` (24-hour)
    pub time: String,
    pub location: String,
    pub description: String,
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Create a new event with a freshly generated id.
    pub fn new(
        title: String,
        date: NaiveDate,
        time: NaiveTime,
        location: String,
        description: String,
        category: Category,
    ) -> Self {
        Event {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            location,
            description,
            category,
            created_at: None,
            updated_at: None,
        }
    }

    /// The event's calendar date, or `None` if the stored date is malformed.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// The event's start time, or `None` if the stored time is malformed.
    pub fn clock(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()
    }

    /// Whether the event happened strictly before `today`.
    /// Events without a valid date are never considered past.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.day().is_some_and(|day| day < today)
    }

    /// Case-insensitive substring match against title, description and location.
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// 12-hour clock label, e.g. `6:00 PM`. Falls back to the stored text.
    pub fn display_time(&self) -> String {
        match self.clock() {
            Some(time) => format_12h(time),
            None => self.time.clone(),
        }
    }

    /// Short date label, e.g. `Nov 15, 2025`. Falls back to the stored text.
    pub fn display_date(&self) -> String {
        match self.day() {
            Some(day) => day.format("%b %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Format a time as `h:MM AM/PM`, with midnight as 12 AM and noon as 12 PM.
pub fn format_12h(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if pm { "PM" } else { "AM" })
}

/// Parse a `YYYY-MM-DD` date entered by an editor.
pub fn parse_date(input: &str) -> BoardResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        BoardError::InvalidInput(format!(
            "Invalid date format '{}'. Expected YYYY-MM-DD",
            input
        ))
    })
}

/// Parse an `HH:MM` (24-hour) time entered by an editor.
pub fn parse_time(input: &str) -> BoardResult<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| {
        BoardError::InvalidInput(format!(
            "Invalid time format '{}'. Expected HH:MM (24-hour)",
            input
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> Event {
        Event::new(
            "Youth Town Hall Meeting".to_string(),
            NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            "City Hall Auditorium".to_string(),
            "Discuss issues affecting young people.".to_string(),
            Category::Advocacy,
        )
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = make_test_event();
        let b = make_test_event();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.date, "2025-11-15");
        assert_eq!(a.time, "18:00");
    }

    #[test]
    fn test_malformed_date_and_time() {
        let mut event = make_test_event();
        event.date = "next tuesday".to_string();
        event.time = "6pm".to_string();

        assert_eq!(event.day(), None);
        assert_eq!(event.clock(), None);
        assert_eq!(event.display_date(), "next tuesday");
        assert_eq!(event.display_time(), "6pm");
        assert!(!event.is_past(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }

    #[test]
    fn test_display_time() {
        let mut event = make_test_event();
        assert_eq!(event.display_time(), "6:00 PM");

        event.time = "00:05".to_string();
        assert_eq!(event.display_time(), "12:05 AM");

        event.time = "12:30".to_string();
        assert_eq!(event.display_time(), "12:30 PM");

        event.time = "09:00".to_string();
        assert_eq!(event.display_time(), "9:00 AM");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(make_test_event().display_date(), "Nov 15, 2025");
    }

    #[test]
    fn test_matches_search_any_field() {
        let event = make_test_event();
        assert!(event.matches_search("town hall"));
        assert!(event.matches_search("young people"));
        assert!(event.matches_search("auditorium"));
        assert!(!event.matches_search("cleanup"));
    }

    #[test]
    fn test_is_past() {
        let event = make_test_event();
        let on_day = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        assert!(!event.is_past(on_day));
        assert!(event.is_past(on_day.succ_opt().unwrap()));
    }

    #[test]
    fn test_parse_inputs() {
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("11/15/2025").is_err());
        assert_eq!(
            parse_date(" 2025-11-15 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
        );
        assert!(parse_time("25:00").is_err());
        assert_eq!(
            parse_time("9:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_json_shape() {
        let json = r##"{
            "id": "1",
            "title": "Town Hall",
            "date": "2025-11-15",
            "time": "18:00",
            "location": "City Hall",
            "description": "",
            "category": "Advocacy",
            "createdAt": "2025-10-01T12:00:00Z"
        }"##;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, Category::Advocacy);
        assert!(event.created_at.is_some());
        assert!(event.updated_at.is_none());

        let out = serde_json::to_value(&event).unwrap();
        assert!(out.get("createdAt").is_some());
        assert!(out.get("updatedAt").is_none());
    }
}
