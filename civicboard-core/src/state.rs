//! The state a view of the event board works from.
//!
//! `BoardState` is a plain value: the render layer owns it, replaces the
//! snapshot when the store pushes one, edits the criteria or cursor in
//! response to user input, and asks for a fresh list or grid afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::{self, MonthCursor, MonthGrid};
use crate::error::BoardError;
use crate::event::Event;
use crate::filter::{FilterCriteria, FilteredView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Calendar,
}

impl FromStr for ViewMode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(ViewMode::List),
            "calendar" => Ok(ViewMode::Calendar),
            other => Err(BoardError::InvalidInput(format!(
                "Unknown view '{}'. Expected list or calendar",
                other
            ))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::List => write!(f, "list"),
            ViewMode::Calendar => write!(f, "calendar"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub records: Vec<Event>,
    pub criteria: FilterCriteria,
    pub cursor: MonthCursor,
    pub view: ViewMode,
}

impl BoardState {
    /// Start on the list view, unfiltered, with the calendar on `today`'s month.
    pub fn new(records: Vec<Event>, today: NaiveDate) -> Self {
        BoardState {
            records,
            criteria: FilterCriteria::default(),
            cursor: MonthCursor::containing(today),
            view: ViewMode::default(),
        }
    }

    pub fn with_records(self, records: Vec<Event>) -> Self {
        BoardState { records, ..self }
    }

    pub fn with_criteria(self, criteria: FilterCriteria) -> Self {
        BoardState { criteria, ..self }
    }

    pub fn with_view(self, view: ViewMode) -> Self {
        BoardState { view, ..self }
    }

    /// Reset search, category and window, and restore the default sort.
    pub fn clear_filters(self) -> Self {
        self.with_criteria(FilterCriteria::default())
    }

    pub fn navigate(self, delta: i64) -> Self {
        BoardState {
            cursor: self.cursor.navigate(delta),
            ..self
        }
    }

    /// The list view: filtered and sorted records.
    pub fn visible(&self, today: NaiveDate) -> FilteredView {
        FilteredView::new(&self.records, &self.criteria, today)
    }

    /// The calendar view. The calendar shows every record; filters apply
    /// to the list only.
    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        calendar::layout_month(self.cursor, &self.records, today)
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.records.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::filter::{DateWindow, SortKey};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> Vec<Event> {
        ["2025-10-30", "2025-11-15", "2025-11-18"]
            .iter()
            .enumerate()
            .map(|(i, date)| Event {
                id: i.to_string(),
                title: format!("Event {}", i),
                date: date.to_string(),
                time: "10:00".to_string(),
                location: String::new(),
                description: String::new(),
                category: Category::Social,
                created_at: None,
                updated_at: None,
            })
            .collect()
    }

    #[test]
    fn test_state_threads_through_engine_calls() {
        let today = ymd(2025, 11, 1);
        let state = BoardState::new(records(), today);
        assert_eq!(state.cursor, MonthCursor::new(2025, 10));
        assert_eq!(state.visible(today).events.len(), 3);

        let state = state.with_criteria(FilterCriteria {
            window: DateWindow::Upcoming,
            sort: SortKey::DateAsc,
            ..Default::default()
        });
        let ids: Vec<String> = state.visible(today).events.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["1", "2"]);

        // Filters do not hide events from the calendar
        let state = state.navigate(-1);
        assert_eq!(state.grid(today).title(), "October 2025");
        assert_eq!(state.grid(today).day(30).unwrap().events().len(), 1);

        let state = state.clear_filters();
        assert_eq!(state.criteria, FilterCriteria::default());
    }

    #[test]
    fn test_snapshot_replacement() {
        let today = ymd(2025, 11, 1);
        let state = BoardState::new(Vec::new(), today).with_view(ViewMode::Calendar);
        assert!(state.visible(today).empty_state().is_some());

        let state = state.with_records(records());
        assert_eq!(state.view, ViewMode::Calendar);
        assert!(state.find("2").is_some());
        assert!(state.find("9").is_none());
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("calendar".parse::<ViewMode>().unwrap(), ViewMode::Calendar);
        assert!("grid".parse::<ViewMode>().is_err());
    }
}
