//! Filtering and sorting of event lists.
//!
//! [`apply`] is a pure function of the records, the criteria and the
//! current date: it never mutates its input and always returns a fresh
//! vector, so it can be re-run on every keystroke of a search box.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::event::Event;

/// The search/category/date-window/sort configuration of an event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub category: CategoryFilter,
    pub window: DateWindow,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// True when no predicate narrows the list (sort order is ignored).
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.category == CategoryFilter::All
            && self.window == DateWindow::All
    }
}

/// Category selector: `all` or an exact, case-sensitive tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => event.category.tag() == tag,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(tag) => write!(f, "{}", tag),
        }
    }
}

/// Which part of the timeline to show, relative to today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateWindow {
    #[default]
    All,
    /// Today and later
    Upcoming,
    /// Strictly before today
    Past,
}

impl DateWindow {
    /// Records whose date cannot be parsed are only kept by `All`.
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Upcoming => event.day().is_some_and(|day| day >= today),
            DateWindow::Past => event.day().is_some_and(|day| day < today),
        }
    }
}

impl FromStr for DateWindow {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DateWindow::All),
            "upcoming" => Ok(DateWindow::Upcoming),
            "past" => Ok(DateWindow::Past),
            other => Err(BoardError::InvalidInput(format!(
                "Unknown date window '{}'. Expected all, upcoming or past",
                other
            ))),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::All => write!(f, "all"),
            DateWindow::Upcoming => write!(f, "upcoming"),
            DateWindow::Past => write!(f, "past"),
        }
    }
}

/// List ordering. Serialized as `date-desc`, `date-asc`, `title-asc`, `title-desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    /// Compare two events under this key. Malformed dates order before
    /// every valid date.
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self {
            SortKey::DateDesc => b.day().cmp(&a.day()),
            SortKey::DateAsc => a.day().cmp(&b.day()),
            SortKey::TitleAsc => collate(&a.title, &b.title),
            SortKey::TitleDesc => collate(&b.title, &a.title),
        }
    }
}

impl FromStr for SortKey {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" => Ok(SortKey::DateDesc),
            "date-asc" => Ok(SortKey::DateAsc),
            "title-asc" => Ok(SortKey::TitleAsc),
            "title-desc" => Ok(SortKey::TitleDesc),
            other => Err(BoardError::InvalidInput(format!(
                "Unknown sort '{}'. Expected date-desc, date-asc, title-asc or title-desc",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        };
        write!(f, "{}", s)
    }
}

/// Human-friendly string ordering: letters compare case-insensitively
/// first, and the raw text only breaks ties, so "apple" < "Banana" < "banana".
///
/// Accents are not folded: "Éco" orders after "Zoo", unlike a locale-aware
/// collation that would put it with the other "E" titles.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        // Lowercase sorts before uppercase on ties, as in common locale collations.
        a.chars()
            .map(|c| (c.is_uppercase(), c))
            .cmp(b.chars().map(|c| (c.is_uppercase(), c)))
    })
}

/// Filter and sort `records` for display.
///
/// Sorting is stable: records with equal keys keep their input order.
pub fn apply(records: &[Event], criteria: &FilterCriteria, today: NaiveDate) -> Vec<Event> {
    let needle = criteria.search.to_lowercase();

    let mut filtered: Vec<Event> = records
        .iter()
        .filter(|event| needle.is_empty() || event.matches_search(&needle))
        .filter(|event| criteria.category.matches(event))
        .filter(|event| criteria.window.matches(event, today))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| criteria.sort.compare(a, b));
    filtered
}

/// [`apply`] with today's date from the local clock.
pub fn apply_today(records: &[Event], criteria: &FilterCriteria) -> Vec<Event> {
    apply(records, criteria, chrono::Local::now().date_naive())
}

/// Why a filtered list came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// There are no records at all.
    NoRecords,
    /// Records exist, but none match the current criteria.
    NoMatches,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoRecords => "No Events Yet",
            EmptyState::NoMatches => "No Events Found",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoRecords => "Add a new event to create your first one!",
            EmptyState::NoMatches => "Try adjusting your filters or search terms.",
        }
    }
}

/// The visible events together with the size of the full collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub events: Vec<Event>,
    pub total: usize,
}

impl FilteredView {
    pub fn new(records: &[Event], criteria: &FilterCriteria, today: NaiveDate) -> Self {
        FilteredView {
            events: apply(records, criteria, today),
            total: records.len(),
        }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        match (self.events.is_empty(), self.total) {
            (false, _) => None,
            (true, 0) => Some(EmptyState::NoRecords),
            (true, _) => Some(EmptyState::NoMatches),
        }
    }
}
