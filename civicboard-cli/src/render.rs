//! Terminal rendering for civicboard types.
//!
//! Extension traits that add colored output to civicboard-core types using
//! owo_colors. Category colors come from `Category::rgb`, so the list, the
//! calendar and the day view all agree.

use chrono::NaiveDate;
use civicboard_core::calendar::{DayCell, MonthGrid, WEEKDAY_LABELS};
use civicboard_core::filter::EmptyState;
use civicboard_core::media::{MediaContent, VideoSource};
use civicboard_core::{Category, Event, Media};
use owo_colors::OwoColorize;

/// Width of one day column in the month grid, in characters.
const CELL_WIDTH: usize = 14;

/// Descriptions longer than this are cut short in listings.
const DESCRIPTION_WIDTH: usize = 72;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let (r, g, b) = self.rgb();
        self.tag().truecolor(r, g, b).to_string()
    }
}

impl Render for EmptyState {
    fn render(&self) -> String {
        format!("{}\n{}", self.title().bold(), self.message().dimmed())
    }
}

/// Event rendering needs to know today's date to mark past events.
pub trait EventRender {
    fn render(&self, today: NaiveDate) -> String;
}

impl EventRender for Event {
    fn render(&self, today: NaiveDate) -> String {
        let (r, g, b) = self.category.rgb();
        let title = if self.is_past(today) {
            self.title.dimmed().to_string()
        } else {
            self.title.bold().to_string()
        };

        let mut lines = vec![format!(
            "{} {}  {}",
            "●".truecolor(r, g, b),
            title,
            self.category.render()
        )];

        let mut when = format!("{} at {}", self.display_date(), self.display_time());
        if !self.location.is_empty() {
            when = format!("{} · {}", when, self.location);
        }
        lines.push(format!("  {}", when.dimmed()));

        if !self.description.is_empty() {
            lines.push(format!("  {}", truncate(&self.description, DESCRIPTION_WIDTH)));
        }
        lines.push(format!("  {}", self.id.dimmed()));

        lines.join("\n")
    }
}

impl Render for Media {
    fn render(&self) -> String {
        let label = if self.label().is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            self.label().bold().to_string()
        };

        let mut lines = vec![format!("{} {}", self.kind().to_string().cyan(), label)];

        match &self.content {
            MediaContent::Photo { url, .. } => {
                lines.push(format!("  {}", url.dimmed()));
            }
            MediaContent::Video {
                url, description, ..
            } => {
                lines.push(format!("  {}", url.dimmed()));
                if let Some(source) = self.video_source()
                    && !matches!(source, VideoSource::Direct { .. })
                {
                    lines.push(format!("  {} {}", "embed:".dimmed(), source.embed_url()));
                }
                if !description.is_empty() {
                    lines.push(format!("  {}", truncate(description, DESCRIPTION_WIDTH)));
                }
            }
            MediaContent::Presentation {
                url,
                description,
                date,
                format,
                ..
            } => {
                lines.push(format!("  {}", url.dimmed()));
                let date = self
                    .presentation_date()
                    .map(|d| d.format("%b %-d, %Y").to_string())
                    .unwrap_or_else(|| date.clone());
                let details: Vec<&str> = [format.as_str(), date.as_str()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect();
                if !details.is_empty() {
                    lines.push(format!("  {}", details.join(" · ")));
                }
                if !description.is_empty() {
                    lines.push(format!("  {}", truncate(description, DESCRIPTION_WIDTH)));
                }
            }
        }
        lines.push(format!("  {}", self.id.dimmed()));

        lines.join("\n")
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = vec![self.title().bold().to_string()];

        let header: Vec<String> = WEEKDAY_LABELS.iter().map(|l| pad(l)).collect();
        lines.push(header.join(" ").dimmed().to_string());

        for week in self.weeks() {
            lines.push(join_cells(week, render_day_number));

            // One line per inline event, plus one for "+N more" where needed
            let depth = week
                .iter()
                .filter_map(DayCell::month_day)
                .map(|day| day.inline_events().len() + usize::from(day.overflow() > 0))
                .max()
                .unwrap_or(0);

            for row in 0..depth {
                lines.push(join_cells(week, |cell| render_cell_line(cell, row)));
            }
        }

        lines.join("\n")
    }
}

fn join_cells(week: &[DayCell], render: impl Fn(&DayCell) -> String) -> String {
    week.iter().map(render).collect::<Vec<_>>().join(" ")
}

fn render_day_number(cell: &DayCell) -> String {
    let number = cell.day().to_string();
    let padding = " ".repeat(CELL_WIDTH.saturating_sub(number.len()));

    match cell {
        DayCell::OtherMonth { .. } => format!("{}{}", number.dimmed(), padding),
        DayCell::InMonth(day) if day.is_today => {
            format!("{}{}", number.reversed().bold(), padding)
        }
        DayCell::InMonth(_) => format!("{}{}", number.bold(), padding),
    }
}

fn render_cell_line(cell: &DayCell, row: usize) -> String {
    let blank = " ".repeat(CELL_WIDTH);
    let Some(day) = cell.month_day() else {
        return blank;
    };

    let inline = day.inline_events();
    if let Some(event) = inline.get(row) {
        let (r, g, b) = event.category.rgb();
        pad(&event.title).truecolor(r, g, b).to_string()
    } else if row == inline.len() && day.overflow() > 0 {
        pad(&format!("+{} more", day.overflow())).dimmed().to_string()
    } else {
        blank
    }
}

/// Pad or cut `text` to exactly one grid column.
fn pad(text: &str) -> String {
    format!("{:<width$}", truncate(text, CELL_WIDTH), width = CELL_WIDTH)
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
