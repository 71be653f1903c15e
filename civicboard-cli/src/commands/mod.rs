pub mod add;
pub mod calendar;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod list;
pub mod media;

use anyhow::Result;
use civicboard_core::Category;
use civicboard_core::Event;
use civicboard_core::event::{DATE_FORMAT, TIME_FORMAT, parse_date, parse_time};
use clap::Args;

use crate::utils::prompt;

/// Event fields that can be given on the command line.
#[derive(Args, Debug, Default)]
pub struct EventFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time (HH:MM, 24-hour)
    #[arg(short, long)]
    pub time: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Community, Education, Advocacy, Volunteering, Workshop, Social (or any other tag)
    #[arg(short, long)]
    pub category: Option<String>,
}

impl EventFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.category.is_none()
    }

    /// Overwrite `event` with every field that was given, validating
    /// dates and times.
    pub fn apply_to(self, event: &mut Event) -> Result<()> {
        if let Some(title) = self.title {
            event.title = non_blank("title", title)?;
        }
        if let Some(date) = self.date {
            event.date = parse_date(&date)?.format(DATE_FORMAT).to_string();
        }
        if let Some(time) = self.time {
            event.time = parse_time(&time)?.format(TIME_FORMAT).to_string();
        }
        if let Some(location) = self.location {
            event.location = location.trim().to_string();
        }
        if let Some(description) = self.description {
            event.description = description.trim().to_string();
        }
        if let Some(category) = self.category {
            event.category = Category::from_tag(category.trim());
        }
        Ok(())
    }
}

fn non_blank(field: &str, value: String) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("The {} cannot be empty", field);
    }
    Ok(value.to_string())
}

/// Walk through every event field, offering `event`'s current values as defaults.
pub fn prompt_event(event: &mut Event) -> Result<()> {
    event.title = prompt::required("Title", &event.title)?;

    let date = prompt::prompt_with_retry("Date (YYYY-MM-DD)", &event.date, parse_date)?;
    event.date = date.format(DATE_FORMAT).to_string();

    let time = prompt::prompt_with_retry("Time (HH:MM)", &event.time, parse_time)?;
    event.time = time.format(TIME_FORMAT).to_string();

    event.location = prompt::required("Where?", &event.location)?;
    event.description = prompt::optional("Description", &event.description)?;
    event.category = prompt_category(&event.category)?;

    Ok(())
}

fn prompt_category(current: &Category) -> Result<Category> {
    let mut choices: Vec<Category> = Category::KNOWN.to_vec();
    if !current.is_known() {
        choices.push(current.clone());
    }

    let default = choices.iter().position(|c| c == current).unwrap_or(0);
    let selection = prompt::choose("Category", &choices, default)?;
    Ok(choices[selection].clone())
}
