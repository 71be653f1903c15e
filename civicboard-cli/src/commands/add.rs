use anyhow::Result;
use civicboard_core::event::{parse_date, parse_time};
use civicboard_core::store::RecordStore;
use civicboard_core::{Board, Category, Event};
use owo_colors::OwoColorize;

use super::{EventFields, non_blank, prompt_category};
use crate::utils::prompt;

pub fn run(board: &Board, fields: EventFields) -> Result<()> {
    let interactive = fields.title.is_none() || fields.date.is_none();

    // --- Title ---
    let title = match fields.title {
        Some(t) => non_blank("title", t)?,
        None => prompt::required("Title", "")?,
    };

    // --- When ---
    let date = match fields.date {
        Some(d) => parse_date(&d)?,
        None => prompt::prompt_with_retry("Date (YYYY-MM-DD)", "", parse_date)?,
    };
    let time = match fields.time {
        Some(t) => parse_time(&t)?,
        None => prompt::prompt_with_retry("Time (HH:MM)", "", parse_time)?,
    };

    // --- Where ---
    let location = match fields.location {
        Some(l) => non_blank("location", l)?,
        None => prompt::required("Where?", "")?,
    };

    let description = match fields.description {
        Some(d) => d.trim().to_string(),
        None if interactive => prompt::optional("Description", "")?,
        None => String::new(),
    };

    let category = match fields.category {
        Some(c) => Category::from_tag(c.trim()),
        None if interactive => prompt_category(&Category::default())?,
        None => Category::default(),
    };

    let event = Event::new(title, date, time, location, description, category);
    let created = board.events()?.create(event)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", created.title).green());
    println!("  {}", created.id.dimmed());

    Ok(())
}
