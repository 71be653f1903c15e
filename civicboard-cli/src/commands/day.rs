use anyhow::Result;
use chrono::Local;
use civicboard_core::Board;
use civicboard_core::calendar::events_on;
use civicboard_core::event::parse_date;
use civicboard_core::store::RecordStore;
use owo_colors::OwoColorize;

use crate::render::EventRender;

/// Every event on one day, including those a calendar cell has no room for.
pub fn run(board: &Board, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let today = Local::now().date_naive();
    let records = board.events()?.list()?;
    let events = events_on(&records, date);

    println!("{}", date.format("%A, %B %-d, %Y").bold());
    println!();

    if events.is_empty() {
        println!("{}", "No events on this day".dimmed());
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event.render(today));
    }

    Ok(())
}
