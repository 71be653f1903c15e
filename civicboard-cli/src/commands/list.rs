use anyhow::Result;
use chrono::Local;
use civicboard_core::Board;
use civicboard_core::filter::FilterCriteria;
use civicboard_core::state::BoardState;
use civicboard_core::store::RecordStore;
use owo_colors::OwoColorize;

use crate::render::{EventRender, Render};

pub fn run(board: &Board, criteria: FilterCriteria, json: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let records = board.events()?.list()?;

    let state = BoardState::new(records, today).with_criteria(criteria);
    let view = state.visible(today);

    if json {
        println!("{}", serde_json::to_string_pretty(&view.events)?);
        return Ok(());
    }

    if let Some(empty) = view.empty_state() {
        println!("{}", empty.render());
        return Ok(());
    }

    for (i, event) in view.events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event.render(today));
    }

    println!();
    let summary = if state.criteria.is_unfiltered() {
        format!("{} {}", view.total, pluralize("event", view.total))
    } else {
        format!(
            "Showing {} of {} {}",
            view.events.len(),
            view.total,
            pluralize("event", view.total)
        )
    };
    println!("{}", format!("{} · sorted {}", summary, state.criteria.sort).dimmed());

    Ok(())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
