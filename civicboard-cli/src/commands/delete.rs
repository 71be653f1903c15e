use anyhow::Result;
use chrono::Local;
use civicboard_core::Board;
use civicboard_core::store::RecordStore;
use owo_colors::OwoColorize;

use crate::render::EventRender;
use crate::utils::prompt;

pub fn run(board: &Board, id: &str, yes: bool) -> Result<()> {
    let store = board.events()?;
    let event = store.get(id)?;

    println!("{}", event.render(Local::now().date_naive()));
    println!();

    if !prompt::confirm("Are you sure you want to delete this event?", yes)? {
        return Ok(());
    }

    let removed = store.delete(id)?;
    println!("{}", format!("  Deleted: {}", removed.title).red());

    Ok(())
}
