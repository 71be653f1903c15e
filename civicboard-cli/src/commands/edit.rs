use anyhow::Result;
use civicboard_core::Board;
use civicboard_core::store::RecordStore;
use owo_colors::OwoColorize;

use super::{EventFields, prompt_event};

/// Update an event in place. With no field flags, every field is prompted
/// for with its current value as the default.
pub fn run(board: &Board, id: &str, fields: EventFields) -> Result<()> {
    let store = board.events()?;
    let mut event = store.get(id)?;

    if fields.is_empty() {
        prompt_event(&mut event)?;
        println!();
    } else {
        fields.apply_to(&mut event)?;
    }

    let updated = store.update(event)?;
    println!("{}", format!("  Updated: {}", updated.title).green());

    Ok(())
}
