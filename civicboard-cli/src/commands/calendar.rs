use anyhow::Result;
use chrono::Local;
use civicboard_core::calendar::MonthCursor;
use civicboard_core::state::{BoardState, ViewMode};
use civicboard_core::store::RecordStore;
use civicboard_core::{Board, Category};

use crate::render::Render;

pub fn run(board: &Board, month: Option<&str>, offset: i64) -> Result<()> {
    let today = Local::now().date_naive();
    let records = board.events()?.list()?;

    let mut state = BoardState::new(records, today).with_view(ViewMode::Calendar);
    if let Some(month) = month {
        state.cursor = MonthCursor::parse(month)
            .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", month))?;
    }
    let state = state.navigate(offset);

    println!("{}", state.grid(today).render());
    println!();

    let legend: Vec<String> = Category::KNOWN.iter().map(Render::render).collect();
    println!("{}", legend.join("  "));

    Ok(())
}
