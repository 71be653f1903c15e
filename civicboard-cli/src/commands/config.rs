use anyhow::Result;
use civicboard_core::Board;
use civicboard_core::config::BoardConfig;
use owo_colors::OwoColorize;

pub fn run(board: &Board) -> Result<()> {
    let config_path = BoardConfig::config_path()?;
    let data_path = board.data_path();
    let config = board.config();

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", board.display_path().display());
    println!("  Events:  {}", data_path.join("events.json").display());
    println!("  Media:   {}", data_path.join("media.json").display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Default sort:  {}", config.default_sort);
    println!("  Seed samples:  {}", config.seed_samples);

    Ok(())
}
