use anyhow::Result;
use civicboard_core::BoardResult;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

/// Prompt until `parse` accepts the input, printing each parse error.
/// A non-empty `initial` is offered as the default answer.
pub fn prompt_with_retry<T, F>(prompt: &str, initial: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> BoardResult<T>,
{
    loop {
        let input = text(prompt, initial)?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Free-text prompt that must not be left blank.
pub fn required(prompt: &str, initial: &str) -> Result<String> {
    loop {
        let input = text(prompt, initial)?;
        if !input.trim().is_empty() {
            return Ok(input.trim().to_string());
        }
        eprintln!("  {}", "This field is required".red());
    }
}

/// Free-text prompt that may be skipped.
pub fn optional(prompt: &str, initial: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(format!("  {} (skip)", prompt))
        .default(initial.to_string())
        .show_default(!initial.is_empty())
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Pick one of `items`, starting on `default`.
pub fn choose<T: std::fmt::Display>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    let selection = Select::new()
        .with_prompt(format!("  {}", prompt))
        .items(items)
        .default(default)
        .interact()?;
    Ok(selection)
}

/// Ask before a destructive action. `skip` answers yes without asking.
pub fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn text(prompt: &str, initial: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(format!("  {}", prompt))
        .allow_empty(true);
    if !initial.is_empty() {
        input = input.default(initial.to_string());
    }
    Ok(input.interact_text()?)
}
