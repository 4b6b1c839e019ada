//! Today-word commands.

use anyhow::{Context, Result};
use colored::Colorize;
use heartlog_core::time::format_date_korean;
use heartlog_core::Store;

use crate::cli::{WordAction, WordCommand};

/// Execute today-word command.
pub fn execute(cmd: WordCommand, store: &Store) -> Result<()> {
    match cmd.action {
        WordAction::Show => show(store),
        WordAction::Set { word } => set(store, &word),
    }
}

fn show(store: &Store) -> Result<()> {
    let today_word = store.load_today_word();

    if today_word.word.is_empty() {
        println!("{} No word saved yet", "⚠".yellow());
        return Ok(());
    }

    println!("{}", format_date_korean(&today_word.date).cyan());
    println!("💌 {}", today_word.word);
    Ok(())
}

fn set(store: &Store, word: &str) -> Result<()> {
    let saved = store
        .save_today_word(word)
        .context("Failed to save today's word")?;

    println!(
        "{} Saved today's word for {}",
        "✓".green(),
        format_date_korean(&saved.date)
    );
    Ok(())
}
