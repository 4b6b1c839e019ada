//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// heartlog - a shared journal for two
///
/// Keeps a daily word, a timeline of analyzed conversations and an emotion
/// history.
#[derive(Parser, Debug)]
#[command(name = "heartlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or set today's word
    Word(WordCommand),

    /// List saved memories, newest first
    Memories(MemoriesArgs),

    /// Show the emotion history and distribution
    Emotions(EmotionsArgs),

    /// Analyze a conversation transcript
    Analyze(AnalyzeArgs),

    /// Run diagnostics
    Doctor,

    /// Show version
    Version,
}

// ─────────────────────────────────────────────────────────────────────────────
// Today-word Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct WordCommand {
    #[command(subcommand)]
    pub action: WordAction,
}

#[derive(Subcommand, Debug)]
pub enum WordAction {
    /// Print the saved word
    Show,

    /// Replace the saved word
    Set {
        /// The word or sentence to keep for today
        word: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct MemoriesArgs {
    /// Only the N most recent memories
    #[arg(short, long)]
    pub recent: Option<usize>,

    /// Only memories from this day (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Emotion Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct EmotionsArgs {
    /// Write the distribution chart as PNG to this file
    #[arg(short, long)]
    pub chart: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Title for the memory
    #[arg(short, long)]
    pub title: String,

    /// Transcript file (reads stdin when omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Photo to attach when saving
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Save the result as a memory dated today
    #[arg(short, long)]
    pub save: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}
