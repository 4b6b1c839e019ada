//! Conversation analysis command.

use anyhow::{Context, Result};
use colored::Colorize;
use heartlog_core::analyzer::validate_entry;
use heartlog_core::time::format_date_korean;
use heartlog_core::{Analysis, Analyzer, Config, NewMemory, Store};
use std::io::Read;
use std::path::Path;

use crate::cli::AnalyzeArgs;

/// Execute analyze command.
pub async fn execute(args: AnalyzeArgs, config: &Config, store: &Store) -> Result<()> {
    let transcript = read_transcript(args.file.as_deref())?;
    validate_entry(&args.title, &transcript)?;

    // Read the photo before the slow part so a bad path fails fast
    let image = args
        .image
        .as_deref()
        .map(|path| {
            std::fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))
        })
        .transpose()?;

    if !config.has_api_key() && !args.json {
        eprintln!(
            "{} No API key configured (set OPENAI_API_KEY); results will be placeholders",
            "⚠".yellow()
        );
    }

    let analyzer = Analyzer::from_config(&config.analyzer)?;
    let analysis = analyzer.analyze(&transcript).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }

    if args.save {
        let memory = store
            .append_memory(new_memory(args.title, transcript, analysis, image))
            .context("Failed to save memory")?;
        if !args.json {
            println!(
                "{} Saved \"{}\" for {}",
                "✓".green(),
                memory.title,
                format_date_korean(&memory.date)
            );
        }
    }

    Ok(())
}

fn read_transcript(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read transcript from stdin")?;
            Ok(text)
        }
    }
}

fn new_memory(
    title: String,
    transcript: String,
    analysis: Analysis,
    image: Option<Vec<u8>>,
) -> NewMemory {
    NewMemory {
        title,
        content: transcript,
        summary: analysis.summary,
        emotion: analysis.emotion,
        empathy: analysis.empathy,
        image,
    }
}

fn print_analysis(analysis: &Analysis) {
    println!("{}", "🌟 요약".cyan().bold());
    println!("  {}", analysis.summary);
    println!();
    println!("{}", "💭 감정 분석".cyan().bold());
    println!("  {}", analysis.emotion);
    println!();
    println!("{}", "💌 공감 멘트".cyan().bold());
    println!("  {}", analysis.empathy);
    println!();
}
