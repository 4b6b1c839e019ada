//! Emotion history command.

use anyhow::{Context, Result};
use colored::Colorize;
use heartlog_core::emotion::{build_distribution, ranked, render_chart, ChartStyle};
use heartlog_core::time::format_date_korean;
use heartlog_core::Store;
use std::path::Path;

use crate::cli::EmotionsArgs;

const BAR_WIDTH: usize = 30;

/// Execute emotions command.
pub fn execute(args: EmotionsArgs, store: &Store) -> Result<()> {
    let records = store.load_all_emotions();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("{} No emotion records yet", "⚠".yellow());
    } else {
        println!("{}", "Emotion distribution".cyan().bold());
        println!("{}", "─".repeat(50));
        let ranked = ranked(&build_distribution(&records));
        let max = ranked.first().map(|(_, count)| *count).unwrap_or(0);
        for (label, count) in &ranked {
            println!("  {:<8} {} {}", label, bar(*count, max).magenta(), count);
        }

        println!();
        println!("{}", "Records".cyan().bold());
        println!("{}", "─".repeat(50));
        for record in &records {
            println!(
                "  {}  {}  {}",
                format_date_korean(&record.date),
                record.emotion.bold(),
                record.reason.dimmed()
            );
        }
    }

    if let Some(path) = args.chart {
        write_chart(store, &path)?;
        if !args.json {
            println!();
            println!("{} Chart written to {}", "✓".green(), path.display());
        }
    }

    Ok(())
}

/// Horizontal bar scaled against the largest count.
fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "█".repeat((count * BAR_WIDTH).div_ceil(max))
}

fn write_chart(store: &Store, path: &Path) -> Result<()> {
    let distribution = build_distribution(&store.load_all_emotions());
    let png = render_chart(&distribution, &ChartStyle::default())?;
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(4, 4).chars().count(), BAR_WIDTH);
        assert_eq!(bar(2, 4).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 100).chars().count(), 1);
    }

    #[test]
    fn test_write_chart() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("data"));
        store
            .upsert_emotion(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "감사", "선물")
            .unwrap();

        let out = dir.path().join("chart.png");
        write_chart(&store, &out).unwrap();
        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
