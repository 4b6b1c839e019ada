//! Memory timeline command.

use anyhow::{anyhow, Result};
use colored::Colorize;
use heartlog_core::time::{format_date_korean, parse_date};
use heartlog_core::{Memory, Store};

use crate::cli::MemoriesArgs;

/// Execute memories command.
pub fn execute(args: MemoriesArgs, store: &Store) -> Result<()> {
    let memories = select(store, args.recent, args.date.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&memories)?);
        return Ok(());
    }

    if memories.is_empty() {
        println!("{} No memories found", "⚠".yellow());
        return Ok(());
    }

    println!("{} {} memories", "✓".green(), memories.len());
    println!();
    for memory in &memories {
        print_memory(memory);
    }
    Ok(())
}

/// Apply the date filter, then the recent limit.
fn select(store: &Store, recent: Option<usize>, date: Option<&str>) -> Result<Vec<Memory>> {
    let mut memories = match date {
        Some(raw) => {
            let date = parse_date(raw)
                .ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD", raw))?;
            store.load_memories_by_date(date)
        }
        None => store.load_all_memories(),
    };

    if let Some(n) = recent {
        memories.truncate(n);
    }
    Ok(memories)
}

fn print_memory(memory: &Memory) {
    println!(
        "{}  {}",
        format_date_korean(&memory.date).cyan(),
        memory.title.bold()
    );
    println!("  🌟 {}", memory.summary);
    println!("  💭 {}", memory.emotion);
    println!("  💌 {}", memory.empathy);
    if let Some(path) = &memory.image_path {
        println!("  📷 {}", path.dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use heartlog_core::NewMemory;

    fn seeded_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("data"));
        for (day, title) in [(1, "a"), (3, "b"), (3, "c")] {
            store
                .append_memory_on(
                    NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                    NewMemory {
                        title: title.into(),
                        content: "대화".into(),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        (store, dir)
    }

    fn titles(memories: &[Memory]) -> Vec<&str> {
        memories.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_select() {
        let (store, _dir) = seeded_store();

        assert_eq!(titles(&select(&store, None, None).unwrap()), vec!["c", "b", "a"]);
        assert_eq!(titles(&select(&store, Some(2), None).unwrap()), vec!["c", "b"]);
        assert_eq!(
            titles(&select(&store, None, Some("2024-02-01")).unwrap()),
            vec!["a"]
        );
        assert_eq!(
            titles(&select(&store, Some(1), Some("2024-02-03")).unwrap()),
            vec!["c"]
        );
        assert!(select(&store, None, Some("02/03/2024")).is_err());
    }
}
