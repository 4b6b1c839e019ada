//! Diagnostics command.

use anyhow::Result;
use colored::Colorize;
use heartlog_core::store::image::IMAGES_DIR;
use heartlog_core::{Config, Store};

pub fn execute(config: &Config) -> Result<()> {
    println!("{}", "heartlog Doctor".cyan().bold());
    println!("{}", "─".repeat(50));
    println!();

    let issues = run_checks(config);

    // Summary
    println!();
    if issues.is_empty() {
        println!("{}", "All checks passed!".green().bold());
    } else {
        println!("{}", format!("{} issue(s) found:", issues.len()).red().bold());
        for issue in &issues {
            println!("  {} {}", "•".red(), issue);
        }
    }

    Ok(())
}

/// Print each check and collect the problems found.
fn run_checks(config: &Config) -> Vec<&'static str> {
    let mut issues = Vec::new();

    // Check config file
    print!("  Config file: ");
    let config_path = Config::config_path();
    if config_path.exists() {
        println!("{}", format!("✓ {}", config_path.display()).green());
    } else {
        println!("{}", "○ not found (using defaults)".yellow());
    }

    // Check data directory
    print!("  Data directory: ");
    let data_dir = &config.paths.data_dir;
    match Store::open(data_dir) {
        Ok(_) => println!("{}", format!("✓ {}", data_dir.display()).green()),
        Err(e) => {
            println!("{}", format!("✗ {}", e).red());
            issues.push("Data directory is not writable");
        }
    }

    // Check tables
    for table in ["memories.json", "emotions.json", "today_word.json"] {
        print!("  {}: ", table);
        let path = data_dir.join(table);
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<serde_json::Value>(&content) {
                Ok(_) => println!("{}", "✓ readable".green()),
                Err(_) => {
                    println!("{}", "✗ malformed (reads as empty)".red());
                    issues.push("A data table is malformed");
                }
            },
            Err(_) => println!("{}", "○ missing".yellow()),
        }
    }

    print!("  {}/: ", IMAGES_DIR);
    if data_dir.join(IMAGES_DIR).is_dir() {
        println!("{}", "✓ exists".green());
    } else {
        println!("{}", "○ missing".yellow());
    }

    // Check analyzer
    println!();
    println!("  {}", "Analyzer:".cyan());
    println!("    Endpoint: {}", config.analyzer.api_url);
    println!("    Model: {}", config.analyzer.model);
    println!("    Timeout: {}s", config.analyzer.timeout_secs);
    print!("    API key: ");
    if config.has_api_key() {
        println!("{}", "✓ configured".green());
    } else {
        println!("{}", "✗ missing".red());
        issues.push("No API key - set OPENAI_API_KEY or analyzer.api_key");
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.paths.data_dir = dir.join("data");
        config.analyzer.api_key = Some("sk-test".into());
        config
    }

    #[test]
    fn test_doctor_initializes_data_dir() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());

        execute(&config).unwrap();

        let data_dir = &config.paths.data_dir;
        assert!(data_dir.join("memories.json").exists());
        assert!(data_dir.join("emotions.json").exists());
        assert!(data_dir.join("today_word.json").exists());
        assert!(data_dir.join(IMAGES_DIR).is_dir());
        assert!(run_checks(&config).is_empty());
    }

    #[test]
    fn test_doctor_reports_problems() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.analyzer.api_key = None;

        Store::open(&config.paths.data_dir).unwrap();
        std::fs::write(config.paths.data_dir.join("emotions.json"), "{broken").unwrap();

        let issues = run_checks(&config);
        assert!(issues.contains(&"A data table is malformed"));
        assert!(issues.iter().any(|i| i.starts_with("No API key")));
    }
}
