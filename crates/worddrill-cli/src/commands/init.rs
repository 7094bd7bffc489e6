//! The `worddrill init` command.

use std::path::Path;

use anyhow::{Context, Result};

use worddrill_sources::config::starter_config;

pub fn execute() -> Result<()> {
    let path = Path::new("worddrill.toml");
    if path.exists() {
        println!("worddrill.toml already exists, skipping.");
    } else {
        let body = format!("{HEADER}{}", starter_config()?);
        std::fs::write(path, body).context("failed to write worddrill.toml")?;
        println!("Created worddrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [datasets.*] at your own sheet exports, or keep the defaults");
    println!("  2. Run: worddrill inspect --kind nouns");
    println!("  3. Run: worddrill practice --mode gender");

    Ok(())
}

const HEADER: &str = r#"# worddrill configuration
#
# Each dataset has a kind (nouns, verbs, verb-persons) and either a url
# (CSV export) or a local path. ${VAR} references are expanded.
#
# [datasets.persons]
# kind = "verb-persons"
# path = "./verb-persons.csv"

"#;
