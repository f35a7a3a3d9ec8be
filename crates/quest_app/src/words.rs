use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use quest_logging::quest_info;

/// Reads a word list: one term per line, blank lines and `#` comments skipped,
/// duplicates dropped keeping the first occurrence.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    let words = parse_words(&text);
    ensure!(!words.is_empty(), "word list {} is empty", path.display());
    quest_info!("loaded {} search words from {}", words.len(), path.display());
    Ok(words)
}

pub fn parse_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(line.to_string()))
        .map(ToOwned::to_owned)
        .collect()
}
