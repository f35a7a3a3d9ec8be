use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use quest_core::{search_url_pattern, DEFAULT_SEARCH_BASE_URL};
use quest_engine::{FetchSettings, QuestSettings};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Settings read from the optional RON file; CLI flags win over the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    pub search_base_url: String,
    pub words_file: Option<PathBuf>,
    pub pc_searches: usize,
    pub mobile_searches: usize,
    pub max_rounds: usize,
    pub state_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
}

impl Default for QuestConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            words_file: None,
            pc_searches: 30,
            mobile_searches: 20,
            max_rounds: 3,
            state_dir: PathBuf::from("."),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            redirect_limit: fetch.redirect_limit,
        }
    }
}

impl QuestConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.base_url {
            self.search_base_url = url.clone();
        }
        if let Some(words) = &cli.words {
            self.words_file = Some(words.clone());
        }
        if let Some(pc) = cli.pc {
            self.pc_searches = pc;
        }
        if let Some(mobile) = cli.mobile {
            self.mobile_searches = mobile;
        }
        if let Some(max_rounds) = cli.max_rounds {
            self.max_rounds = max_rounds;
        }
        if let Some(dir) = &cli.state_dir {
            self.state_dir = dir.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.words_file.is_some(),
            "no word list given; pass --words or set words_file in the config"
        );
        ensure!(self.max_rounds > 0, "max_rounds must be at least 1");
        ensure!(
            self.pc_searches + self.mobile_searches > 0,
            "nothing to do: both pc and mobile search counts are zero"
        );
        search_url_pattern(&self.search_base_url).context("invalid search_base_url")?;
        Ok(())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
        }
    }

    pub fn quest_settings(&self) -> QuestSettings {
        QuestSettings {
            search_base_url: self.search_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config =
            QuestConfig::parse("(pc_searches: 5, words_file: Some(\"words.txt\"))").unwrap();
        assert_eq!(config.pc_searches, 5);
        assert_eq!(config.words_file, Some(PathBuf::from("words.txt")));
        assert_eq!(config.mobile_searches, QuestConfig::default().mobile_searches);
        assert_eq!(config.search_base_url, DEFAULT_SEARCH_BASE_URL);
    }

    #[test]
    fn unknown_syntax_is_an_error() {
        assert!(QuestConfig::parse("(pc_searches: \"many\")").is_err());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut config = QuestConfig::parse("(pc_searches: 5, mobile_searches: 4)").unwrap();
        let cli = Cli::parse_from([
            "search_quest",
            "--pc",
            "2",
            "--words",
            "list.txt",
            "--base-url",
            "http://127.0.0.1:9000",
        ]);

        config.apply_cli(&cli);

        assert_eq!(config.pc_searches, 2);
        assert_eq!(config.mobile_searches, 4);
        assert_eq!(config.words_file, Some(PathBuf::from("list.txt")));
        assert_eq!(config.search_base_url, "http://127.0.0.1:9000");
        config.validate().unwrap();
    }

    #[test]
    fn validation_rejects_unusable_configs() {
        let no_words = QuestConfig::default();
        assert!(no_words.validate().is_err());

        let nothing_to_do = QuestConfig {
            words_file: Some(PathBuf::from("w.txt")),
            pc_searches: 0,
            mobile_searches: 0,
            ..QuestConfig::default()
        };
        assert!(nothing_to_do.validate().is_err());

        let bad_url = QuestConfig {
            words_file: Some(PathBuf::from("w.txt")),
            search_base_url: "nope".to_string(),
            ..QuestConfig::default()
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn fetch_settings_use_configured_timeouts() {
        let config = QuestConfig {
            connect_timeout_secs: 3,
            request_timeout_secs: 7,
            redirect_limit: 1,
            ..QuestConfig::default()
        };
        let settings = config.fetch_settings();
        assert_eq!(settings.connect_timeout, Duration::from_secs(3));
        assert_eq!(settings.request_timeout, Duration::from_secs(7));
        assert_eq!(settings.redirect_limit, 1);
    }
}
