use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogDestination;

/// Runs desktop and mobile search quests until their quotas are met.
#[derive(Debug, Parser)]
#[command(name = "search_quest", version, about)]
pub struct Cli {
    /// RON configuration file.
    #[arg(short, long, env = "SEARCH_QUEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Word list, one search term per line.
    #[arg(short, long)]
    pub words: Option<PathBuf>,

    /// Desktop searches to perform.
    #[arg(long)]
    pub pc: Option<usize>,

    /// Mobile searches to perform.
    #[arg(long)]
    pub mobile: Option<usize>,

    /// Give up after this many status refreshes without completion.
    #[arg(long)]
    pub max_rounds: Option<usize>,

    /// Where resume state is kept.
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Search engine base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Ignore saved cursors and start from the first word.
    #[arg(long)]
    pub fresh: bool,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[arg(long, default_value = "info", value_parser = quest_logging::parse_level)]
    pub log_level: log::LevelFilter,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn log_level_defaults_to_info_and_rejects_typos() {
        let cli = Cli::parse_from(["search_quest"]);
        assert_eq!(cli.log_level, log::LevelFilter::Info);

        let cli = Cli::parse_from(["search_quest", "--log-level", "DEBUG"]);
        assert_eq!(cli.log_level, log::LevelFilter::Debug);

        assert!(Cli::try_parse_from(["search_quest", "--log-level", "verbose"]).is_err());
    }
}
