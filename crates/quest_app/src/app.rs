use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use quest_core::{JobStatus, SearchCursor, SearchSurface};
use quest_engine::{PoolWordSource, ReqwestSearchFetcher, SearchOrchestrator, UserAgentOverrides};
use quest_logging::{quest_info, quest_warn};

use crate::config::QuestConfig;
use crate::ledger::{LedgerFetcher, SearchLedger};
use crate::quota::QuotaStatus;
use crate::state::{self, PersistedState};
use crate::words;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub job_status: JobStatus,
    pub pc_searches: usize,
    pub mobile_searches: usize,
    pub pc_cursor: usize,
    pub mobile_cursor: usize,
}

/// One search job: restore cursors, search until the quota is met, save
/// cursors. Cursors are saved even when the job fails.
pub async fn run(config: &QuestConfig, fresh: bool) -> Result<RunSummary> {
    let words_file = config
        .words_file
        .as_deref()
        .context("no word list configured")?;
    let words = words::load_words(words_file)?;
    let previous = if fresh {
        PersistedState::default()
    } else {
        state::load_state(&config.state_dir)
    };
    let pc_start = resume_cursor(
        SearchSurface::Pc,
        previous.pc_cursor,
        config.pc_searches,
        words.len(),
    );
    let mobile_start = resume_cursor(
        SearchSurface::Mobile,
        previous.mobile_cursor,
        config.mobile_searches,
        words.len(),
    );

    let overrides = UserAgentOverrides::new();
    let ledger = SearchLedger::default();
    let fetcher = LedgerFetcher::new(
        ReqwestSearchFetcher::new(config.fetch_settings(), overrides.clone()),
        overrides.clone(),
        ledger.clone(),
    );
    let mut orchestrator = SearchOrchestrator::new(
        config.quest_settings(),
        Box::new(PoolWordSource::new(words)),
        Arc::new(fetcher),
        Arc::new(overrides),
    )?
    .with_cursors(
        SearchCursor::starting_at(pc_start),
        SearchCursor::starting_at(mobile_start),
    );
    let mut status = QuotaStatus::new(
        config.pc_searches,
        config.mobile_searches,
        config.max_rounds,
        ledger.clone(),
    );

    let result = orchestrator.do_work(&mut status).await;

    let summary = RunSummary {
        job_status: orchestrator.job_status(),
        pc_searches: ledger.count(SearchSurface::Pc),
        mobile_searches: ledger.count(SearchSurface::Mobile),
        pc_cursor: orchestrator.cursor(SearchSurface::Pc).position(),
        mobile_cursor: orchestrator.cursor(SearchSurface::Mobile).position(),
    };
    save_summary(&config.state_dir, &summary);
    result.context("search job failed")?;

    quest_info!(
        "search quest {} after {} round(s)",
        summary.job_status,
        status.rounds()
    );
    Ok(summary)
}

/// A saved cursor is kept only while the word list still holds enough words
/// past it for this run's target. Otherwise the surface starts over.
fn resume_cursor(surface: SearchSurface, saved: usize, target: usize, word_count: usize) -> usize {
    if saved + target <= word_count {
        return saved;
    }
    if saved > 0 {
        quest_warn!(
            "{surface} cursor {saved} leaves fewer than {target} of the {word_count} loaded words, \
             starting over"
        );
    }
    0
}

fn save_summary(state_dir: &Path, summary: &RunSummary) {
    state::save_state(
        state_dir,
        &PersistedState {
            pc_cursor: summary.pc_cursor,
            mobile_cursor: summary.mobile_cursor,
            last_run_utc: Some(Utc::now().to_rfc3339()),
            last_status: Some(summary.job_status),
        },
    );
}
