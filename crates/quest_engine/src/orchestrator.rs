use std::sync::Arc;

use quest_core::{
    search_url, search_url_pattern, JobStatus, SearchCursor, SearchSurface, SearchUrlError,
    UrlPattern, DEFAULT_SEARCH_BASE_URL,
};
use quest_logging::{quest_debug, quest_error, quest_info, quest_warn};

use crate::{HeaderRewriter, QuestError, SearchFetcher, SearchStatus, WordSource, WordSourceError};

/// Operation tag carried by fetch errors raised from a burst.
pub const SEARCH_OPERATION: &str = "search";

#[derive(Debug, Clone)]
pub struct QuestSettings {
    pub search_base_url: String,
}

impl Default for QuestSettings {
    fn default() -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
        }
    }
}

/// Drives desktop and mobile searches until the status collaborator reports
/// the quest as completed or failed.
///
/// Each round tops up the word source, runs the PC burst and then the mobile
/// burst, and asks the status to refresh itself. Cursors persist across
/// rounds and across `do_work` calls, and only advance once a search came
/// back with status 200.
pub struct SearchOrchestrator {
    settings: QuestSettings,
    url_pattern: UrlPattern,
    words: Box<dyn WordSource>,
    fetcher: Arc<dyn SearchFetcher>,
    rewriter: Arc<dyn HeaderRewriter>,
    pc_cursor: SearchCursor,
    mb_cursor: SearchCursor,
    current_search_count: usize,
    current_surface: Option<SearchSurface>,
    job_status: JobStatus,
}

impl SearchOrchestrator {
    pub fn new(
        settings: QuestSettings,
        words: Box<dyn WordSource>,
        fetcher: Arc<dyn SearchFetcher>,
        rewriter: Arc<dyn HeaderRewriter>,
    ) -> Result<Self, SearchUrlError> {
        let url_pattern = search_url_pattern(&settings.search_base_url)?;
        Ok(Self {
            settings,
            url_pattern,
            words,
            fetcher,
            rewriter,
            pc_cursor: SearchCursor::new(),
            mb_cursor: SearchCursor::new(),
            current_search_count: 0,
            current_surface: None,
            job_status: JobStatus::None,
        })
    }

    /// Resume from cursor positions saved by an earlier run.
    pub fn with_cursors(mut self, pc: SearchCursor, mobile: SearchCursor) -> Self {
        self.pc_cursor = pc;
        self.mb_cursor = mobile;
        self
    }

    pub fn job_status(&self) -> JobStatus {
        self.job_status
    }

    pub fn cursor(&self, surface: SearchSurface) -> SearchCursor {
        match surface {
            SearchSurface::Pc => self.pc_cursor,
            SearchSurface::Mobile => self.mb_cursor,
        }
    }

    pub fn current_surface(&self) -> Option<SearchSurface> {
        self.current_surface
    }

    pub fn current_search_count(&self) -> usize {
        self.current_search_count
    }

    pub fn words(&self) -> &[String] {
        self.words.words()
    }

    /// Back to a freshly constructed state. The word sequence is kept.
    pub fn reset(&mut self) {
        self.pc_cursor = SearchCursor::new();
        self.mb_cursor = SearchCursor::new();
        self.current_search_count = 0;
        self.current_surface = None;
        self.job_status = JobStatus::None;
    }

    /// Runs rounds until the status reports completion or failure.
    ///
    /// Any error aborts the job, flips the job status to `Error` and is
    /// returned as is. A status that reports an error or an invalid summary
    /// also ends in `Error`, but is not itself an `Err`.
    pub async fn do_work(&mut self, status: &mut dyn SearchStatus) -> Result<(), QuestError> {
        self.job_status = JobStatus::Busy;
        quest_info!(
            "search job started (pc cursor {}, mobile cursor {})",
            self.pc_cursor.position(),
            self.mb_cursor.position()
        );

        match self.run_closed_loop(status).await {
            Ok(()) => {
                quest_info!("search job finished with status {}", self.job_status);
                Ok(())
            }
            Err(err) => {
                self.job_status = JobStatus::Error;
                quest_error!("search job failed: {err}");
                Err(err)
            }
        }
    }

    async fn run_closed_loop(&mut self, status: &mut dyn SearchStatus) -> Result<(), QuestError> {
        let mut round: usize = 0;
        loop {
            round += 1;
            quest_info!(
                "search round {round}: pc needs {}, mobile needs {}",
                status.pc_search_status().search_needed_count,
                status.mb_search_status().search_needed_count
            );
            let needs = SearchSurface::ALL
                .map(|surface| (surface, status.search_status(surface).search_needed_count));
            self.start_search_quests(needs).await?;

            status.update().await?;
            // Completion takes precedence over a reported error.
            if status.is_search_completed() {
                return Ok(());
            }
            if status.job_status() == JobStatus::Error || !status.is_summary_valid() {
                quest_warn!(
                    "status reported job status {} (summary valid: {}), giving up",
                    status.job_status(),
                    status.is_summary_valid()
                );
                self.job_status = JobStatus::Error;
                return Ok(());
            }
        }
    }

    /// One round: top up the words, then the PC burst followed by the mobile
    /// burst, then clean up.
    async fn start_search_quests(
        &mut self,
        needs: [(SearchSurface, usize); 2],
    ) -> Result<(), QuestError> {
        let required = self.words_required(&needs);
        let available = self.words.len();
        if required > available {
            quest_debug!("need {required} search words, have {available}");
            self.words.ensure_length(required).await?;
        }

        for (surface, needed) in needs {
            self.run_burst(surface, needed).await?;
        }

        self.quit_search_clean_up();
        Ok(())
    }

    fn words_required(&self, needs: &[(SearchSurface, usize)]) -> usize {
        needs
            .iter()
            .map(|&(surface, needed)| self.cursor(surface).position() + needed)
            .max()
            .unwrap_or(0)
    }

    async fn run_burst(&mut self, surface: SearchSurface, needed: usize) -> Result<(), QuestError> {
        self.current_search_count = 0;
        if self.current_surface != Some(surface) {
            self.prepare_surface(surface);
        }

        while self.current_search_count < needed {
            self.request_search(surface).await?;
            self.current_search_count += 1;
        }
        Ok(())
    }

    fn prepare_surface(&mut self, surface: SearchSurface) {
        quest_debug!("switching to {surface} searches");
        self.current_surface = Some(surface);
        self.rewriter.remove_all();
        self.rewriter.install(surface.user_agent(), &self.url_pattern);
    }

    async fn request_search(&mut self, surface: SearchSurface) -> Result<(), QuestError> {
        let position = self.cursor(surface).position();
        let url = {
            let words = self.words.words();
            let word = words
                .get(position)
                .ok_or(WordSourceError::Exhausted {
                    requested: position + 1,
                    available: words.len(),
                })?;
            search_url(&self.settings.search_base_url, word)?
        };

        quest_debug!(
            "{surface} search {} (word {position}): {url}",
            self.current_search_count + 1
        );
        let response = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| QuestError::FetchFailed {
                operation: SEARCH_OPERATION,
                surface,
                source,
            })?;
        if response.status != 200 {
            return Err(QuestError::ResponseAnomaly {
                operation: SEARCH_OPERATION,
                surface,
                status: response.status,
            });
        }

        match surface {
            SearchSurface::Pc => self.pc_cursor.advance(),
            SearchSurface::Mobile => self.mb_cursor.advance(),
        }
        Ok(())
    }

    fn quit_search_clean_up(&mut self) {
        if self.job_status == JobStatus::Busy {
            self.job_status = JobStatus::Done;
        }
        self.current_surface = None;
        self.rewriter.remove_all();
    }
}
