use async_trait::async_trait;
use quest_core::{JobStatus, SearchSurface, SurfaceStatus};
use quest_engine::{SearchStatus, StatusError};
use quest_logging::{quest_info, quest_warn};

use crate::ledger::SearchLedger;

/// Local status collaborator: remaining searches are the configured targets
/// minus what the ledger has recorded.
pub struct QuotaStatus {
    pc_target: usize,
    mobile_target: usize,
    ledger: SearchLedger,
    pc_needed: usize,
    mobile_needed: usize,
    max_rounds: usize,
    rounds: usize,
    job_status: JobStatus,
}

impl QuotaStatus {
    pub fn new(
        pc_target: usize,
        mobile_target: usize,
        max_rounds: usize,
        ledger: SearchLedger,
    ) -> Self {
        let mut status = Self {
            pc_target,
            mobile_target,
            ledger,
            pc_needed: 0,
            mobile_needed: 0,
            max_rounds,
            rounds: 0,
            job_status: JobStatus::Busy,
        };
        status.recompute();
        status
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn recompute(&mut self) {
        self.pc_needed = self
            .pc_target
            .saturating_sub(self.ledger.count(SearchSurface::Pc));
        self.mobile_needed = self
            .mobile_target
            .saturating_sub(self.ledger.count(SearchSurface::Mobile));
    }
}

#[async_trait]
impl SearchStatus for QuotaStatus {
    fn search_status(&self, surface: SearchSurface) -> SurfaceStatus {
        match surface {
            SearchSurface::Pc => SurfaceStatus::needing(self.pc_needed),
            SearchSurface::Mobile => SurfaceStatus::needing(self.mobile_needed),
        }
    }

    async fn update(&mut self) -> Result<(), StatusError> {
        let before = (self.pc_needed, self.mobile_needed);
        self.rounds += 1;
        self.recompute();
        quest_info!(
            "quota after round {}: pc {} remaining, mobile {} remaining",
            self.rounds,
            self.pc_needed,
            self.mobile_needed
        );

        if self.is_search_completed() {
            self.job_status = JobStatus::Done;
        } else if self.rounds >= self.max_rounds {
            quest_warn!("quota still open after {} rounds", self.rounds);
            self.job_status = JobStatus::Error;
        } else if before == (self.pc_needed, self.mobile_needed) {
            quest_warn!("round {} made no progress", self.rounds);
            self.job_status = JobStatus::Warning;
        } else {
            self.job_status = JobStatus::Busy;
        }
        Ok(())
    }

    fn is_search_completed(&self) -> bool {
        self.pc_needed == 0 && self.mobile_needed == 0
    }

    fn job_status(&self) -> JobStatus {
        self.job_status
    }

    /// Local quotas are always internally consistent.
    fn is_summary_valid(&self) -> bool {
        true
    }
}
