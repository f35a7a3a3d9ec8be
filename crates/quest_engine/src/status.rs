use quest_core::{JobStatus, SearchSurface, SurfaceStatus};

use crate::StatusError;

/// External progress tracker that knows how many searches each surface
/// still needs.
///
/// The orchestrator reads it before every round and asks it to refresh
/// itself afterwards; how it refreshes is up to the implementation.
#[async_trait::async_trait]
pub trait SearchStatus: Send {
    fn search_status(&self, surface: SearchSurface) -> SurfaceStatus;

    async fn update(&mut self) -> Result<(), StatusError>;

    fn is_search_completed(&self) -> bool;

    fn job_status(&self) -> JobStatus;

    fn is_summary_valid(&self) -> bool;

    fn pc_search_status(&self) -> SurfaceStatus {
        self.search_status(SearchSurface::Pc)
    }

    fn mb_search_status(&self) -> SurfaceStatus {
        self.search_status(SearchSurface::Mobile)
    }
}
