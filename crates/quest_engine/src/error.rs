use quest_core::{SearchSurface, SearchUrlError};

use crate::FetchError;

/// Everything that can abort a search job.
///
/// Collaborator errors are carried transparently so callers see the original
/// message.
#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("{operation} on {surface} surface failed: {source}")]
    FetchFailed {
        operation: &'static str,
        surface: SearchSurface,
        #[source]
        source: FetchError,
    },
    #[error("{operation} on {surface} surface returned status {status}")]
    ResponseAnomaly {
        operation: &'static str,
        surface: SearchSurface,
        status: u16,
    },
    #[error(transparent)]
    WordSource(#[from] WordSourceError),
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error(transparent)]
    SearchUrl(#[from] SearchUrlError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordSourceError {
    #[error("word source exhausted: requested {requested} words, only {available} available")]
    Exhausted { requested: usize, available: usize },
    #[error("word source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("status unavailable: {0}")]
    Unavailable(String),
    #[error("status rejected: {0}")]
    Rejected(String),
}
