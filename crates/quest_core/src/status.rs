use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a search job.
///
/// A job starts at `None`, becomes `Busy` when work begins and settles on
/// `Done` or `Error`. `Warning` is only ever reported by status collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    None,
    Busy,
    Done,
    Warning,
    Error,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::None => "none",
            JobStatus::Busy => "busy",
            JobStatus::Done => "done",
            JobStatus::Warning => "warning",
            JobStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Remaining work for one surface as reported by a status collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStatus {
    pub search_needed_count: usize,
}

impl SurfaceStatus {
    pub fn needing(search_needed_count: usize) -> Self {
        Self {
            search_needed_count,
        }
    }
}
