//! Search quest engine: collaborator seams, IO and the search orchestrator.
mod error;
mod fetch;
mod hook;
mod orchestrator;
mod persist;
mod status;
mod types;
mod words;

pub use error::{QuestError, StatusError, WordSourceError};
pub use fetch::{FetchSettings, ReqwestSearchFetcher, SearchFetcher};
pub use hook::{HeaderRewriter, UserAgentOverrides, UserAgentRule};
pub use orchestrator::{QuestSettings, SearchOrchestrator, SEARCH_OPERATION};
pub use persist::{ensure_state_dir, PersistError, StateFile};
pub use status::SearchStatus;
pub use types::{FailureKind, FetchError, FetchResponse};
pub use words::{PoolWordSource, WordSource};
