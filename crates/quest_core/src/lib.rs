//! Search quest core: pure domain types shared by the engine and the app.
mod cursor;
mod search_url;
mod status;
mod surface;

pub use cursor::SearchCursor;
pub use search_url::{
    search_url, search_url_pattern, SearchUrlError, UrlPattern, DEFAULT_SEARCH_BASE_URL,
};
pub use status::{JobStatus, SurfaceStatus};
pub use surface::{SearchSurface, EDGE_USER_AGENT, MOBILE_USER_AGENT};
