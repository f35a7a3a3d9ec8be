use url::Url;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.bing.com";

const SEARCH_PATH: &str = "/search";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchUrlError {
    #[error("invalid search base url {base}: {message}")]
    InvalidBase { base: String, message: String },
}

/// Builds `<base>/search?q=<word>` with standard query-string encoding.
pub fn search_url(base: &str, word: &str) -> Result<String, SearchUrlError> {
    let mut url = search_endpoint(base)?;
    url.query_pairs_mut().append_pair("q", word);
    Ok(url.into())
}

/// The header-rewrite pattern covering every search URL under `base`.
pub fn search_url_pattern(base: &str) -> Result<UrlPattern, SearchUrlError> {
    let mut url = search_endpoint(base)?;
    url.set_query(Some("q="));
    Ok(UrlPattern::new(format!("{url}*")))
}

fn search_endpoint(base: &str) -> Result<Url, SearchUrlError> {
    let mut url = Url::parse(base).map_err(|err| SearchUrlError::InvalidBase {
        base: base.to_string(),
        message: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(SearchUrlError::InvalidBase {
            base: base.to_string(),
            message: "url cannot carry a path".into(),
        });
    }
    url.set_path(SEARCH_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Glob over full URLs where `*` matches any run of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern(String);

impl UrlPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let mut pieces = self.0.split('*');
        let head = pieces.next().unwrap_or("");
        let Some(mut rest) = candidate.strip_prefix(head) else {
            return false;
        };
        let tail: Vec<&str> = pieces.collect();
        let Some((last, middle)) = tail.split_last() else {
            // No wildcard at all: exact match.
            return rest.is_empty();
        };
        for piece in middle {
            match rest.find(piece) {
                Some(idx) => rest = &rest[idx + piece.len()..],
                None => return false,
            }
        }
        rest.ends_with(last)
    }
}
