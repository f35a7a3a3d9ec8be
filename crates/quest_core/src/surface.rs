use std::fmt;

/// Sent on mobile searches. Must stay byte-for-byte stable.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 4.0.4; Galaxy Nexus Build/IMM76B) AppleWebKit/535.19 (KHTML, like Gecko) Chrome/18.0.1025.133 Mobile Safari/535.19";

/// Sent on desktop searches. Must stay byte-for-byte stable.
pub const EDGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/64.0.3282.140 Safari/537.36 Edge/17.17134";

/// One of the two search contexts, each with its own quota and user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchSurface {
    Pc,
    Mobile,
}

impl SearchSurface {
    /// Bursts always run in this order.
    pub const ALL: [SearchSurface; 2] = [SearchSurface::Pc, SearchSurface::Mobile];

    pub fn user_agent(self) -> &'static str {
        match self {
            SearchSurface::Pc => EDGE_USER_AGENT,
            SearchSurface::Mobile => MOBILE_USER_AGENT,
        }
    }

    /// Maps a user-agent header value back to the surface that installs it.
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|surface| surface.user_agent() == user_agent)
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchSurface::Pc => "pc",
            SearchSurface::Mobile => "mobile",
        }
    }
}

impl fmt::Display for SearchSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
