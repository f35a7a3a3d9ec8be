use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quest_core::SearchSurface;
use quest_engine::{FetchError, FetchResponse, SearchFetcher, UserAgentOverrides};

/// Successful searches per surface, shared between the fetcher that records
/// them and the status that reads them.
#[derive(Debug, Clone, Default)]
pub struct SearchLedger {
    pc: Arc<AtomicUsize>,
    mobile: Arc<AtomicUsize>,
}

impl SearchLedger {
    pub fn record(&self, surface: SearchSurface) {
        self.counter(surface).fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self, surface: SearchSurface) -> usize {
        self.counter(surface).load(Ordering::Relaxed)
    }

    fn counter(&self, surface: SearchSurface) -> &AtomicUsize {
        match surface {
            SearchSurface::Pc => &self.pc,
            SearchSurface::Mobile => &self.mobile,
        }
    }
}

/// Credits every 200 response to the surface whose user agent was applied.
pub struct LedgerFetcher<F> {
    inner: F,
    overrides: UserAgentOverrides,
    ledger: SearchLedger,
}

impl<F> LedgerFetcher<F> {
    pub fn new(inner: F, overrides: UserAgentOverrides, ledger: SearchLedger) -> Self {
        Self {
            inner,
            overrides,
            ledger,
        }
    }
}

#[async_trait::async_trait]
impl<F: SearchFetcher> SearchFetcher for LedgerFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self.inner.fetch(url).await?;
        if response.status == 200 {
            let surface = self
                .overrides
                .user_agent_for(url)
                .and_then(|user_agent| SearchSurface::from_user_agent(&user_agent));
            if let Some(surface) = surface {
                self.ledger.record(surface);
            }
        }
        Ok(response)
    }
}
