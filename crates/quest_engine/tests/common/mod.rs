#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use quest_core::{JobStatus, SearchSurface, SurfaceStatus, UrlPattern};
use quest_engine::{
    FetchError, FetchResponse, HeaderRewriter, SearchFetcher, SearchStatus, StatusError,
    UserAgentOverrides, WordSource, WordSourceError,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(quest_logging::initialize_for_tests);
}

/// Everything the collaborators saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    EnsureLength(usize),
    Install { user_agent: String },
    RemoveAll,
    Fetch { url: String, surface: Option<SearchSurface> },
    StatusUpdate,
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Journal {
    pub fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<(String, Option<SearchSurface>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Fetch { url, surface } => Some((url, surface)),
                _ => None,
            })
            .collect()
    }

    pub fn fetch_surfaces(&self) -> Vec<Option<SearchSurface>> {
        self.fetches().into_iter().map(|(_, surface)| surface).collect()
    }
}

pub fn words(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("word{i}")).collect()
}

/// Word source that grows with generated words, optionally failing.
pub struct FakeWordSource {
    words: Vec<String>,
    journal: Journal,
    failure: Option<WordSourceError>,
    grows: bool,
}

impl FakeWordSource {
    pub fn new(initial: Vec<String>, journal: Journal) -> Self {
        Self {
            words: initial,
            journal,
            failure: None,
            grows: true,
        }
    }

    pub fn failing(initial: Vec<String>, journal: Journal, failure: WordSourceError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(initial, journal)
        }
    }

    /// Reports success without adding any words.
    pub fn stubborn(initial: Vec<String>, journal: Journal) -> Self {
        Self {
            grows: false,
            ..Self::new(initial, journal)
        }
    }
}

#[async_trait::async_trait]
impl WordSource for FakeWordSource {
    fn words(&self) -> &[String] {
        &self.words
    }

    async fn ensure_length(&mut self, len: usize) -> Result<(), WordSourceError> {
        self.journal.push(Event::EnsureLength(len));
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        while self.grows && self.words.len() < len {
            let next = self.words.len();
            self.words.push(format!("word{next}"));
        }
        Ok(())
    }
}

/// Records hook calls and forwards them to a real override registry.
pub struct RecordingRewriter {
    pub overrides: UserAgentOverrides,
    journal: Journal,
}

impl RecordingRewriter {
    pub fn new(overrides: UserAgentOverrides, journal: Journal) -> Self {
        Self { overrides, journal }
    }
}

impl HeaderRewriter for RecordingRewriter {
    fn install(&self, user_agent: &str, url_pattern: &UrlPattern) {
        self.journal.push(Event::Install {
            user_agent: user_agent.to_string(),
        });
        self.overrides.install(user_agent, url_pattern);
    }

    fn remove_all(&self) {
        self.journal.push(Event::RemoveAll);
        self.overrides.remove_all();
    }
}

/// Fetcher answering from a script; once the script runs out every fetch
/// returns 200. Records which surface's user agent applied to each URL.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<u16, FetchError>>>,
    overrides: UserAgentOverrides,
    journal: Journal,
}

impl ScriptedFetcher {
    pub fn new(
        script: Vec<Result<u16, FetchError>>,
        overrides: UserAgentOverrides,
        journal: Journal,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            overrides,
            journal,
        }
    }
}

#[async_trait::async_trait]
impl SearchFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let surface = self
            .overrides
            .user_agent_for(url)
            .and_then(|ua| SearchSurface::from_user_agent(&ua));
        self.journal.push(Event::Fetch {
            url: url.to_string(),
            surface,
        });
        let next = self.script.lock().unwrap().pop_front().unwrap_or(Ok(200));
        next.map(|status| FetchResponse::with_status(status, url))
    }
}

/// One reported state of the status collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub pc_needed: usize,
    pub mobile_needed: usize,
    pub completed: bool,
    pub job_status: JobStatus,
    pub summary_valid: bool,
}

impl Snapshot {
    pub fn needing(pc_needed: usize, mobile_needed: usize) -> Self {
        Self {
            pc_needed,
            mobile_needed,
            completed: false,
            job_status: JobStatus::Busy,
            summary_valid: true,
        }
    }

    pub fn completed() -> Self {
        Self {
            completed: true,
            ..Self::needing(0, 0)
        }
    }
}

/// Status that walks through snapshots, one per `update`.
pub struct ScriptedStatus {
    current: Snapshot,
    upcoming: VecDeque<Snapshot>,
    update_failure: Option<StatusError>,
    journal: Journal,
    pub updates: usize,
}

impl ScriptedStatus {
    pub fn new(initial: Snapshot, upcoming: Vec<Snapshot>, journal: Journal) -> Self {
        Self {
            current: initial,
            upcoming: upcoming.into(),
            update_failure: None,
            journal,
            updates: 0,
        }
    }

    pub fn failing_update(mut self, failure: StatusError) -> Self {
        self.update_failure = Some(failure);
        self
    }
}

#[async_trait::async_trait]
impl SearchStatus for ScriptedStatus {
    fn search_status(&self, surface: SearchSurface) -> SurfaceStatus {
        match surface {
            SearchSurface::Pc => SurfaceStatus::needing(self.current.pc_needed),
            SearchSurface::Mobile => SurfaceStatus::needing(self.current.mobile_needed),
        }
    }

    async fn update(&mut self) -> Result<(), StatusError> {
        self.journal.push(Event::StatusUpdate);
        self.updates += 1;
        if let Some(failure) = &self.update_failure {
            return Err(failure.clone());
        }
        if let Some(next) = self.upcoming.pop_front() {
            self.current = next;
        }
        Ok(())
    }

    fn is_search_completed(&self) -> bool {
        self.current.completed
    }

    fn job_status(&self) -> JobStatus {
        self.current.job_status
    }

    fn is_summary_valid(&self) -> bool {
        self.current.summary_valid
    }
}
