use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use quest_core::UrlPattern;
use quest_logging::{quest_debug, quest_warn};

/// Registration point for rewriting the `User-Agent` of outgoing requests.
///
/// Rules are shared by every request issued through the same registry, so
/// callers must remove the previous rule before installing a new one.
pub trait HeaderRewriter: Send + Sync {
    fn install(&self, user_agent: &str, url_pattern: &UrlPattern);

    fn remove_all(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentRule {
    pub user_agent: String,
    pub pattern: UrlPattern,
}

/// Cloneable in-process rule registry; all clones see the same rules.
#[derive(Debug, Clone, Default)]
pub struct UserAgentOverrides {
    rules: Arc<RwLock<Vec<UserAgentRule>>>,
}

impl UserAgentOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// User agent of the most recently installed rule matching `url`.
    pub fn user_agent_for(&self, url: &str) -> Option<String> {
        self.read()
            .iter()
            .rev()
            .find(|rule| rule.pattern.matches(url))
            .map(|rule| rule.user_agent.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<UserAgentRule>> {
        self.rules.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<UserAgentRule>> {
        self.rules.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HeaderRewriter for UserAgentOverrides {
    fn install(&self, user_agent: &str, url_pattern: &UrlPattern) {
        let mut rules = self.write();
        if !rules.is_empty() {
            quest_warn!(
                "installing user-agent rule for {} while {} rule(s) still active",
                url_pattern.as_str(),
                rules.len()
            );
        }
        quest_debug!("user-agent rule installed for {}", url_pattern.as_str());
        rules.push(UserAgentRule {
            user_agent: user_agent.to_string(),
            pattern: url_pattern.clone(),
        });
    }

    fn remove_all(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_pattern() -> UrlPattern {
        UrlPattern::new("https://www.bing.com/search?q=*")
    }

    #[test]
    fn only_matching_urls_get_the_override() {
        let overrides = UserAgentOverrides::new();
        overrides.install("agent/1.0", &search_pattern());

        assert_eq!(
            overrides.user_agent_for("https://www.bing.com/search?q=rust"),
            Some("agent/1.0".to_string())
        );
        assert_eq!(overrides.user_agent_for("https://www.bing.com/"), None);
    }

    #[test]
    fn clones_share_rules_and_remove_all_clears_them() {
        let overrides = UserAgentOverrides::new();
        let shared = overrides.clone();
        shared.install("agent/1.0", &search_pattern());
        assert!(!overrides.is_empty());

        overrides.remove_all();
        assert!(shared.is_empty());
        assert_eq!(
            shared.user_agent_for("https://www.bing.com/search?q=rust"),
            None
        );
    }

    #[test]
    fn latest_rule_wins_when_several_are_installed() {
        let overrides = UserAgentOverrides::new();
        overrides.install("first", &search_pattern());
        overrides.install("second", &search_pattern());
        assert_eq!(
            overrides.user_agent_for("https://www.bing.com/search?q=x"),
            Some("second".to_string())
        );
    }
}
