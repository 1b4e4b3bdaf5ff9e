//! Back/forward list for the content view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub url: String,
    pub visited_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<NavigationEntry>,
    /// Index of the page currently shown
    current: Option<usize>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished page load
    ///
    /// Drops the forward list. Reloading the current page adds nothing, and
    /// neither do `about:` placeholders such as the blank page a view starts on.
    pub fn visit(&mut self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| CoreError::InvalidUrl(format!("{}: {}", url, e)))?;
        if parsed.scheme() == "about" {
            return Ok(());
        }
        let url = parsed.as_str();

        if self.current().map(|entry| entry.url.as_str()) == Some(url) {
            return Ok(());
        }

        let keep = self.current.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(NavigationEntry {
            url: url.to_string(),
            visited_at: Utc::now(),
        });
        self.current = Some(self.entries.len() - 1);

        Ok(())
    }

    pub fn current(&self) -> Option<&NavigationEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.current, Some(i) if i + 1 < self.entries.len())
    }

    /// Step back, returning the page now shown
    pub fn go_back(&mut self) -> Option<&NavigationEntry> {
        if !self.can_go_back() {
            return None;
        }
        self.current = self.current.map(|i| i - 1);
        self.current()
    }

    pub fn go_forward(&mut self) -> Option<&NavigationEntry> {
        if !self.can_go_forward() {
            return None;
        }
        self.current = self.current.map(|i| i + 1);
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_forward() {
        let mut history = NavigationHistory::new();
        assert!(!history.can_go_back());

        history.visit("http://10.0.2.2:3000/").unwrap();
        history.visit("http://10.0.2.2:3000/group/42").unwrap();
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());

        let back = history.go_back().unwrap();
        assert_eq!(back.url, "http://10.0.2.2:3000/");
        assert!(history.can_go_forward());

        let forward = history.go_forward().unwrap();
        assert_eq!(forward.url, "http://10.0.2.2:3000/group/42");
    }

    #[test]
    fn test_visit_after_back_drops_forward_list() {
        let mut history = NavigationHistory::new();
        history.visit("https://a.example/").unwrap();
        history.visit("https://b.example/").unwrap();
        history.go_back();
        history.visit("https://c.example/").unwrap();

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.current().unwrap().url, "https://c.example/");
    }

    #[test]
    fn test_reload_is_not_a_new_entry() {
        let mut history = NavigationHistory::new();
        history.visit("http://10.0.2.2:3000").unwrap();
        // Normalised to the same URL
        history.visit("http://10.0.2.2:3000/").unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_blank_start_page_is_not_history() {
        let mut history = NavigationHistory::new();
        history.visit("about:blank").unwrap();
        history.visit("http://10.0.2.2:3000/").unwrap();

        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_invalid_url() {
        let mut history = NavigationHistory::new();
        assert!(matches!(
            history.visit("not a url"),
            Err(CoreError::InvalidUrl(_))
        ));
        assert!(history.is_empty());
    }
}
