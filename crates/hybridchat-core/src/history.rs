//! Durable chat transcript
//!
//! The page serialises its transcript itself; here it is one opaque string
//! under a fixed key, replaced wholesale on every save.

use std::sync::Arc;

use hybridchat_storage::KeyValueStore;

use crate::Result;

/// Preference file the transcript lives in
pub const CHAT_HISTORY_NAMESPACE: &str = "chat_history";
pub const CHAT_HISTORY_KEY: &str = "history";
/// Returned when nothing was ever saved: an empty JSON array
pub const EMPTY_HISTORY: &str = "[]";

#[derive(Clone)]
pub struct ChatHistory {
    store: Arc<dyn KeyValueStore>,
}

impl ChatHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, chat_data: &str) -> Result<()> {
        self.store.put(CHAT_HISTORY_KEY, chat_data)?;
        tracing::debug!(chars = chat_data.chars().count(), "Saved chat history");
        Ok(())
    }

    pub fn load(&self) -> Result<String> {
        let history = self.store.get(CHAT_HISTORY_KEY, EMPTY_HISTORY)?;
        tracing::debug!(chars = history.chars().count(), "Loaded chat history");
        Ok(history)
    }
}
