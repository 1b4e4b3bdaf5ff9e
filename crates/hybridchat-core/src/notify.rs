//! Transient user-visible messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    Short,
    Long,
}

/// Surfaces a short message over the content view.
///
/// Implementations are only called from the UI context. There is no
/// delivery guarantee and nothing is kept once the message disappears.
pub trait Notifier: Send + Sync {
    fn show(&self, text: &str, duration: ToastDuration);
}
