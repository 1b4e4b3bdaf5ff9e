//! UI-thread dispatch
//!
//! Only one execution context may touch visible UI state. Anything else
//! posts a task to it and moves on without waiting.

use tokio::sync::mpsc;

pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

pub trait UiDispatcher: Send + Sync {
    /// Queue `task` on the UI context. Never blocks.
    fn post(&self, task: UiTask);
}

/// Dispatcher feeding a [`UiLoop`]
#[derive(Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl UiDispatcher for ChannelDispatcher {
    fn post(&self, task: UiTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("UI loop has shut down, dropping task");
        }
    }
}

/// The receiving end, owned by whichever thread plays the UI thread
pub struct UiLoop {
    rx: mpsc::UnboundedReceiver<UiTask>,
}

impl UiLoop {
    /// Run everything queued so far, including tasks queued while running.
    /// Returns how many tasks ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Run tasks until every dispatcher has been dropped
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task();
        }
        tracing::debug!("UI loop finished");
    }
}

pub fn ui_channel() -> (ChannelDispatcher, UiLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelDispatcher { tx }, UiLoop { rx })
}
